pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::HttpRecordService;
pub use app::shell::Shell;
pub use config::Settings;
pub use core::controller::{SearchOutcome, TaxPayerController};
pub use core::table::TableView;
pub use domain::model::{TaxPayerId, TaxPayerRecord};
pub use domain::ports::RecordService;
pub use utils::error::{DeskError, Result};
