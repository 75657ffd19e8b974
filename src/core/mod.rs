pub mod controller;
pub mod form;
pub mod table;

pub use crate::domain::model::{TaxPayerId, TaxPayerRecord};
pub use crate::domain::ports::{ConfigProvider, RecordService};
pub use crate::utils::error::Result;
