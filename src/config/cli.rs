use crate::config::toml_config::TomlConfig;
use crate::config::{LogFormat, Overrides, Settings};
use crate::core::table::{Column, OutputFormat};
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "taxpayer-desk")]
#[command(about = "Create, list and search taxpayer records held by a remote record service")]
pub struct CliConfig {
    /// Base URL of the record service
    #[arg(long, env = "TAXPAYER_DESK_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Per-request timeout; unset means wait indefinitely
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Rows per table page (10, 15, 20, 25 or 30)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Log output format (compact or json)
    #[arg(long)]
    pub log_format: Option<LogFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Load every taxpayer and print them
    List(ListArgs),
    /// Create a taxpayer, then print the reloaded list
    Add(AddArgs),
    /// Look up a single taxpayer by TID
    Search(SearchArgs),
    /// Interactive page with table, form and search box (default)
    Shell,
}

#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output format: table, csv or json
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,

    /// Sort by column: tid, first, last or address
    #[arg(long)]
    pub sort: Option<Column>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page to show in table output, starting at 1
    #[arg(long, default_value = "1")]
    pub page: usize,
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    #[arg(long, default_value = "")]
    pub tid: String,

    #[arg(long, default_value = "")]
    pub first_name: String,

    #[arg(long, default_value = "")]
    pub last_name: String,

    #[arg(long, default_value = "")]
    pub address: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Taxpayer identifier
    #[arg(default_value = "")]
    pub tid: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl CliConfig {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            endpoint: self.endpoint.clone(),
            timeout_seconds: self.timeout_seconds,
            page_size: self.page_size,
            log_format: self.log_format,
            verbose: self.verbose,
        }
    }

    /// Load the config file (if any) and merge it under the command line.
    pub fn settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => Some(TomlConfig::from_file(path)?),
            None => None,
        };
        Settings::resolve(file.as_ref(), self.overrides())
    }
}
