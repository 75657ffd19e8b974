#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::table::DEFAULT_PAGE_SIZE;
use crate::core::ConfigProvider;
use crate::utils::error::{DeskError, Result};
use crate::utils::validation::{self, Validate};
use std::str::FromStr;
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(DeskError::InvalidConfigValueError {
                field: "logging.format".to_string(),
                value: s.to_string(),
                reason: "Value must be one of: compact, json".to_string(),
            }),
        }
    }
}

/// Values given on the command line; each one beats the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub page_size: Option<usize>,
    pub log_format: Option<LogFormat>,
    pub verbose: bool,
}

/// Effective settings: command line, then config file, then defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoint: String,
    pub timeout: Option<Duration>,
    pub page_size: usize,
    pub log_format: LogFormat,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            page_size: DEFAULT_PAGE_SIZE,
            log_format: LogFormat::Compact,
            verbose: false,
        }
    }
}

impl Settings {
    pub fn resolve(file: Option<&TomlConfig>, overrides: Overrides) -> Result<Self> {
        if let Some(file) = file {
            file.validate()?;
        }

        let file_log_format = file
            .and_then(|f| f.log_format())
            .map(LogFormat::from_str)
            .transpose()?;

        let settings = Self {
            endpoint: overrides
                .endpoint
                .or_else(|| file.and_then(|f| f.endpoint()).map(str::to_string))
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            timeout: overrides
                .timeout_seconds
                .or_else(|| file.and_then(|f| f.timeout_seconds()))
                .map(Duration::from_secs),
            page_size: overrides
                .page_size
                .or_else(|| file.and_then(|f| f.page_size()))
                .unwrap_or(DEFAULT_PAGE_SIZE),
            log_format: overrides
                .log_format
                .or(file_log_format)
                .unwrap_or_default(),
            verbose: overrides.verbose || file.map(|f| f.verbose()).unwrap_or(false),
        };

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("service.endpoint", &self.endpoint)?;
        if let Some(timeout) = self.timeout {
            validation::validate_at_least("service.timeout_seconds", timeout.as_secs(), 1)?;
        }
        validation::validate_page_size("table.page_size", self.page_size)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn service_endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}
