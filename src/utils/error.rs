use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Record service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Record service rejected {operation} with status {status}: {body}")]
    Service {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid taxpayer identifier '{value}': {reason}")]
    InvalidIdentifier { value: String, reason: String },

    #[error("Form has invalid fields: {}", .fields.join(", "))]
    FormValidation { fields: Vec<String> },

    #[error("Another operation is in flight, {operation} was not started")]
    Busy { operation: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Service,
    Configuration,
    Validation,
    Io,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl DeskError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DeskError::Http(e) if e.is_decode() => ErrorCategory::Data,
            DeskError::Http(_) => ErrorCategory::Network,
            DeskError::Service { .. } => ErrorCategory::Service,
            DeskError::ConfigError { .. }
            | DeskError::InvalidConfigValueError { .. }
            | DeskError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            DeskError::InvalidIdentifier { .. }
            | DeskError::FormValidation { .. }
            | DeskError::Busy { .. } => ErrorCategory::Validation,
            DeskError::Io(_) => ErrorCategory::Io,
            DeskError::Serialization(_) | DeskError::Csv(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Service => ErrorSeverity::Medium,
            ErrorCategory::Validation | ErrorCategory::Data | ErrorCategory::Io => {
                ErrorSeverity::High
            }
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for a command that ended with this error. Never 0.
    pub fn exit_code(&self) -> i32 {
        // 根據錯誤嚴重程度決定退出碼
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    /// Message suitable for showing to the person at the keyboard.
    pub fn user_friendly_message(&self) -> String {
        match self {
            DeskError::Http(e) if e.is_timeout() => {
                "The record service did not answer in time.".to_string()
            }
            DeskError::Http(e) if e.is_decode() => {
                "The record service sent a response that could not be read.".to_string()
            }
            DeskError::Http(_) => "Could not reach the record service.".to_string(),
            DeskError::Service {
                operation, status, ..
            } => format!("The record service refused to {operation} (HTTP {status})."),
            DeskError::ConfigError { message } => format!("Configuration problem: {message}"),
            DeskError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value for '{field}' is invalid: {reason}")
            }
            DeskError::ConfigValidationError { field, message } => {
                format!("Configuration '{field}' is invalid: {message}")
            }
            DeskError::InvalidIdentifier { value, .. } => {
                format!("'{value}' is not a valid TID.")
            }
            DeskError::FormValidation { fields } => {
                format!("Please fix the highlighted fields: {}", fields.join(", "))
            }
            DeskError::Busy { .. } => "Please wait for the current operation to finish.".to_string(),
            DeskError::Io(e) => format!("File system error: {e}"),
            DeskError::Serialization(_) | DeskError::Csv(_) => {
                "Records could not be formatted for output.".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the service endpoint and your network, then retry.",
            ErrorCategory::Service => "Check the service logs; the request was not applied.",
            ErrorCategory::Configuration => {
                "Review the --endpoint flag or the [service] section of the config file."
            }
            ErrorCategory::Validation => "Correct the input and try again.",
            ErrorCategory::Io => "Check file paths and permissions.",
            ErrorCategory::Data => "Verify the service speaks the expected JSON format.",
        }
    }
}

pub type Result<T> = std::result::Result<T, DeskError>;
