use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommuteError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Invalid response from {source_kind}: {message}")]
    InvalidResponse { source_kind: String, message: String },

    #[error("Response field '{field}' is missing or not an array")]
    MissingFieldError { field: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CommuteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::UnexpectedStatus { .. } => ErrorCategory::Network,
            Self::InvalidResponse { .. }
            | Self::MissingFieldError { .. }
            | Self::SerializationError(_) => ErrorCategory::Data,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(e) if e.is_timeout() => "The commute service timed out".to_string(),
            Self::ApiError(e) if e.is_connect() => {
                "Could not connect to the commute service".to_string()
            }
            Self::ApiError(_) => "The commute service request failed".to_string(),
            Self::UnexpectedStatus { status, .. } => {
                format!("The commute service answered with HTTP {}", status)
            }
            Self::InvalidResponse { source_kind, .. } => {
                format!("The {} service returned an unreadable response", source_kind)
            }
            Self::MissingFieldError { field } => {
                format!("The response did not contain a '{}' list", field)
            }
            Self::IoError(e) => format!("File system error: {}", e),
            Self::SerializationError(_) => "Could not encode the commute report".to_string(),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::ConfigValidationError { field, message } => {
                format!("Configuration '{}' is invalid: {}", field, message)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration '{}' is invalid: {}", field, reason)
            }
        }
    }

    /// 失敗時的行程結束碼，任何錯誤都不會回傳 0
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
            ErrorSeverity::Low => 4,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the endpoint URL and your network connection",
            ErrorCategory::Data => "Check that the endpoint returns the expected JSON shape",
            ErrorCategory::Configuration => "Fix the command line arguments or the TOML config file",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, CommuteError>;
