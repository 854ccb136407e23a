use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV writing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid selector '{selector}': {reason}")]
    SelectorError { selector: String, reason: String },

    #[error("Invalid page snapshot: {message}")]
    SnapshotError { message: String },

    #[error("Event loop stopped: {message}")]
    EventLoopError { message: String },
}

/// 錯誤嚴重程度，用於決定 CLI 的退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl FolioError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FolioError::IoError(_) | FolioError::EventLoopError { .. } => ErrorSeverity::Critical,
            FolioError::SerializationError(_)
            | FolioError::CsvError(_)
            | FolioError::SnapshotError { .. } => ErrorSeverity::High,
            FolioError::ConfigValidationError { .. }
            | FolioError::InvalidConfigValueError { .. }
            | FolioError::MissingConfigError { .. }
            | FolioError::SelectorError { .. } => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FolioError::IoError(_) => "Check that the input files exist and are readable",
            FolioError::SerializationError(_) | FolioError::SnapshotError { .. } => {
                "Check the page snapshot and event script JSON structure"
            }
            FolioError::CsvError(_) => "Try --format json or --format table instead",
            FolioError::ConfigValidationError { .. }
            | FolioError::InvalidConfigValueError { .. }
            | FolioError::MissingConfigError { .. } => "Fix the value in the TOML config file",
            FolioError::SelectorError { .. } => {
                "Selectors support #id, .class, [attr], tag[attr], descendant and ',' lists"
            }
            FolioError::EventLoopError { .. } => "Re-run the simulation",
        }
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;
