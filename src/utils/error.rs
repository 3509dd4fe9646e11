use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Regex compilation failed: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Worker task failed: {0}")]
    JoinError(#[from] tokio::task::JoinError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("File is not valid UTF-8: {path}")]
    EncodingError { path: String },

    #[error("No og:title tag found in {path}")]
    TitleNotFound { path: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },
}

pub type Result<T> = std::result::Result<T, SweepError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Filesystem,
    Content,
    Configuration,
    Internal,
}

impl SweepError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SweepError::IoError(_) => ErrorCategory::Filesystem,
            SweepError::EncodingError { .. } | SweepError::TitleNotFound { .. } => {
                ErrorCategory::Content
            }
            SweepError::InvalidConfigValueError { .. } | SweepError::MissingConfigError { .. } => {
                ErrorCategory::Configuration
            }
            SweepError::RegexError(_)
            | SweepError::JoinError(_)
            | SweepError::SerializationError(_)
            | SweepError::ProcessingError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單檔案層級的錯誤，不會中斷整體流程
            SweepError::EncodingError { .. } | SweepError::TitleNotFound { .. } => {
                ErrorSeverity::Low
            }
            SweepError::IoError(_) => ErrorSeverity::Medium,
            SweepError::InvalidConfigValueError { .. }
            | SweepError::MissingConfigError { .. }
            | SweepError::ProcessingError { .. } => ErrorSeverity::High,
            SweepError::RegexError(_)
            | SweepError::JoinError(_)
            | SweepError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SweepError::IoError(_) => {
                "Check that the file exists and the process has read/write permission".to_string()
            }
            SweepError::EncodingError { .. } => {
                "Re-encode the file as UTF-8 before running the sweep".to_string()
            }
            SweepError::TitleNotFound { .. } => {
                "Add an og:title meta tag if the page should appear in progress output".to_string()
            }
            SweepError::InvalidConfigValueError { .. } | SweepError::MissingConfigError { .. } => {
                "Run with --help and fix the listed configuration value".to_string()
            }
            SweepError::RegexError(_) => {
                "Report this: a built-in pattern failed to compile".to_string()
            }
            SweepError::JoinError(_) => {
                "Re-run; a worker task panicked or was cancelled".to_string()
            }
            SweepError::SerializationError(_) | SweepError::ProcessingError { .. } => {
                "Re-run with --verbose and inspect the log".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SweepError::IoError(e) => format!("檔案存取失敗: {}", e),
            SweepError::EncodingError { path } => format!("檔案不是有效的 UTF-8: {}", path),
            SweepError::TitleNotFound { path } => format!("找不到 og:title 標籤: {}", path),
            SweepError::InvalidConfigValueError { field, reason, .. } => {
                format!("配置欄位 {} 無效: {}", field, reason)
            }
            SweepError::MissingConfigError { field } => format!("缺少配置欄位: {}", field),
            other => format!("{}", other),
        }
    }
}
