use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Changelog not found at {path}")]
    MissingInput { path: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Feed rendering error: {message}")]
    RenderError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Rendering,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl FeedError {
    pub fn render(message: impl Into<String>) -> Self {
        Self::RenderError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            FeedError::MissingInput { .. } => ErrorCategory::Input,
            FeedError::RenderError { .. } => ErrorCategory::Rendering,
            FeedError::ConfigError { .. }
            | FeedError::ConfigValidationError { .. }
            | FeedError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            FeedError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FeedError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FeedError::MissingInput { path } => format!("Changelog not found at {}", path),
            FeedError::IoError(e) => format!("File system error: {}", e),
            FeedError::RenderError { message } => format!("Could not render the feed: {}", message),
            FeedError::ConfigError { message } => format!("Configuration problem: {}", message),
            FeedError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            FeedError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("'{}' is not a valid {}: {}", value, field, reason),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FeedError::MissingInput { .. } => {
                "Make sure the changelog repository is cloned in the working directory"
            }
            FeedError::IoError(_) => "Check file permissions and available disk space",
            FeedError::RenderError { .. } => "Re-run the generator; report the changelog entry if it keeps failing",
            FeedError::ConfigError { .. } | FeedError::ConfigValidationError { .. } => {
                "Check the configuration file syntax and field names"
            }
            FeedError::InvalidConfigValueError { .. } => {
                "Fix the highlighted value on the command line or in the configuration file"
            }
        }
    }
}

/// Why a version's publication date could not be taken from history.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateResolutionError {
    #[error("history store unavailable: {reason}")]
    HistoryUnavailable { reason: String },

    #[error("history query exited with {status}: {stderr}")]
    QueryFailed { status: String, stderr: String },

    #[error("history query timed out after {0:?}")]
    Timeout(Duration),

    #[error("no attributed line contains the heading for {version}")]
    NoMatch { version: String },

    #[error("{count} attributed lines contain the heading for {version}")]
    Ambiguous { version: String, count: usize },

    #[error("unparseable attribution timestamp '{raw}'")]
    InvalidTimestamp { raw: String },
}

pub type Result<T> = std::result::Result<T, FeedError>;
