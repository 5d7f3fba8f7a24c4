use std::io;
use thiserror::Error;

/// Crate-wide error type, consolidating every failure the engine can hit into a single enum.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or invalid configuration (e.g. no API key). Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backend replied, but no structured object could be recovered from the text.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Network, HTTP status or envelope failures at the inference service boundary.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Represents data validation errors (e.g., an out-of-range config value).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents backend calls that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Parse(s) => AppError::Parse(s.clone()),
            AppError::Backend(s) => AppError::Backend(s.clone()),
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
            AppError::Timeout(s) => AppError::Timeout(s.clone()),
        }
    }
}

impl AppError {
    /// Short tag used as a structured logging field.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Parse(_) => "parse",
            AppError::Backend(_) => "backend",
            AppError::Validation(_) => "validation",
            AppError::Io(_) => "io",
            AppError::Timeout(_) => "timeout",
        }
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(format!("Backend call timed out: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(format!("JSON error: {}", err))
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Config(format!("URL parse error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(format!("HTTP timeout: {}", err))
        } else {
            AppError::Backend(format!("HTTP error: {}", err))
        }
    }
}
