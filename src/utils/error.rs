//! Error Handling
//!
//! Unified error types for the application.
//! Uses thiserror for ergonomic error definitions.

use payslip_core::CoreError;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or invalid configuration. Fatal, raised before any browser activity.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Login did not complete
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Page navigation or list reveal did not complete
    #[error("Navigation error: {0}")]
    Navigation(String),

    /// Browser launch or devtools protocol failures
    #[error("Browser error: {0}")]
    Browser(String),

    /// In-page request failure (network error, non-2xx status)
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Errors from the core crate (decode, parse, validation)
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create a navigation error
    pub fn navigation(msg: impl Into<String>) -> Self {
        Self::Navigation(msg.into())
    }

    /// Create a browser error
    pub fn browser(msg: impl Into<String>) -> Self {
        Self::Browser(msg.into())
    }

    /// Create a fetch error
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }
}

/// Convert AppError to a string for logs and run summaries
impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}
