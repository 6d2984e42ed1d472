//! Core Error Types
//!
//! Error types for the browser-free building blocks. The application crate
//! wraps these into its own `AppError`.

use thiserror::Error;

/// Core error type for the payslip workspace.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A transport string carried a code unit that is not a byte value
    #[error("Decode error: {0}")]
    Decode(String),

    /// Parse errors
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

/// Convert CoreError to a string
impl From<CoreError> for String {
    fn from(err: CoreError) -> String {
        err.to_string()
    }
}
