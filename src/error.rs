//! Error types for qlvalue
//!
//! Only wire-facing and caller-input conditions live here. Type-tag
//! mismatches and other caller bugs are hard assertions (panics) and never
//! show up as a `QlError`.

use thiserror::Error;

/// Result type alias using QlError
pub type Result<T> = std::result::Result<T, QlError>;

/// Unified error type for qlvalue operations
#[derive(Debug, Error)]
pub enum QlError {
    // -------------------------------------------------------------------------
    // Wire Errors
    // -------------------------------------------------------------------------
    /// Truncated or malformed bytes during decode
    #[error("Corruption: {0}")]
    Corruption(String),

    // -------------------------------------------------------------------------
    // Caller Input Errors
    // -------------------------------------------------------------------------
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    // -------------------------------------------------------------------------
    // Record Persistence Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl QlError {
    pub(crate) fn corruption(msg: impl Into<String>) -> Self {
        QlError::Corruption(msg.into())
    }

    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        QlError::InvalidArgument(msg.into())
    }
}

impl From<bincode::Error> for QlError {
    fn from(err: bincode::Error) -> Self {
        QlError::Serialization(err.to_string())
    }
}
