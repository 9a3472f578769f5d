//! Error types for storage operations.

use thiserror::Error;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage errors.
///
/// The in-memory store never produces these; they exist so that adapters
/// backed by real I/O can report failures through the same contract.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error for key '{key}': {message}")]
    Deserialization { key: String, message: String },

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Operation timeout
    #[error("Operation timeout")]
    Timeout,

    /// Generic error
    #[error("Store error: {0}")]
    Other(String),
}

impl StoreError {
    pub(crate) fn deserialization(key: &str, err: serde_json::Error) -> Self {
        StoreError::Deserialization {
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
