//! Error types for the directory store

use thiserror::Error;

/// Directory store errors
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Principal not found
    #[error("Principal not found: {0}")]
    NotFound(String),

    /// Backing store unreachable or timed out
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for directory operations
pub type Result<T> = std::result::Result<T, DirectoryError>;
