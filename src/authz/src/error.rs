//! Error types for the authorization engine

use thiserror::Error;

/// Authorization engine errors
///
/// Everything except `AuditWrite` is normalized to a DENY decision at the
/// evaluator boundary; callers never see these kinds directly. An audit
/// append failure is the one error allowed to escalate, because a decision
/// must not be released un-audited.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// Malformed or missing session claims
    #[error("Invalid session: {0}")]
    InvalidSession(String),

    /// Unknown principal or target
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backing store unreachable or timed out
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Audit ledger append failed
    #[error("Audit write failed: {0}")]
    AuditWrite(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<tamshai_directory::DirectoryError> for AuthzError {
    fn from(err: tamshai_directory::DirectoryError) -> Self {
        use tamshai_directory::DirectoryError;
        match err {
            DirectoryError::NotFound(id) => AuthzError::NotFound(id),
            DirectoryError::StoreUnavailable(msg) => AuthzError::StoreUnavailable(msg),
            DirectoryError::Internal(msg) => AuthzError::Internal(msg),
        }
    }
}

/// Result type for authorization operations
pub type Result<T> = std::result::Result<T, AuthzError>;
