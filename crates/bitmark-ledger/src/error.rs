//! Error types for ledger transports.

use thiserror::Error;

/// Errors reported by a transport or by the ledger behind it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The ledger already holds conflicting state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A referenced asset, bitmark or offer does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The ledger refused the record.
    #[error("rejected: {0}")]
    Rejected(String),

    /// The signer is not allowed to perform this action.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The service could not be reached.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// The request did not complete in time.
    #[error("timeout: {0}")]
    Timeout(String),

    /// A payload could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl TransportError {
    /// Whether retrying the same request may succeed.
    ///
    /// Records are idempotent by canonical identity, so a retry never
    /// creates a second copy.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TransportError::Unavailable(_) | TransportError::Timeout(_)
        )
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(e: serde_json::Error) -> Self {
        TransportError::Serialization(e.to_string())
    }
}

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;
