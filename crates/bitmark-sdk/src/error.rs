//! Error types for the SDK.

use bitmark_core::CoreError;
use bitmark_ledger::TransportError;
use thiserror::Error;

use crate::query::QueryError;

/// Errors that can occur during SDK operations.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Local failure: bad input, validation, signing or offer state.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The transport or the ledger refused the request.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Invalid query parameters.
    #[error("query error: {0}")]
    Query(#[from] QueryError),

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The ledger's confirmation lacked a field the operation needs.
    #[error("unexpected ledger response: {0}")]
    UnexpectedResponse(String),
}

impl SdkError {
    /// Whether the caller may retry. Only transient transport failures are.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SdkError::Transport(e) if e.is_retryable())
    }
}

/// Result type for SDK operations.
pub type Result<T> = std::result::Result<T, SdkError>;
