//! Error types for the Bitmark core.

use thiserror::Error;

use crate::offer::{OfferAction, OfferStatus};
use crate::types::Network;

/// Errors raised by the core.
///
/// Every variant is detected synchronously, before any ledger interaction,
/// and none of them is transient.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("checksum mismatch")]
    InvalidChecksum,

    #[error("unknown word {word:?} at position {position}")]
    UnknownWord { position: usize, word: String },

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("network mismatch: expected {expected}, got {actual}")]
    NetworkMismatch { expected: Network, actual: Network },

    #[error("signer mismatch: expected {expected}, got {actual}")]
    SignerMismatch { expected: String, actual: String },

    #[error("cannot {action} an offer that is {from}")]
    InvalidStateTransition {
        from: OfferStatus,
        action: OfferAction,
    },

    #[error("signing error: {0}")]
    SigningError(String),

    #[error("signature verification failed")]
    VerificationError,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bounds and shape violations found before a record is canonicalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("asset name is empty")]
    EmptyName,

    #[error("asset name has {0} characters, maximum is 64")]
    NameTooLong(usize),

    #[error("metadata key is empty")]
    EmptyMetadataKey,

    #[error("metadata entry {0:?} contains a NUL character")]
    MetadataContainsNul(String),

    #[error("serialized metadata has {0} characters, maximum is 2048")]
    MetadataTooLarge(usize),

    #[error("issuance quantity {0} is outside 1..=100")]
    QuantityOutOfRange(usize),

    #[error("issuance nonces are not distinct")]
    DuplicateNonce,

    #[error("fingerprint has not been set")]
    MissingFingerprint,

    #[error("source bitmark has not been set")]
    MissingBitmark,

    #[error("offer has no ledger-assigned id yet")]
    MissingOfferId,

    #[error("offer id mismatch: expected {expected}, got {actual}")]
    OfferIdMismatch { expected: String, actual: String },

    #[error("offer sender and receiver are the same account")]
    SelfOffer,
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// True for errors caused by malformed caller input at the seed/phrase layer.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidFormat(_) | CoreError::InvalidChecksum | CoreError::UnknownWord { .. }
        )
    }
}
