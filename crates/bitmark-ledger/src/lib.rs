//! # Bitmark Ledger
//!
//! The seam between the client and the Bitmark ledger service.
//!
//! The core never talks to the network. Signed records leave it as
//! [`SignedPayload`] values and go through a [`Transport`], which returns an
//! opaque [`LedgerConfirmation`] or a [`TransportError`]. Retries and backoff
//! belong to the transport; [`TransportError::is_retryable`] tells it which
//! failures are transient.
//!
//! [`MemoryLedger`] implements the trait in memory for tests.
//!
//! ## Message Flow
//!
//! ```text
//! Client                               Ledger
//!   |-------- AssetRegistration ------->|
//!   |<------- asset_id, duplicate ------|
//!   |-------- Issuance ---------------->|
//!   |<------- bitmark ids --------------|
//!   |-------- TransferOffer ----------->|
//!   |<------- offer_id -----------------|
//!   |            (receiver)             |
//!   |-------- OfferResponse ----------->|
//!   |<------- confirmation -------------|
//! ```

pub mod error;
pub mod messages;
pub mod transport;

pub use error::{Result, TransportError};
pub use messages::{LedgerConfirmation, SignedPayload};
pub use transport::{memory::MemoryLedger, Transport};
