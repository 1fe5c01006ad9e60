//! # Bitmark Core
//!
//! The client-side trust core for the Bitmark ledger: seeds and recovery
//! phrases, deterministic keys, account numbers, content fingerprints,
//! canonical record encoding, signing, and the transfer-offer state machine.
//!
//! This crate performs no network I/O and keeps no global state. Every
//! operation is a synchronous computation over values the caller owns, so
//! independent accounts and records can be processed in parallel freely.
//!
//! ## Key Types
//!
//! - [`Seed`] - Versioned, network-tagged root secret
//! - [`Account`] - A seed plus the keys derived from it
//! - [`AccountNumber`] - Printable, checksummed public identity
//! - [`Fingerprint`] - Content digest of an asset
//! - [`Signed`] - A canonical record with its signer and signature
//! - [`TransferOffer`] - Local projection of a two-signature transfer
//!
//! ## Canonicalization
//!
//! Every record is signed and hashed over fixed-order binary bytes. See the
//! [`canonical`] module.

pub mod account;
pub mod asset;
pub mod canonical;
pub mod crypto;
pub mod error;
pub mod fingerprint;
pub mod issuance;
pub mod keys;
pub mod metadata;
pub mod offer;
pub mod phrase;
pub mod record;
pub mod seed;
pub mod signing;
pub mod transfer;
pub mod types;
pub mod validation;

pub use account::{Account, AccountNumber};
pub use asset::{AssetRegistration, AssetRegistrationParams};
pub use crypto::{
    EncryptionKeypair, Ed25519PublicKey, Ed25519Signature, SignatureScheme, SigningKeypair,
    X25519PublicKey,
};
pub use error::{CoreError, Result, ValidationError};
pub use fingerprint::Fingerprint;
pub use issuance::{Issuance, IssuanceParams};
pub use keys::{derive_encryption_keypair, derive_signing_keypair};
pub use metadata::Metadata;
pub use offer::{
    OfferAction, OfferResponse, OfferResponseRecord, OfferStatus, TransferOffer,
    TransferOfferRecord,
};
pub use phrase::{from_phrase, to_phrase};
pub use record::{Record, RecordKind, Signed};
pub use seed::Seed;
pub use transfer::{Transfer, TransferParams};
pub use types::{AssetId, Network, OfferId, RecordId};
