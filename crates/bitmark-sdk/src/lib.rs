//! # Bitmark SDK
//!
//! The client API for the Bitmark property ledger: accounts, asset
//! registration, issuance, transfers and transfer offers.
//!
//! ## Overview
//!
//! All cryptography and record encoding live in [`bitmark_core`]; all
//! network traffic goes through a [`Transport`](bitmark_ledger::Transport).
//! The [`Client`] sits between them: it checks that accounts belong to the
//! configured network, signs locally, submits, and updates local offer state
//! only after the ledger confirms.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bitmark_sdk::{Client, SdkConfig};
//! use bitmark_sdk::core::{AssetRegistrationParams, IssuanceParams, Metadata, Network};
//! use bitmark_sdk::ledger::MemoryLedger;
//!
//! async fn example() {
//!     let client = Client::new(SdkConfig::new(Network::Testnet), MemoryLedger::new());
//!     let alice = client.new_account();
//!
//!     let params = AssetRegistrationParams::new("Song", Metadata::new())
//!         .fingerprint_bytes(b"song bytes");
//!     let asset = client.register_asset(&alice, &params).await.unwrap();
//!
//!     let bitmarks = client
//!         .issue(&alice, &IssuanceParams::new(asset.asset_id, 5))
//!         .await
//!         .unwrap();
//!     assert_eq!(bitmarks.len(), 5);
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `bitmark_sdk::core` - Seeds, accounts, records and offers
//! - `bitmark_sdk::ledger` - Transport seam and the in-memory ledger

pub mod client;
pub mod config;
pub mod error;
pub mod query;

pub use bitmark_core as core;
pub use bitmark_ledger as ledger;

pub use client::{Client, RegisteredAsset};
pub use config::SdkConfig;
pub use error::{Result, SdkError};
pub use query::{
    AssetQueryBuilder, BitmarkQueryBuilder, Direction, Query, QueryError,
    TransactionQueryBuilder,
};

pub use bitmark_core::{
    Account, AccountNumber, AssetId, Metadata, Network, OfferAction, OfferId, OfferStatus,
    RecordId, TransferOffer,
};
