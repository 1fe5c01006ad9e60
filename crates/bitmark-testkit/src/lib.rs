//! # Bitmark Testkit
//!
//! Testing utilities for the Bitmark client.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Fixed inputs with expected hashes and canonical bytes
//! - **Generators**: Proptest strategies for seeds, accounts, names and metadata
//! - **Fixtures**: Deterministic parties and a shared in-memory ledger
//!
//! ## Golden Vectors
//!
//! ```rust
//! use bitmark_testkit::vectors::verify_all_vectors;
//!
//! for (name, ok, got) in verify_all_vectors() {
//!     assert!(ok, "{name}: {got}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use bitmark_testkit::generators::seed;
//!
//! proptest! {
//!     #[test]
//!     fn seed_string_roundtrips(seed in seed()) {
//!         let decoded = bitmark_core::Seed::decode(&seed.encode()).unwrap();
//!         prop_assert_eq!(decoded, seed);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use bitmark_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! assert_ne!(fixture.alice.account_number(), fixture.bob.account_number());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{party, TestFixture};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
