//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use bitmark_core::{
    Account, AssetId, AssetRegistrationParams, IssuanceParams, Metadata, Network, RecordId, Seed,
};
use bitmark_ledger::{MemoryLedger, Transport};

/// A deterministic account whose seed core is `byte` repeated.
pub fn party(byte: u8, network: Network) -> Account {
    Account::from_seed(Seed::from_core([byte; 16], network))
}

/// Three deterministic parties sharing one in-memory ledger.
pub struct TestFixture {
    pub network: Network,
    pub ledger: MemoryLedger,
    pub alice: Account,
    pub bob: Account,
    pub carol: Account,
}

impl TestFixture {
    /// Create a testnet fixture.
    pub fn new() -> Self {
        Self::with_network(Network::Testnet)
    }

    pub fn with_network(network: Network) -> Self {
        Self {
            network,
            ledger: MemoryLedger::new(),
            alice: party(0xa1, network),
            bob: party(0xb2, network),
            carol: party(0xc3, network),
        }
    }

    /// Registration params whose fingerprint is derived from `name`.
    pub fn asset_params(&self, name: &str) -> AssetRegistrationParams {
        AssetRegistrationParams::new(name, Metadata::new().with("source", "testkit"))
            .fingerprint_bytes(format!("content of {name}").as_bytes())
    }

    /// Register an asset as `owner` and issue `quantity` bitmarks of it,
    /// straight against the ledger.
    pub async fn seed_bitmarks(
        &self,
        owner: &Account,
        name: &str,
        quantity: usize,
    ) -> (AssetId, Vec<RecordId>) {
        let registration = self
            .asset_params(name)
            .sign(owner)
            .expect("fixture asset must sign");
        let asset_id = registration
            .record
            .asset_id()
            .expect("fixture asset id");
        self.ledger
            .submit(registration.into())
            .await
            .expect("fixture asset must register");

        let issuance = IssuanceParams::new(asset_id, quantity)
            .sign(owner)
            .expect("fixture issuance must sign");
        let bitmark_ids = issuance.bitmark_ids().expect("fixture bitmark ids");
        self.ledger
            .submit(issuance.into())
            .await
            .expect("fixture issuance must be accepted");

        (asset_id, bitmark_ids)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
