//! Proptest generators for property-based testing.

use proptest::prelude::*;

use bitmark_core::validation::{MAX_ISSUE_QUANTITY, MAX_NAME_CHARS};
use bitmark_core::{Account, Fingerprint, Metadata, Network, RecordId, Seed};

/// Generate a network.
pub fn network() -> impl Strategy<Value = Network> {
    prop_oneof![Just(Network::Livenet), Just(Network::Testnet)]
}

/// Generate a seed on any network.
pub fn seed() -> impl Strategy<Value = Seed> {
    (any::<[u8; 16]>(), network()).prop_map(|(core, network)| Seed::from_core(core, network))
}

/// Generate an account on any network.
pub fn account() -> impl Strategy<Value = Account> {
    seed().prop_map(Account::from_seed)
}

/// Generate an account on `network`.
pub fn account_on(network: Network) -> impl Strategy<Value = Account> {
    any::<[u8; 16]>().prop_map(move |core| Account::from_seed(Seed::from_core(core, network)))
}

/// Generate a random RecordId.
pub fn record_id() -> impl Strategy<Value = RecordId> {
    any::<[u8; 32]>().prop_map(RecordId::from_bytes)
}

/// Generate the fingerprint of some content.
pub fn fingerprint() -> impl Strategy<Value = Fingerprint> {
    prop::collection::vec(any::<u8>(), 0..256).prop_map(|content| Fingerprint::compute(&content))
}

/// Generate a valid asset name, including multi-byte characters.
pub fn asset_name() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 1..=MAX_NAME_CHARS)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Generate small metadata that stays within the size limit.
pub fn metadata() -> impl Strategy<Value = Metadata> {
    prop::collection::btree_map("[a-z][a-z0-9_]{0,15}", "[ -~]{1,32}", 0..8)
        .prop_map(Metadata::from)
}

/// Generate a valid issuance quantity.
pub fn quantity() -> impl Strategy<Value = usize> {
    1..=MAX_ISSUE_QUANTITY
}
