//! Deterministic key derivation from a seed.
//!
//! Each key is an independent Blake3 `derive_key` expansion of the seed's
//! entropy under its own context string, so the signing and encryption keys
//! share no material beyond the seed itself.

use zeroize::Zeroize;

use crate::crypto::{EncryptionKeypair, SignatureScheme, SigningKeypair};
use crate::seed::Seed;

const SIGNING_KEY_CONTEXT: &str = "bitmark-core 2024-01-01 ed25519 signing key v2";
const ENCRYPTION_KEY_CONTEXT: &str = "bitmark-core 2024-01-01 x25519 encryption key v2";

/// The signature scheme accounts are derived for.
pub const DEFAULT_SCHEME: SignatureScheme = SignatureScheme::Ed25519;

/// Derive the account signing keypair for `scheme`.
pub fn derive_signing_keypair_for(seed: &Seed, scheme: SignatureScheme) -> SigningKeypair {
    match scheme {
        SignatureScheme::Ed25519 => {
            let mut entropy = seed.entropy();
            let mut secret = blake3::derive_key(SIGNING_KEY_CONTEXT, &entropy);
            let keypair = SigningKeypair::from_secret(&secret);
            entropy.zeroize();
            secret.zeroize();
            keypair
        }
    }
}

/// Derive the account signing keypair with the default scheme.
pub fn derive_signing_keypair(seed: &Seed) -> SigningKeypair {
    derive_signing_keypair_for(seed, DEFAULT_SCHEME)
}

/// Derive the X25519 keypair used to share encrypted asset content.
pub fn derive_encryption_keypair(seed: &Seed) -> EncryptionKeypair {
    let mut entropy = seed.entropy();
    let secret = blake3::derive_key(ENCRYPTION_KEY_CONTEXT, &entropy);
    entropy.zeroize();
    EncryptionKeypair::from_secret(secret)
}
