//! Signing and verification over canonical bytes.
//!
//! The bytes handed in are signed as-is. Whether the key belongs to the
//! record's declared owner is the ledger's concern, not this module's.

use ed25519_dalek::Signature;

use crate::crypto::{Ed25519PublicKey, Ed25519Signature, SigningKeypair};
use crate::error::{CoreError, Result};

/// Sign bytes. Ed25519 signatures are deterministic.
pub fn sign(keypair: &SigningKeypair, bytes: &[u8]) -> Ed25519Signature {
    keypair.sign(bytes)
}

/// Verify a signature, returning false on any failure.
pub fn verify(public_key: &Ed25519PublicKey, bytes: &[u8], signature: &Ed25519Signature) -> bool {
    verify_strict(public_key, bytes, signature).is_ok()
}

/// Verify a signature.
///
/// Fails with `SigningError` when the public key is not a valid curve point
/// and with `VerificationError` when the signature does not match.
pub fn verify_strict(
    public_key: &Ed25519PublicKey,
    bytes: &[u8],
    signature: &Ed25519Signature,
) -> Result<()> {
    let key = public_key.to_dalek()?;
    let sig = Signature::from_bytes(signature.as_bytes());
    key.verify_strict(bytes, &sig)
        .map_err(|_| CoreError::VerificationError)
}
