//! Cryptographic primitives for the Bitmark core.
//!
//! Wraps Ed25519 signing, X25519 key agreement keys and the SHA-2 digests
//! used for identities with strong types.

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use x25519_dalek::{PublicKey as DalekX25519Public, StaticSecret};

use crate::error::CoreError;
use crate::types::{decode_hex_array, hex_newtype_serde};

/// The asymmetric signature scheme an account signs with.
///
/// The scheme is recorded in every account number's key tag so that callers
/// never assume a particular algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureScheme {
    Ed25519,
}

impl SignatureScheme {
    /// Numeric id stored in the high nibble of an account key tag.
    pub const fn id(self) -> u8 {
        match self {
            SignatureScheme::Ed25519 => 0x01,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0x01 => Some(SignatureScheme::Ed25519),
            _ => None,
        }
    }

    /// Public key length in bytes.
    pub const fn public_key_len(self) -> usize {
        match self {
            SignatureScheme::Ed25519 => 32,
        }
    }

    /// Signature length in bytes.
    pub const fn signature_len(self) -> usize {
        match self {
            SignatureScheme::Ed25519 => 64,
        }
    }
}

/// SHA-256 over the concatenation of `parts`.
pub fn sha256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// SHA-512 over the concatenation of `parts`.
pub fn sha512(parts: &[&[u8]]) -> [u8; 64] {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 64];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// First four bytes of Blake3 over `data`, used by the printable encodings.
pub(crate) fn checksum4(data: &[u8]) -> [u8; 4] {
    let hash = blake3::hash(data);
    let mut out = [0u8; 4];
    out.copy_from_slice(&hash.as_bytes()[..4]);
    out
}

/// A 32-byte Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ed25519PublicKey(pub [u8; 32]);

impl Ed25519PublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        decode_hex_array(s).map(Self)
    }

    /// Load the dalek verifying key, rejecting bytes that are not a curve point.
    pub(crate) fn to_dalek(self) -> Result<VerifyingKey, CoreError> {
        VerifyingKey::from_bytes(&self.0)
            .map_err(|e| CoreError::SigningError(format!("invalid public key: {e}")))
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Pub({})", &self.to_hex()[..16])
    }
}

hex_newtype_serde!(Ed25519PublicKey, 32);

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519Signature(pub [u8; 64]);

impl Ed25519Signature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        decode_hex_array(s).map(Self)
    }
}

impl fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Sig({}...)", &self.to_hex()[..16])
    }
}

hex_newtype_serde!(Ed25519Signature, 64);

/// An Ed25519 keypair derived from a seed.
///
/// This wraps ed25519-dalek's SigningKey, which zeroizes on drop.
#[derive(Clone)]
pub struct SigningKeypair {
    signing_key: SigningKey,
}

impl SigningKeypair {
    /// Create from 32 bytes of secret key material.
    pub fn from_secret(secret: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(secret),
        }
    }

    /// The scheme this keypair signs with.
    pub fn scheme(&self) -> SignatureScheme {
        SignatureScheme::Ed25519
    }

    /// Get the public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a message. Ed25519 signing is deterministic.
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        let sig: Signature = self.signing_key.sign(message);
        Ed25519Signature(sig.to_bytes())
    }
}

impl fmt::Debug for SigningKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKeypair({:?})", self.public_key())
    }
}

/// An X25519 public key (32 bytes), used to share encrypted asset content.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct X25519PublicKey(pub [u8; 32]);

impl X25519PublicKey {
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        decode_hex_array(s).map(Self)
    }
}

impl fmt::Debug for X25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X25519Pub({})", &self.to_hex()[..16])
    }
}

hex_newtype_serde!(X25519PublicKey, 32);

/// An X25519 keypair derived from a seed.
///
/// Unlike the signing keypair, this is only for key agreement.
#[derive(Clone)]
pub struct EncryptionKeypair {
    secret: StaticSecret,
}

impl EncryptionKeypair {
    /// Create from 32 bytes of secret key material.
    pub fn from_secret(secret: [u8; 32]) -> Self {
        Self {
            secret: StaticSecret::from(secret),
        }
    }

    /// Derive the public key.
    pub fn public_key(&self) -> X25519PublicKey {
        X25519PublicKey(*DalekX25519Public::from(&self.secret).as_bytes())
    }

    /// Perform key agreement with a peer's public key.
    pub fn diffie_hellman(&self, peer: &X25519PublicKey) -> [u8; 32] {
        let shared = self.secret.diffie_hellman(&DalekX25519Public::from(peer.0));
        *shared.as_bytes()
    }
}

impl fmt::Debug for EncryptionKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncryptionKeypair({:?})", self.public_key())
    }
}
