//! Canonical byte encoding for records and record identities.
//!
//! The format is a fixed-order concatenation, not a self-describing one:
//! - Every record starts with `kind:u8 || codec_version:u8`
//! - Integers are fixed-width big-endian
//! - Strings are UTF-8 with a `u32` big-endian byte-length prefix
//! - Account numbers, fingerprints and ids are their raw bytes
//! - Metadata is a `u32` entry count followed by key/value strings in key order
//!
//! These bytes are what gets signed and hashed. The JSON wire form never is.

use crate::account::AccountNumber;
use crate::crypto::{sha256, sha512, Ed25519Signature};
use crate::error::{CoreError, Result};
use crate::fingerprint::Fingerprint;
use crate::metadata::Metadata;
use crate::record::RecordKind;
use crate::types::{AssetId, RecordId};

/// Version byte written after the record kind.
pub const CODEC_VERSION: u8 = 0x01;

/// Domain separators for identity hashes.
mod domains {
    pub const ASSET_ID: &[u8] = b"bitmark-core/asset-id/v1";
    pub const RECORD_ID: &[u8] = b"bitmark-core/record-id/v1";
    pub const BITMARK_ID: &[u8] = b"bitmark-core/bitmark-id/v1";
}

/// Append-only writer for canonical record bytes.
#[derive(Debug)]
pub struct CanonicalWriter {
    buf: Vec<u8>,
}

impl CanonicalWriter {
    /// Start a record of the given kind.
    pub fn new(kind: RecordKind) -> Self {
        Self {
            buf: vec![kind.to_u8(), CODEC_VERSION],
        }
    }

    /// Start a hash preimage under a domain separator.
    fn preimage(domain: &[u8]) -> Self {
        Self {
            buf: domain.to_vec(),
        }
    }

    pub fn put_u8(&mut self, n: u8) {
        self.buf.push(n);
    }

    pub fn put_u16(&mut self, n: u16) {
        self.buf.extend_from_slice(&n.to_be_bytes());
    }

    pub fn put_u32(&mut self, n: u32) {
        self.buf.extend_from_slice(&n.to_be_bytes());
    }

    pub fn put_u64(&mut self, n: u64) {
        self.buf.extend_from_slice(&n.to_be_bytes());
    }

    /// Fixed-width raw bytes, no length prefix.
    pub fn put_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// A `u32` length or count prefix.
    pub fn put_len(&mut self, len: usize) -> Result<()> {
        let len = u32::try_from(len)
            .map_err(|_| CoreError::InvalidFormat(format!("length {len} exceeds u32")))?;
        self.put_u32(len);
        Ok(())
    }

    pub fn put_str(&mut self, s: &str) -> Result<()> {
        self.put_len(s.len())?;
        self.buf.extend_from_slice(s.as_bytes());
        Ok(())
    }

    pub fn put_account(&mut self, account: &AccountNumber) {
        self.put_raw(&account.to_raw());
    }

    pub fn put_metadata(&mut self, metadata: &Metadata) -> Result<()> {
        self.put_len(metadata.len())?;
        for (key, value) in metadata.iter() {
            self.put_str(key)?;
            self.put_str(value)?;
        }
        Ok(())
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Read the record kind from the header of canonical bytes.
pub fn record_kind(bytes: &[u8]) -> Result<RecordKind> {
    match bytes {
        [kind, CODEC_VERSION, ..] => RecordKind::from_u8(*kind)
            .ok_or_else(|| CoreError::InvalidFormat(format!("unknown record kind: {kind:#04x}"))),
        [_, version, ..] => Err(CoreError::InvalidFormat(format!(
            "unsupported codec version: {version:#04x}"
        ))),
        _ => Err(CoreError::InvalidFormat("record header truncated".into())),
    }
}

/// Ledger identity of an asset.
///
/// Covers fingerprint, name and metadata but not the registrant, so the
/// same content registered twice maps to the same asset.
pub fn asset_id(fingerprint: &Fingerprint, name: &str, metadata: &Metadata) -> Result<AssetId> {
    let mut w = CanonicalWriter::preimage(domains::ASSET_ID);
    w.put_raw(fingerprint.as_bytes());
    w.put_str(name)?;
    w.put_metadata(metadata)?;
    Ok(AssetId::from_bytes(sha512(&[&w.finish()])))
}

/// Transaction id of a signed record.
pub fn record_id(canonical: &[u8], signature: &Ed25519Signature) -> RecordId {
    RecordId::from_bytes(sha256(&[domains::RECORD_ID, canonical, signature.as_bytes()]))
}

/// Identity of one issued bitmark.
pub fn bitmark_id(issuance: &RecordId, nonce: u64) -> RecordId {
    RecordId::from_bytes(sha256(&[
        domains::BITMARK_ID,
        issuance.as_bytes(),
        &nonce.to_be_bytes(),
    ]))
}
