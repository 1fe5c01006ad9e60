//! The record abstraction shared by every signable record kind.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::account::AccountNumber;
use crate::canonical::{self, CanonicalWriter};
use crate::crypto::Ed25519Signature;
use crate::error::Result;
use crate::signing;
use crate::types::RecordId;

/// Discriminator written as the first byte of every canonical record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum RecordKind {
    AssetRegistration = 0x02,
    Issuance = 0x03,
    Transfer = 0x04,
    TransferOffer = 0x05,
    OfferResponse = 0x06,
}

impl RecordKind {
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x02 => Some(Self::AssetRegistration),
            0x03 => Some(Self::Issuance),
            0x04 => Some(Self::Transfer),
            0x05 => Some(Self::TransferOffer),
            0x06 => Some(Self::OfferResponse),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AssetRegistration => "asset_registration",
            Self::Issuance => "issuance",
            Self::Transfer => "transfer",
            Self::TransferOffer => "transfer_offer",
            Self::OfferResponse => "offer_response",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record that can be canonicalized and signed.
pub trait Record {
    const KIND: RecordKind;

    /// Bounds checks. Runs before every canonicalization.
    fn validate(&self) -> Result<()>;

    /// Write the fields that follow the record header.
    fn encode_fields(&self, w: &mut CanonicalWriter) -> Result<()>;

    /// Every account number the record refers to.
    fn accounts(&self) -> Vec<AccountNumber>;

    /// Validate, then produce the canonical bytes.
    fn canonical_bytes(&self) -> Result<Vec<u8>> {
        self.validate()?;
        let mut w = CanonicalWriter::new(Self::KIND);
        self.encode_fields(&mut w)?;
        Ok(w.finish())
    }
}

/// A record together with its signer and signature.
///
/// On the wire the signature travels as hex and the signer as its printable
/// account number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signed<R> {
    pub record: R,
    pub signer: AccountNumber,
    pub signature: Ed25519Signature,
}

impl<R: Record> Signed<R> {
    /// Assemble a signed record from received parts. Nothing is checked
    /// until [`Signed::verify`] is called.
    pub fn from_parts(record: R, signer: AccountNumber, signature: Ed25519Signature) -> Self {
        Self {
            record,
            signer,
            signature,
        }
    }

    pub fn record(&self) -> &R {
        &self.record
    }

    pub fn signer(&self) -> &AccountNumber {
        &self.signer
    }

    pub fn signature(&self) -> &Ed25519Signature {
        &self.signature
    }

    pub fn into_record(self) -> R {
        self.record
    }

    pub fn canonical_bytes(&self) -> Result<Vec<u8>> {
        self.record.canonical_bytes()
    }

    /// The transaction id: a hash over canonical bytes and signature.
    pub fn id(&self) -> Result<RecordId> {
        Ok(canonical::record_id(&self.canonical_bytes()?, &self.signature))
    }

    /// Check the signature against the declared signer.
    pub fn verify(&self) -> Result<()> {
        let bytes = self.canonical_bytes()?;
        signing::verify_strict(self.signer.public_key(), &bytes, &self.signature)
    }
}
