//! Payloads submitted to the ledger and the confirmations it returns.
//!
//! The JSON form carries the same field values as the canonical bytes plus
//! the signature hex. It is never what gets signed.

use serde::{Deserialize, Serialize};

use bitmark_core::{
    AccountNumber, AssetId, AssetRegistration, Issuance, OfferId, OfferResponse, RecordId,
    RecordKind, Signed, Transfer, TransferOfferRecord,
};

use crate::error::Result;

/// A signed record ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SignedPayload {
    AssetRegistration(Signed<AssetRegistration>),
    Issuance(Signed<Issuance>),
    Transfer(Signed<Transfer>),
    TransferOffer(Signed<TransferOfferRecord>),
    OfferResponse(OfferResponse),
}

impl SignedPayload {
    pub fn kind(&self) -> RecordKind {
        match self {
            SignedPayload::AssetRegistration(_) => RecordKind::AssetRegistration,
            SignedPayload::Issuance(_) => RecordKind::Issuance,
            SignedPayload::Transfer(_) => RecordKind::Transfer,
            SignedPayload::TransferOffer(_) => RecordKind::TransferOffer,
            SignedPayload::OfferResponse(_) => RecordKind::OfferResponse,
        }
    }

    pub fn signer(&self) -> &AccountNumber {
        match self {
            SignedPayload::AssetRegistration(s) => s.signer(),
            SignedPayload::Issuance(s) => s.signer(),
            SignedPayload::Transfer(s) => s.signer(),
            SignedPayload::TransferOffer(s) => s.signer(),
            SignedPayload::OfferResponse(s) => s.signer(),
        }
    }

    /// Verify the embedded signature against the declared signer.
    pub fn verify(&self) -> bitmark_core::Result<()> {
        match self {
            SignedPayload::AssetRegistration(s) => s.verify(),
            SignedPayload::Issuance(s) => s.verify(),
            SignedPayload::Transfer(s) => s.verify(),
            SignedPayload::TransferOffer(s) => s.verify(),
            SignedPayload::OfferResponse(s) => s.verify(),
        }
    }

    /// The transaction id of the embedded record.
    pub fn id(&self) -> bitmark_core::Result<RecordId> {
        match self {
            SignedPayload::AssetRegistration(s) => s.id(),
            SignedPayload::Issuance(s) => s.id(),
            SignedPayload::Transfer(s) => s.id(),
            SignedPayload::TransferOffer(s) => s.id(),
            SignedPayload::OfferResponse(s) => s.id(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<Signed<AssetRegistration>> for SignedPayload {
    fn from(s: Signed<AssetRegistration>) -> Self {
        SignedPayload::AssetRegistration(s)
    }
}

impl From<Signed<Issuance>> for SignedPayload {
    fn from(s: Signed<Issuance>) -> Self {
        SignedPayload::Issuance(s)
    }
}

impl From<Signed<Transfer>> for SignedPayload {
    fn from(s: Signed<Transfer>) -> Self {
        SignedPayload::Transfer(s)
    }
}

impl From<Signed<TransferOfferRecord>> for SignedPayload {
    fn from(s: Signed<TransferOfferRecord>) -> Self {
        SignedPayload::TransferOffer(s)
    }
}

impl From<OfferResponse> for SignedPayload {
    fn from(s: OfferResponse) -> Self {
        SignedPayload::OfferResponse(s)
    }
}

/// The ledger's acknowledgement of a submission. Opaque to the core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfirmation {
    /// Ids of the entries the submission created: the registration record,
    /// each issued bitmark, or the transfer/response record.
    pub record_ids: Vec<RecordId>,

    /// Set for asset registrations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<AssetId>,

    /// Set for transfer offers and offer responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<OfferId>,

    /// True when the ledger already held an identical record.
    #[serde(default)]
    pub duplicate: bool,
}
