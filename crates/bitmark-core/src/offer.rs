//! Two-signature transfer offers.
//!
//! ```text
//!        accept (to)
//!      ┌────────────► Accepted
//!      │ reject (to)
//! Open ┼────────────► Rejected
//!      │ cancel (from)
//!      └────────────► Cancelled
//! ```
//!
//! All three outcomes are terminal. A [`TransferOffer`] is a local
//! projection of the ledger's view: it is updated only by applying a signed
//! [`OfferResponse`] once the ledger has confirmed it, and can be rebuilt at
//! any time from the offer id, status and signatures alone.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::account::{Account, AccountNumber};
use crate::canonical::CanonicalWriter;
use crate::crypto::Ed25519Signature;
use crate::error::{CoreError, Result, ValidationError};
use crate::record::{Record, RecordKind, Signed};
use crate::types::{OfferId, RecordId};

/// Lifecycle state of an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    Open,
    Accepted,
    Rejected,
    Cancelled,
}

impl OfferStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, OfferStatus::Open)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OfferStatus::Open => "open",
            OfferStatus::Accepted => "accepted",
            OfferStatus::Rejected => "rejected",
            OfferStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A response to an open offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferAction {
    Accept,
    Reject,
    Cancel,
}

impl OfferAction {
    /// The wire string, also the string that is signed.
    pub fn as_str(self) -> &'static str {
        match self {
            OfferAction::Accept => "accept",
            OfferAction::Reject => "reject",
            OfferAction::Cancel => "cancel",
        }
    }

    /// The party whose signature this action needs: the receiver for
    /// accept and reject, the offerer for cancel.
    pub fn required_signer(self, offer: &TransferOffer) -> &AccountNumber {
        match self {
            OfferAction::Accept | OfferAction::Reject => offer.to(),
            OfferAction::Cancel => offer.from(),
        }
    }

    pub fn resulting_status(self) -> OfferStatus {
        match self {
            OfferAction::Accept => OfferStatus::Accepted,
            OfferAction::Reject => OfferStatus::Rejected,
            OfferAction::Cancel => OfferStatus::Cancelled,
        }
    }
}

impl fmt::Display for OfferAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OfferAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "accept" => Ok(OfferAction::Accept),
            "reject" => Ok(OfferAction::Reject),
            "cancel" => Ok(OfferAction::Cancel),
            other => Err(CoreError::InvalidFormat(format!(
                "unknown offer action: {other}"
            ))),
        }
    }
}

/// The signed part of an offer, produced by `from`.
///
/// `previous_record_id` is the bitmark's head when the offer was signed; the
/// offer can only be opened while that record is still unspent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOfferRecord {
    pub bitmark_id: RecordId,
    pub previous_record_id: RecordId,
    pub from: AccountNumber,
    pub to: AccountNumber,
}

impl Record for TransferOfferRecord {
    const KIND: RecordKind = RecordKind::TransferOffer;

    fn validate(&self) -> Result<()> {
        if self.from == self.to {
            return Err(ValidationError::SelfOffer.into());
        }
        Ok(())
    }

    fn encode_fields(&self, w: &mut CanonicalWriter) -> Result<()> {
        w.put_raw(self.bitmark_id.as_bytes());
        w.put_raw(self.previous_record_id.as_bytes());
        w.put_account(&self.from);
        w.put_account(&self.to);
        Ok(())
    }

    fn accounts(&self) -> Vec<AccountNumber> {
        vec![self.from, self.to]
    }
}

/// The signed `{offer_id, action}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferResponseRecord {
    pub offer_id: OfferId,
    pub action: OfferAction,
}

impl Record for OfferResponseRecord {
    const KIND: RecordKind = RecordKind::OfferResponse;

    fn validate(&self) -> Result<()> {
        if self.offer_id.as_str().is_empty() {
            return Err(ValidationError::MissingOfferId.into());
        }
        Ok(())
    }

    fn encode_fields(&self, w: &mut CanonicalWriter) -> Result<()> {
        w.put_str(self.offer_id.as_str())?;
        w.put_str(self.action.as_str())?;
        Ok(())
    }

    fn accounts(&self) -> Vec<AccountNumber> {
        Vec::new()
    }
}

pub type OfferResponse = Signed<OfferResponseRecord>;

/// Local projection of a transfer offer.
///
/// Decoding goes through the same checks as [`TransferOffer::reconstruct`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TransferOfferWire")]
pub struct TransferOffer {
    id: Option<OfferId>,
    offer: Signed<TransferOfferRecord>,
    status: OfferStatus,
    response: Option<OfferResponse>,
}

#[derive(Deserialize)]
struct TransferOfferWire {
    id: Option<OfferId>,
    offer: Signed<TransferOfferRecord>,
    status: OfferStatus,
    response: Option<OfferResponse>,
}

impl TryFrom<TransferOfferWire> for TransferOffer {
    type Error = CoreError;

    fn try_from(wire: TransferOfferWire) -> Result<Self> {
        if wire.offer.signer != wire.offer.record.from {
            return Err(CoreError::SignerMismatch {
                expected: wire.offer.record.from.to_string(),
                actual: wire.offer.signer.to_string(),
            });
        }

        match wire.id {
            Some(id) => Self::reconstruct(
                id,
                wire.offer.record,
                wire.status,
                wire.offer.signature,
                wire.response,
            ),
            // Not yet submitted: only a freshly signed offer is possible.
            None => {
                if wire.status != OfferStatus::Open || wire.response.is_some() {
                    return Err(CoreError::InvalidFormat(
                        "offer without an id must be open with no response".into(),
                    ));
                }
                wire.offer.verify()?;
                Ok(Self {
                    id: None,
                    offer: wire.offer,
                    status: OfferStatus::Open,
                    response: None,
                })
            }
        }
    }
}

impl TransferOffer {
    /// Sign a new offer of `bitmark_id`, currently at `previous_record_id`,
    /// from `sender` to `to`.
    ///
    /// The offer starts `Open` with no id; the ledger assigns one on
    /// submission.
    pub fn create(
        sender: &Account,
        bitmark_id: RecordId,
        previous_record_id: RecordId,
        to: AccountNumber,
    ) -> Result<Self> {
        let offer = sender.sign_record(TransferOfferRecord {
            bitmark_id,
            previous_record_id,
            from: *sender.account_number(),
            to,
        })?;
        Ok(Self {
            id: None,
            offer,
            status: OfferStatus::Open,
            response: None,
        })
    }

    /// An open offer as observed by the receiver.
    pub fn received(id: OfferId, offer: Signed<TransferOfferRecord>) -> Result<Self> {
        if offer.signer != offer.record.from {
            return Err(CoreError::SignerMismatch {
                expected: offer.record.from.to_string(),
                actual: offer.signer.to_string(),
            });
        }
        Self::reconstruct(id, offer.record, OfferStatus::Open, offer.signature, None)
    }

    /// Rebuild an offer from its id, status and signatures.
    ///
    /// Verifies the offer signature, and for a terminal status, that the
    /// response is present, names this offer, yields `status`, and is
    /// validly signed by the right party.
    pub fn reconstruct(
        id: OfferId,
        record: TransferOfferRecord,
        status: OfferStatus,
        offer_signature: Ed25519Signature,
        response: Option<OfferResponse>,
    ) -> Result<Self> {
        let from = record.from;
        let offer = Signed::from_parts(record, from, offer_signature);
        offer.verify()?;

        let mut rebuilt = Self {
            id: Some(id),
            offer,
            status: OfferStatus::Open,
            response: None,
        };

        match (status, response) {
            (OfferStatus::Open, None) => {}
            (OfferStatus::Open, Some(_)) => {
                return Err(CoreError::InvalidFormat(
                    "open offer cannot carry a response".into(),
                ));
            }
            (terminal, Some(response)) => {
                if response.record.action.resulting_status() != terminal {
                    return Err(CoreError::InvalidFormat(format!(
                        "response action {} does not produce status {}",
                        response.record.action, terminal
                    )));
                }
                rebuilt.apply(response)?;
            }
            (terminal, None) => {
                return Err(CoreError::InvalidFormat(format!(
                    "{terminal} offer is missing its response"
                )));
            }
        }

        Ok(rebuilt)
    }

    pub fn id(&self) -> Option<&OfferId> {
        self.id.as_ref()
    }

    pub fn bitmark_id(&self) -> &RecordId {
        &self.offer.record.bitmark_id
    }

    /// The head this offer spends.
    pub fn previous_record_id(&self) -> &RecordId {
        &self.offer.record.previous_record_id
    }

    pub fn from(&self) -> &AccountNumber {
        &self.offer.record.from
    }

    pub fn to(&self) -> &AccountNumber {
        &self.offer.record.to
    }

    pub fn status(&self) -> OfferStatus {
        self.status
    }

    pub fn offer_signature(&self) -> &Ed25519Signature {
        &self.offer.signature
    }

    /// The signed offer record, as submitted to the ledger.
    pub fn signed_offer(&self) -> &Signed<TransferOfferRecord> {
        &self.offer
    }

    pub fn response(&self) -> Option<&OfferResponse> {
        self.response.as_ref()
    }

    pub fn response_signature(&self) -> Option<&Ed25519Signature> {
        self.response.as_ref().map(|r| &r.signature)
    }

    /// Record the ledger-assigned id. Assigning the same id again is a no-op.
    pub fn assign_id(&mut self, id: OfferId) -> Result<()> {
        match &self.id {
            None => {
                self.id = Some(id);
                Ok(())
            }
            Some(existing) if *existing == id => Ok(()),
            Some(existing) => Err(ValidationError::OfferIdMismatch {
                expected: existing.to_string(),
                actual: id.to_string(),
            }
            .into()),
        }
    }

    /// Sign a response to this offer without changing it.
    ///
    /// Checks, in order: the offer is `Open`, it has an id, and `responder`
    /// is the party `action` requires.
    pub fn respond(&self, responder: &Account, action: OfferAction) -> Result<OfferResponse> {
        if self.status != OfferStatus::Open {
            return Err(CoreError::InvalidStateTransition {
                from: self.status,
                action,
            });
        }

        let offer_id = self
            .id
            .clone()
            .ok_or(ValidationError::MissingOfferId)?;

        let expected = action.required_signer(self);
        if responder.account_number() != expected {
            return Err(CoreError::SignerMismatch {
                expected: expected.to_string(),
                actual: responder.account_number().to_string(),
            });
        }

        responder.sign_record(OfferResponseRecord { offer_id, action })
    }

    /// Apply a confirmed response: the single-writer transition out of `Open`.
    ///
    /// On any error the offer is left unchanged.
    pub fn apply(&mut self, response: OfferResponse) -> Result<OfferStatus> {
        let action = response.record.action;

        // 1. Only open offers transition
        if self.status != OfferStatus::Open {
            return Err(CoreError::InvalidStateTransition {
                from: self.status,
                action,
            });
        }

        // 2. The response must name this offer
        let id = self.id.as_ref().ok_or(ValidationError::MissingOfferId)?;
        if *id != response.record.offer_id {
            return Err(ValidationError::OfferIdMismatch {
                expected: id.to_string(),
                actual: response.record.offer_id.to_string(),
            }
            .into());
        }

        // 3. Signed by the party the action requires
        let expected = action.required_signer(self);
        if response.signer != *expected {
            return Err(CoreError::SignerMismatch {
                expected: expected.to_string(),
                actual: response.signer.to_string(),
            });
        }

        // 4. And the signature holds
        response.verify()?;

        self.status = action.resulting_status();
        self.response = Some(response);
        Ok(self.status)
    }
}
