//! Transport abstraction for ledger submission.
//!
//! A transport delivers signed payloads to the ledger and answers offer
//! status queries. Implementations may use HTTP or anything else; retries,
//! backoff and cancellation belong to the implementation.

use async_trait::async_trait;

use bitmark_core::{OfferId, OfferStatus};

use crate::error::Result;
use crate::messages::{LedgerConfirmation, SignedPayload};

/// The ledger-facing capability the SDK orchestrates against.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Submit a signed record.
    async fn submit(&self, payload: SignedPayload) -> Result<LedgerConfirmation>;

    /// Current status of a transfer offer.
    async fn query_offer_status(&self, offer_id: &OfferId) -> Result<OfferStatus>;
}

/// An in-memory ledger for testing.
///
/// Enforces just enough of the ledger's rules to exercise the client:
/// signatures, asset dedup and conflicts, bitmark ownership and heads, and
/// the offer state machine.
pub mod memory {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;
    use tokio::sync::{Mutex, RwLock};

    use bitmark_core::{
        AccountNumber, AssetId, AssetRegistration, CoreError, Fingerprint, Issuance, Metadata,
        OfferResponse, RecordId, Signed, Transfer, TransferOffer, TransferOfferRecord,
    };

    use crate::error::TransportError;

    /// A registered asset.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct AssetEntry {
        pub asset_id: AssetId,
        pub name: String,
        pub metadata: Metadata,
        pub registrant: AccountNumber,
    }

    /// Ledger view of one bitmark.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct BitmarkEntry {
        pub asset_id: AssetId,
        pub owner: AccountNumber,
        /// The record a transfer must spend next.
        pub head: RecordId,
        /// The open offer on this bitmark, if any.
        pub offer: Option<OfferId>,
    }

    #[derive(Default)]
    struct LedgerState {
        assets: HashMap<Fingerprint, AssetEntry>,
        fingerprints: HashMap<AssetId, Fingerprint>,
        bitmarks: HashMap<RecordId, BitmarkEntry>,
        heads: HashMap<RecordId, RecordId>,
        issuances: HashMap<RecordId, Vec<RecordId>>,
        offers: HashMap<OfferId, TransferOffer>,
        offer_records: HashSet<RecordId>,
        next_offer: u64,
    }

    /// Shared in-memory ledger. Clones share state.
    #[derive(Clone, Default)]
    pub struct MemoryLedger {
        state: Arc<RwLock<LedgerState>>,
        fail_next: Arc<Mutex<Option<TransportError>>>,
    }

    impl MemoryLedger {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make the next call fail with `error` before touching any state.
        pub async fn fail_next(&self, error: TransportError) {
            *self.fail_next.lock().await = Some(error);
        }

        pub async fn asset(&self, asset_id: &AssetId) -> Option<AssetEntry> {
            let state = self.state.read().await;
            let fingerprint = state.fingerprints.get(asset_id)?;
            state.assets.get(fingerprint).cloned()
        }

        pub async fn bitmark(&self, bitmark_id: &RecordId) -> Option<BitmarkEntry> {
            self.state.read().await.bitmarks.get(bitmark_id).cloned()
        }

        pub async fn owner_of(&self, bitmark_id: &RecordId) -> Option<AccountNumber> {
            self.bitmark(bitmark_id).await.map(|b| b.owner)
        }

        pub async fn offer(&self, offer_id: &OfferId) -> Option<TransferOffer> {
            self.state.read().await.offers.get(offer_id).cloned()
        }

        async fn take_failure(&self) -> Result<()> {
            match self.fail_next.lock().await.take() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl Transport for MemoryLedger {
        async fn submit(&self, payload: SignedPayload) -> Result<LedgerConfirmation> {
            self.take_failure().await?;

            tracing::debug!(kind = %payload.kind(), signer = %payload.signer(), "ledger received record");
            payload.verify().map_err(rejected)?;

            let mut state = self.state.write().await;
            let result = match payload {
                SignedPayload::AssetRegistration(s) => state.register(s),
                SignedPayload::Issuance(s) => state.issue(s),
                SignedPayload::Transfer(s) => state.transfer(s),
                SignedPayload::TransferOffer(s) => state.open_offer(s),
                SignedPayload::OfferResponse(s) => state.respond(s),
            };

            if let Err(e) = &result {
                tracing::warn!(error = %e, "ledger refused record");
            }
            result
        }

        async fn query_offer_status(&self, offer_id: &OfferId) -> Result<OfferStatus> {
            self.take_failure().await?;
            let state = self.state.read().await;
            state
                .offers
                .get(offer_id)
                .map(TransferOffer::status)
                .ok_or_else(|| TransportError::NotFound(format!("offer {offer_id}")))
        }
    }

    impl LedgerState {
        fn register(&mut self, signed: Signed<AssetRegistration>) -> Result<LedgerConfirmation> {
            let record_id = signed.id().map_err(rejected)?;
            let record = signed.into_record();
            let asset_id = record.asset_id().map_err(rejected)?;

            // 1. Same fingerprint: identical content dedups, anything else conflicts
            if let Some(existing) = self.assets.get(&record.fingerprint) {
                if existing.asset_id != asset_id {
                    return Err(TransportError::Conflict(format!(
                        "fingerprint already registered as asset {}",
                        existing.asset_id
                    )));
                }
                return Ok(LedgerConfirmation {
                    record_ids: vec![record_id],
                    asset_id: Some(asset_id),
                    offer_id: None,
                    duplicate: true,
                });
            }

            // 2. New asset
            self.fingerprints.insert(asset_id, record.fingerprint);
            self.assets.insert(
                record.fingerprint,
                AssetEntry {
                    asset_id,
                    name: record.name,
                    metadata: record.metadata,
                    registrant: record.registrant,
                },
            );
            tracing::info!(asset_id = %asset_id, "asset registered");

            Ok(LedgerConfirmation {
                record_ids: vec![record_id],
                asset_id: Some(asset_id),
                offer_id: None,
                duplicate: false,
            })
        }

        fn issue(&mut self, signed: Signed<Issuance>) -> Result<LedgerConfirmation> {
            let record_id = signed.id().map_err(rejected)?;
            let asset_id = signed.record.asset_id;

            if !self.fingerprints.contains_key(&asset_id) {
                return Err(TransportError::NotFound(format!("asset {asset_id}")));
            }
            if signed.signer != signed.record.owner {
                return Err(TransportError::Unauthorized(
                    "issuance must be signed by its owner".into(),
                ));
            }
            if let Some(existing) = self.issuances.get(&record_id) {
                return Ok(LedgerConfirmation {
                    record_ids: existing.clone(),
                    duplicate: true,
                    ..Default::default()
                });
            }

            let bitmark_ids = signed.bitmark_ids().map_err(rejected)?;
            for bitmark_id in &bitmark_ids {
                self.bitmarks.insert(
                    *bitmark_id,
                    BitmarkEntry {
                        asset_id,
                        owner: signed.record.owner,
                        head: *bitmark_id,
                        offer: None,
                    },
                );
                self.heads.insert(*bitmark_id, *bitmark_id);
            }
            self.issuances.insert(record_id, bitmark_ids.clone());
            tracing::info!(asset_id = %asset_id, quantity = bitmark_ids.len(), "bitmarks issued");

            Ok(LedgerConfirmation {
                record_ids: bitmark_ids,
                ..Default::default()
            })
        }

        fn transfer(&mut self, signed: Signed<Transfer>) -> Result<LedgerConfirmation> {
            let record_id = signed.id().map_err(rejected)?;
            let previous = signed.record.previous_record_id;

            let bitmark_id = *self
                .heads
                .get(&previous)
                .ok_or_else(|| TransportError::NotFound(format!("head record {previous}")))?;
            let bitmark = self
                .bitmarks
                .get_mut(&bitmark_id)
                .ok_or_else(|| TransportError::NotFound(format!("bitmark {bitmark_id}")))?;

            if bitmark.head != previous {
                return Err(TransportError::Conflict(format!(
                    "record {previous} has already been spent"
                )));
            }
            if bitmark.owner != signed.signer {
                return Err(TransportError::Unauthorized(
                    "transfer must be signed by the current owner".into(),
                ));
            }
            if let Some(offer) = &bitmark.offer {
                return Err(TransportError::Conflict(format!(
                    "bitmark has an open offer {offer}"
                )));
            }

            bitmark.owner = signed.record.new_owner;
            bitmark.head = record_id;
            self.heads.insert(record_id, bitmark_id);
            tracing::info!(bitmark_id = %bitmark_id, "bitmark transferred");

            Ok(LedgerConfirmation {
                record_ids: vec![record_id],
                ..Default::default()
            })
        }

        fn open_offer(&mut self, signed: Signed<TransferOfferRecord>) -> Result<LedgerConfirmation> {
            let record_id = signed.id().map_err(rejected)?;
            let bitmark_id = signed.record.bitmark_id;

            let bitmark = self
                .bitmarks
                .get(&bitmark_id)
                .ok_or_else(|| TransportError::NotFound(format!("bitmark {bitmark_id}")))?;
            let previous = signed.record.previous_record_id;
            if bitmark.head != previous {
                return Err(TransportError::Conflict(format!(
                    "record {previous} has already been spent"
                )));
            }
            if bitmark.owner != signed.record.from || signed.signer != signed.record.from {
                return Err(TransportError::Unauthorized(
                    "offer must be made and signed by the current owner".into(),
                ));
            }
            if let Some(offer) = &bitmark.offer {
                return Err(TransportError::Conflict(format!(
                    "bitmark already has open offer {offer}"
                )));
            }
            if self.offer_records.contains(&record_id) {
                return Err(TransportError::Conflict(format!(
                    "offer record {record_id} was already submitted"
                )));
            }

            self.next_offer += 1;
            let offer_id = OfferId::new(format!("offer-{:06}", self.next_offer));
            let offer = TransferOffer::received(offer_id.clone(), signed).map_err(rejected)?;
            self.offers.insert(offer_id.clone(), offer);
            self.offer_records.insert(record_id);
            if let Some(bitmark) = self.bitmarks.get_mut(&bitmark_id) {
                bitmark.offer = Some(offer_id.clone());
            }
            tracing::info!(offer_id = %offer_id, bitmark_id = %bitmark_id, "offer opened");

            Ok(LedgerConfirmation {
                record_ids: vec![record_id],
                offer_id: Some(offer_id),
                ..Default::default()
            })
        }

        fn respond(&mut self, response: OfferResponse) -> Result<LedgerConfirmation> {
            let record_id = response.id().map_err(rejected)?;
            let offer_id = response.record.offer_id.clone();

            let offer = self
                .offers
                .get_mut(&offer_id)
                .ok_or_else(|| TransportError::NotFound(format!("offer {offer_id}")))?;
            let status = offer.apply(response).map_err(refused_transition)?;
            let bitmark_id = *offer.bitmark_id();
            let receiver = *offer.to();

            if let Some(bitmark) = self.bitmarks.get_mut(&bitmark_id) {
                bitmark.offer = None;
                if status == OfferStatus::Accepted {
                    bitmark.owner = receiver;
                    bitmark.head = record_id;
                    self.heads.insert(record_id, bitmark_id);
                }
            }
            tracing::info!(offer_id = %offer_id, status = %status, "offer closed");

            Ok(LedgerConfirmation {
                record_ids: vec![record_id],
                offer_id: Some(offer_id),
                ..Default::default()
            })
        }
    }

    fn rejected(e: CoreError) -> TransportError {
        TransportError::Rejected(e.to_string())
    }

    fn refused_transition(e: CoreError) -> TransportError {
        match e {
            CoreError::InvalidStateTransition { .. } => TransportError::Conflict(e.to_string()),
            CoreError::SignerMismatch { .. } => TransportError::Unauthorized(e.to_string()),
            other => rejected(other),
        }
    }
}
