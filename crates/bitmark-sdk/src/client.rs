//! The Client: orchestration of signing and submission.
//!
//! Every operation checks networks first, signs locally, submits through the
//! [`Transport`], and only then touches local state. A failed submission
//! leaves the caller's values exactly as they were.

use tracing::{debug, info, warn};

use bitmark_core::{
    Account, AccountNumber, AssetId, AssetRegistrationParams, CoreError, IssuanceParams, Network,
    OfferAction, OfferStatus, RecordId, TransferOffer, TransferParams, ValidationError,
};
use bitmark_ledger::{LedgerConfirmation, SignedPayload, Transport};

use crate::config::SdkConfig;
use crate::error::{Result, SdkError};

/// Outcome of an asset registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredAsset {
    pub asset_id: AssetId,
    /// Id of the signed registration record.
    pub record_id: RecordId,
    /// True when the ledger already held this registration.
    pub duplicate: bool,
}

/// Client bound to one network and one transport.
pub struct Client<T: Transport> {
    config: SdkConfig,
    transport: T,
}

impl<T: Transport> Client<T> {
    pub fn new(config: SdkConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn network(&self) -> Network {
        self.config.network
    }

    /// A fresh random account on the configured network.
    pub fn new_account(&self) -> Account {
        Account::new(self.config.network)
    }

    fn ensure_network(&self, account: &AccountNumber) -> Result<()> {
        account.ensure_network(self.config.network)?;
        Ok(())
    }

    async fn submit(&self, payload: SignedPayload) -> Result<LedgerConfirmation> {
        let kind = payload.kind();
        debug!(%kind, signer = %payload.signer(), "submitting record");

        match self.transport.submit(payload).await {
            Ok(confirmation) => {
                debug!(%kind, records = confirmation.record_ids.len(), "record confirmed");
                Ok(confirmation)
            }
            Err(e) => {
                warn!(%kind, error = %e, "submission failed");
                Err(e.into())
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Assets and Bitmarks
    // ─────────────────────────────────────────────────────────────────────────

    /// Register an asset.
    ///
    /// Registering an identical asset again succeeds with `duplicate` set.
    pub async fn register_asset(
        &self,
        registrant: &Account,
        params: &AssetRegistrationParams,
    ) -> Result<RegisteredAsset> {
        self.ensure_network(registrant.account_number())?;

        let signed = params.sign(registrant)?;
        let asset_id = signed.record.asset_id()?;
        let record_id = signed.id()?;

        let confirmation = self.submit(signed.into()).await?;
        if let Some(confirmed) = confirmation.asset_id {
            if confirmed != asset_id {
                return Err(SdkError::UnexpectedResponse(format!(
                    "ledger confirmed asset {} for local asset {}",
                    confirmed.to_hex(),
                    asset_id.to_hex()
                )));
            }
        }

        info!(
            asset_id = %asset_id.to_hex(),
            duplicate = confirmation.duplicate,
            "asset registered"
        );
        Ok(RegisteredAsset {
            asset_id,
            record_id,
            duplicate: confirmation.duplicate,
        })
    }

    /// Issue bitmarks of a registered asset to `issuer`.
    ///
    /// Returns one bitmark id per nonce, in nonce order.
    pub async fn issue(&self, issuer: &Account, params: &IssuanceParams) -> Result<Vec<RecordId>> {
        self.ensure_network(issuer.account_number())?;

        let signed = params.sign(issuer)?;
        let bitmark_ids = signed.bitmark_ids()?;

        let confirmation = self.submit(signed.into()).await?;
        if !confirmation.record_ids.is_empty() && confirmation.record_ids != bitmark_ids {
            return Err(SdkError::UnexpectedResponse(
                "ledger confirmed different bitmark ids".into(),
            ));
        }

        info!(count = bitmark_ids.len(), "bitmarks issued");
        Ok(bitmark_ids)
    }

    /// Transfer a bitmark directly, without an offer.
    ///
    /// Returns the id of the transfer record, the bitmark's new head.
    pub async fn transfer(&self, owner: &Account, params: &TransferParams) -> Result<RecordId> {
        self.ensure_network(owner.account_number())?;
        self.ensure_network(params.receiver())?;

        let signed = params.sign(owner)?;
        let record_id = signed.id()?;

        self.submit(signed.into()).await?;

        info!(
            record_id = %record_id.to_hex(),
            receiver = %params.receiver(),
            "bitmark transferred"
        );
        Ok(record_id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transfer Offers
    // ─────────────────────────────────────────────────────────────────────────

    /// Offer `bitmark_id`, whose current head is `head`, to `receiver`.
    ///
    /// For a bitmark that has never moved, `head` is the bitmark id itself.
    /// The returned offer is `Open` and carries the ledger-assigned id.
    pub async fn offer(
        &self,
        sender: &Account,
        bitmark_id: RecordId,
        head: RecordId,
        receiver: AccountNumber,
    ) -> Result<TransferOffer> {
        self.ensure_network(sender.account_number())?;
        self.ensure_network(&receiver)?;

        let mut offer = TransferOffer::create(sender, bitmark_id, head, receiver)?;

        let confirmation = self.submit(offer.signed_offer().clone().into()).await?;
        let offer_id = confirmation.offer_id.ok_or_else(|| {
            SdkError::UnexpectedResponse("confirmation for an offer carries no offer id".into())
        })?;
        offer.assign_id(offer_id)?;

        info!(offer_id = ?offer.id(), bitmark_id = %bitmark_id.to_hex(), "offer opened");
        Ok(offer)
    }

    /// Accept, reject or cancel an open offer.
    ///
    /// The offer transitions only after the ledger confirms the response.
    pub async fn respond_to_offer(
        &self,
        responder: &Account,
        offer: &mut TransferOffer,
        action: OfferAction,
    ) -> Result<OfferStatus> {
        self.ensure_network(responder.account_number())?;

        let response = offer.respond(responder, action)?;
        self.submit(response.clone().into()).await?;
        let status = offer.apply(response)?;

        info!(offer_id = ?offer.id(), %action, %status, "offer resolved");
        Ok(status)
    }

    /// Withdraw an open offer. Only the sender may cancel.
    pub async fn cancel_offer(
        &self,
        sender: &Account,
        offer: &mut TransferOffer,
    ) -> Result<OfferStatus> {
        self.respond_to_offer(sender, offer, OfferAction::Cancel)
            .await
    }

    /// Ask the ledger for the offer's current status.
    ///
    /// The local offer is not modified: a terminal status can only be
    /// applied together with its signed response.
    pub async fn refresh_offer(&self, offer: &TransferOffer) -> Result<OfferStatus> {
        let offer_id = offer
            .id()
            .ok_or(CoreError::Validation(ValidationError::MissingOfferId))?;

        let status = self.transport.query_offer_status(offer_id).await?;
        if status != offer.status() {
            warn!(
                %offer_id,
                local = %offer.status(),
                ledger = %status,
                "offer status differs from ledger"
            );
        }
        Ok(status)
    }
}
