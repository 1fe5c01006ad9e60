//! End-to-end flows through the client against the in-memory ledger.

use bitmark_sdk::core::{
    Account, AssetRegistrationParams, CoreError, IssuanceParams, Metadata, Network, OfferAction,
    OfferStatus, Seed, TransferParams, ValidationError,
};
use bitmark_sdk::ledger::{MemoryLedger, Transport, TransportError};
use bitmark_sdk::{Client, SdkConfig, SdkError};
use bitmark_testkit::fixtures::TestFixture;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn client_for(fixture: &TestFixture) -> Client<MemoryLedger> {
    init_tracing();
    Client::new(SdkConfig::new(fixture.network), fixture.ledger.clone())
}

// ─────────────────────────────────────────────────────────────────────────────
// Accounts
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_phrase_recovery_keeps_account() {
    let seed = Seed::generate(Network::Testnet);
    let original = Account::from_seed(seed.clone());

    let phrase = original.recovery_phrase();
    assert_eq!(phrase.len(), 12);

    let recovered = Account::from_recovery_phrase(&phrase.join(" ")).unwrap();
    assert_eq!(recovered.seed(), &seed);
    assert_eq!(recovered.account_number(), original.account_number());

    let from_string = Account::from_seed_str(&original.seed_string()).unwrap();
    assert_eq!(from_string.account_number(), original.account_number());
}

#[test]
fn test_distinct_seeds_distinct_accounts() {
    let a = Account::new(Network::Livenet);
    let b = Account::new(Network::Livenet);
    assert_ne!(a.account_number(), b.account_number());
}

// ─────────────────────────────────────────────────────────────────────────────
// Assets and Issuance
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_register_dedup_and_conflict() {
    let fixture = TestFixture::new();
    let client = client_for(&fixture);

    let params = AssetRegistrationParams::new("name", Metadata::new()).fingerprint_bytes(b"F");
    let first = client.register_asset(&fixture.alice, &params).await.unwrap();
    assert!(!first.duplicate);

    let again = client.register_asset(&fixture.alice, &params).await.unwrap();
    assert!(again.duplicate);
    assert_eq!(again.asset_id, first.asset_id);

    // The core signs the renamed registration; only the ledger refuses it.
    let renamed =
        AssetRegistrationParams::new("other name", Metadata::new()).fingerprint_bytes(b"F");
    let signed = renamed.sign(&fixture.alice).unwrap();
    signed.verify().unwrap();
    assert_ne!(signed.record.asset_id().unwrap(), first.asset_id);

    let result = client.register_asset(&fixture.alice, &renamed).await;
    assert!(matches!(
        result,
        Err(SdkError::Transport(TransportError::Conflict(_)))
    ));
}

#[tokio::test]
async fn test_issue_ten() {
    let fixture = TestFixture::new();
    let client = client_for(&fixture);

    let params = fixture.asset_params("edition");
    let asset = client.register_asset(&fixture.alice, &params).await.unwrap();

    let ids = client
        .issue(&fixture.alice, &IssuanceParams::new(asset.asset_id, 10))
        .await
        .unwrap();

    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 10);

    for id in &ids {
        let entry = fixture.ledger.bitmark(id).await.unwrap();
        assert_eq!(entry.asset_id, asset.asset_id);
        assert_eq!(entry.owner, *fixture.alice.account_number());
    }
}

#[tokio::test]
async fn test_issue_quantity_bounds() {
    let fixture = TestFixture::new();
    let client = client_for(&fixture);
    let asset = client
        .register_asset(&fixture.alice, &fixture.asset_params("bounds"))
        .await
        .unwrap();

    for quantity in [0, 101] {
        let result = client
            .issue(&fixture.alice, &IssuanceParams::new(asset.asset_id, quantity))
            .await;
        assert!(matches!(
            result,
            Err(SdkError::Core(CoreError::Validation(
                ValidationError::QuantityOutOfRange(q)
            ))) if q == quantity
        ));
    }

    for quantity in [1, 100] {
        let ids = client
            .issue(&fixture.alice, &IssuanceParams::new(asset.asset_id, quantity))
            .await
            .unwrap();
        assert_eq!(ids.len(), quantity);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transfers
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_direct_transfer_chain() {
    let fixture = TestFixture::new();
    let client = client_for(&fixture);
    let (_, ids) = fixture.seed_bitmarks(&fixture.alice, "chain", 1).await;
    let bitmark = ids[0];

    let to_bob = TransferParams::new(*fixture.bob.account_number()).from_head(bitmark);
    let head = client.transfer(&fixture.alice, &to_bob).await.unwrap();
    assert_eq!(
        fixture.ledger.owner_of(&bitmark).await,
        Some(*fixture.bob.account_number())
    );

    // Alice no longer owns it
    let again = TransferParams::new(*fixture.carol.account_number()).from_head(bitmark);
    assert!(client.transfer(&fixture.alice, &again).await.is_err());

    let to_carol = TransferParams::new(*fixture.carol.account_number()).from_head(head);
    client.transfer(&fixture.bob, &to_carol).await.unwrap();
    assert_eq!(
        fixture.ledger.owner_of(&bitmark).await,
        Some(*fixture.carol.account_number())
    );
}

#[tokio::test]
async fn test_network_mismatch_before_transport() {
    let fixture = TestFixture::new();
    let client = client_for(&fixture);
    let (_, ids) = fixture.seed_bitmarks(&fixture.alice, "networks", 1).await;

    fixture
        .ledger
        .fail_next(TransportError::Unavailable("must not be reached".into()))
        .await;

    let livenet_receiver = Account::new(Network::Livenet);
    let params = TransferParams::new(*livenet_receiver.account_number()).from_head(ids[0]);
    let result = client.transfer(&fixture.alice, &params).await;
    assert!(matches!(
        result,
        Err(SdkError::Core(CoreError::NetworkMismatch {
            expected: Network::Testnet,
            actual: Network::Livenet,
        }))
    ));

    let result = client
        .offer(&fixture.alice, ids[0], ids[0], *livenet_receiver.account_number())
        .await;
    assert!(matches!(
        result,
        Err(SdkError::Core(CoreError::NetworkMismatch { .. }))
    ));

    // The injected failure was never consumed
    let params = TransferParams::new(*fixture.bob.account_number()).from_head(ids[0]);
    let result = client.transfer(&fixture.alice, &params).await;
    assert!(matches!(result, Err(e) if e.is_retryable()));
}

// ─────────────────────────────────────────────────────────────────────────────
// Transfer Offers
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_offer_accept_is_final() {
    let fixture = TestFixture::new();
    let client = client_for(&fixture);
    let (_, ids) = fixture.seed_bitmarks(&fixture.alice, "offered", 1).await;
    let bitmark = ids[0];

    let mut offer = client
        .offer(&fixture.alice, bitmark, bitmark, *fixture.bob.account_number())
        .await
        .unwrap();
    assert_eq!(offer.status(), OfferStatus::Open);
    assert!(offer.id().is_some());

    let status = client
        .respond_to_offer(&fixture.bob, &mut offer, OfferAction::Accept)
        .await
        .unwrap();
    assert_eq!(status, OfferStatus::Accepted);
    assert_eq!(
        fixture.ledger.owner_of(&bitmark).await,
        Some(*fixture.bob.account_number())
    );
    assert_eq!(client.refresh_offer(&offer).await.unwrap(), OfferStatus::Accepted);

    for (who, action) in [
        (&fixture.bob, OfferAction::Accept),
        (&fixture.bob, OfferAction::Reject),
        (&fixture.alice, OfferAction::Cancel),
    ] {
        let result = client.respond_to_offer(who, &mut offer, action).await;
        assert!(matches!(
            result,
            Err(SdkError::Core(CoreError::InvalidStateTransition {
                from: OfferStatus::Accepted,
                ..
            }))
        ));
    }
    assert_eq!(offer.status(), OfferStatus::Accepted);

    // The accepted response is the new head
    let head = offer.response().unwrap().id().unwrap();
    let onward = TransferParams::new(*fixture.carol.account_number()).from_head(head);
    client.transfer(&fixture.bob, &onward).await.unwrap();
}

#[tokio::test]
async fn test_offer_is_bound_to_its_head() {
    let fixture = TestFixture::new();
    let client = client_for(&fixture);
    let (_, ids) = fixture.seed_bitmarks(&fixture.alice, "bound", 1).await;
    let bitmark = ids[0];

    let mut offer = client
        .offer(&fixture.alice, bitmark, bitmark, *fixture.bob.account_number())
        .await
        .unwrap();
    client
        .respond_to_offer(&fixture.bob, &mut offer, OfferAction::Accept)
        .await
        .unwrap();

    // Bob hands the bitmark back.
    let head = offer.response().unwrap().id().unwrap();
    let back = TransferParams::new(*fixture.alice.account_number()).from_head(head);
    let head = client.transfer(&fixture.bob, &back).await.unwrap();

    // Alice's original offer cannot be opened a second time.
    let result = fixture
        .ledger
        .submit(offer.signed_offer().clone().into())
        .await;
    assert!(matches!(result, Err(TransportError::Conflict(_))));
    assert_eq!(
        fixture.ledger.owner_of(&bitmark).await,
        Some(*fixture.alice.account_number())
    );

    // An offer stale by one transfer is refused too.
    let stale = client
        .offer(&fixture.alice, bitmark, bitmark, *fixture.carol.account_number())
        .await;
    assert!(matches!(
        stale,
        Err(SdkError::Transport(TransportError::Conflict(_)))
    ));

    // Offering from the current head works.
    let fresh = client
        .offer(&fixture.alice, bitmark, head, *fixture.carol.account_number())
        .await
        .unwrap();
    assert_eq!(fresh.status(), OfferStatus::Open);
}

#[tokio::test]
async fn test_offer_to_self_rejected() {
    let fixture = TestFixture::new();
    let client = client_for(&fixture);
    let (_, ids) = fixture.seed_bitmarks(&fixture.alice, "self", 1).await;

    let result = client
        .offer(&fixture.alice, ids[0], ids[0], *fixture.alice.account_number())
        .await;
    assert!(matches!(
        result,
        Err(SdkError::Core(CoreError::Validation(ValidationError::SelfOffer)))
    ));
    assert!(fixture.ledger.bitmark(&ids[0]).await.unwrap().offer.is_none());
}

#[tokio::test]
async fn test_rejected_offer_cannot_be_accepted() {
    let fixture = TestFixture::new();
    let client = client_for(&fixture);
    let (_, ids) = fixture.seed_bitmarks(&fixture.alice, "rejected", 1).await;

    let mut offer = client
        .offer(&fixture.alice, ids[0], ids[0], *fixture.bob.account_number())
        .await
        .unwrap();
    client
        .respond_to_offer(&fixture.bob, &mut offer, OfferAction::Reject)
        .await
        .unwrap();

    let result = client
        .respond_to_offer(&fixture.bob, &mut offer, OfferAction::Accept)
        .await;
    assert!(matches!(
        result,
        Err(SdkError::Core(CoreError::InvalidStateTransition {
            from: OfferStatus::Rejected,
            action: OfferAction::Accept,
        }))
    ));
    assert_eq!(
        fixture.ledger.owner_of(&ids[0]).await,
        Some(*fixture.alice.account_number())
    );
}

#[tokio::test]
async fn test_cancel_by_receiver_is_signer_mismatch() {
    let fixture = TestFixture::new();
    let client = client_for(&fixture);
    let (_, ids) = fixture.seed_bitmarks(&fixture.alice, "cancel", 1).await;

    let mut offer = client
        .offer(&fixture.alice, ids[0], ids[0], *fixture.bob.account_number())
        .await
        .unwrap();

    let result = client.cancel_offer(&fixture.bob, &mut offer).await;
    assert!(matches!(
        result,
        Err(SdkError::Core(CoreError::SignerMismatch { .. }))
    ));
    assert_eq!(offer.status(), OfferStatus::Open);

    let status = client.cancel_offer(&fixture.alice, &mut offer).await.unwrap();
    assert_eq!(status, OfferStatus::Cancelled);
}

#[tokio::test]
async fn test_transport_failure_leaves_offer_open() {
    let fixture = TestFixture::new();
    let client = client_for(&fixture);
    let (_, ids) = fixture.seed_bitmarks(&fixture.alice, "flaky", 1).await;

    let mut offer = client
        .offer(&fixture.alice, ids[0], ids[0], *fixture.bob.account_number())
        .await
        .unwrap();

    fixture
        .ledger
        .fail_next(TransportError::Timeout("ledger slow".into()))
        .await;
    let result = client
        .respond_to_offer(&fixture.bob, &mut offer, OfferAction::Accept)
        .await;
    assert!(matches!(&result, Err(e) if e.is_retryable()));
    assert_eq!(offer.status(), OfferStatus::Open);
    assert!(offer.response().is_none());

    // Retrying with a fresh response succeeds
    let status = client
        .respond_to_offer(&fixture.bob, &mut offer, OfferAction::Accept)
        .await
        .unwrap();
    assert_eq!(status, OfferStatus::Accepted);
}

#[tokio::test]
async fn test_third_party_cannot_accept() {
    let fixture = TestFixture::new();
    let client = client_for(&fixture);
    let (_, ids) = fixture.seed_bitmarks(&fixture.alice, "third", 1).await;

    let mut offer = client
        .offer(&fixture.alice, ids[0], ids[0], *fixture.bob.account_number())
        .await
        .unwrap();

    let result = client
        .respond_to_offer(&fixture.carol, &mut offer, OfferAction::Accept)
        .await;
    assert!(matches!(
        result,
        Err(SdkError::Core(CoreError::SignerMismatch { .. }))
    ));
    assert_eq!(
        fixture.ledger.owner_of(&ids[0]).await,
        Some(*fixture.alice.account_number())
    );
}
