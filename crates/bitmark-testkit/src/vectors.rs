//! Golden test vectors for cross-implementation verification.
//!
//! Every client of the Bitmark ledger must produce identical:
//! - fingerprints
//! - canonical record bytes
//! - asset ids, record ids and bitmark ids
//! - seed strings, recovery phrases and account numbers

use bitmark_core::canonical::{asset_id, bitmark_id, record_id};
use bitmark_core::crypto::SignatureScheme;
use bitmark_core::{
    Account, AccountNumber, Ed25519PublicKey, Ed25519Signature, Fingerprint, Metadata, Network,
    OfferAction, OfferId, OfferResponseRecord, Record, RecordId, Seed, Transfer,
    TransferOfferRecord,
};

/// A single golden vector: a named computation and its expected output.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    pub name: &'static str,
    pub description: &'static str,
    pub compute: fn() -> String,
    pub expected: &'static str,
}

fn testnet_account(pk_byte: u8) -> AccountNumber {
    AccountNumber::new(
        Ed25519PublicKey::from_bytes([pk_byte; 32]),
        Network::Testnet,
        SignatureScheme::Ed25519,
    )
}

fn fingerprint_empty() -> String {
    Fingerprint::compute(b"").to_hex()
}

fn fingerprint_abc() -> String {
    Fingerprint::compute(b"abc").to_hex()
}

fn asset_id_song() -> String {
    let metadata = Metadata::new().with("genre", "folk").with("year", "2024");
    match asset_id(&Fingerprint::compute(b"abc"), "Song", &metadata) {
        Ok(id) => id.to_hex(),
        Err(e) => format!("error: {e}"),
    }
}

fn transfer_canonical() -> String {
    let transfer = Transfer {
        previous_record_id: RecordId::from_bytes([0x11; 32]),
        new_owner: testnet_account(0x22),
    };
    match transfer.canonical_bytes() {
        Ok(bytes) => hex::encode(bytes),
        Err(e) => format!("error: {e}"),
    }
}

fn transfer_record_id() -> String {
    let transfer = Transfer {
        previous_record_id: RecordId::from_bytes([0x11; 32]),
        new_owner: testnet_account(0x22),
    };
    match transfer.canonical_bytes() {
        Ok(bytes) => record_id(&bytes, &Ed25519Signature::from_bytes([0x33; 64])).to_hex(),
        Err(e) => format!("error: {e}"),
    }
}

fn bitmark_id_nonce_7() -> String {
    bitmark_id(&RecordId::from_bytes([0x44; 32]), 7).to_hex()
}

fn offer_response_canonical() -> String {
    let response = OfferResponseRecord {
        offer_id: OfferId::new("offer-000001"),
        action: OfferAction::Accept,
    };
    match response.canonical_bytes() {
        Ok(bytes) => hex::encode(bytes),
        Err(e) => format!("error: {e}"),
    }
}

fn transfer_offer_canonical() -> String {
    let offer = TransferOfferRecord {
        bitmark_id: RecordId::from_bytes([0x55; 32]),
        previous_record_id: RecordId::from_bytes([0x66; 32]),
        from: testnet_account(0x22),
        to: testnet_account(0x77),
    };
    match offer.canonical_bytes() {
        Ok(bytes) => hex::encode(bytes),
        Err(e) => format!("error: {e}"),
    }
}

fn sequential_core() -> [u8; 16] {
    let mut core = [0u8; 16];
    for (i, byte) in core.iter_mut().enumerate() {
        *byte = i as u8;
    }
    core
}

fn sequential_phrase() -> String {
    Account::from_seed(Seed::from_core(sequential_core(), Network::Testnet))
        .recovery_phrase()
        .join(" ")
}

fn livenet_phrase_seed() -> String {
    let phrase = "legal winner thank year wave sausage worth useful legal winner thank write";
    match Account::from_recovery_phrase(phrase) {
        Ok(account) => account.seed_string(),
        Err(e) => format!("error: {e}"),
    }
}

fn zero_seed_string() -> String {
    Seed::from_core([0u8; 16], Network::Testnet).encode()
}

fn zero_seed_account() -> String {
    Account::from_seed(Seed::from_core([0u8; 16], Network::Testnet))
        .account_number()
        .encode()
}

/// All golden vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "fingerprint_empty",
            description: "Fingerprint of empty content",
            compute: fingerprint_empty,
            expected: "01cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e",
        },
        GoldenVector {
            name: "fingerprint_abc",
            description: "Fingerprint of \"abc\"",
            compute: fingerprint_abc,
            expected: "01ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f",
        },
        GoldenVector {
            name: "asset_id_song",
            description: "Asset id of \"Song\" with two metadata entries over the \"abc\" fingerprint",
            compute: asset_id_song,
            expected: "aeac3efe9e5bc2665760e5ccf8aa20f4408f66cc60c7684b4a1bc85a40dbfab80067e4c26d6447f16d3730ad3b33ecf7b24c6272e9b8a9c1639c5e68034e1e0b",
        },
        GoldenVector {
            name: "transfer_canonical",
            description: "Canonical bytes of a transfer to a fixed testnet key",
            compute: transfer_canonical,
            expected: "04011111111111111111111111111111111111111111111111111111111111111111222222222222222222222222222222222222222222222222222222222222222213",
        },
        GoldenVector {
            name: "transfer_record_id",
            description: "Record id of that transfer under a fixed signature",
            compute: transfer_record_id,
            expected: "843e46e8a4b64b76a44df6305e0f40b72ec85583e57bcb82c0a40a2d229ed12a",
        },
        GoldenVector {
            name: "bitmark_id_nonce_7",
            description: "Bitmark id for nonce 7 of a fixed issuance",
            compute: bitmark_id_nonce_7,
            expected: "231044619843ecc2dbed92fdfe6aeab62f71c819cb119862ce4c17bebece4abd",
        },
        GoldenVector {
            name: "offer_response_canonical",
            description: "Canonical bytes of an accept response",
            compute: offer_response_canonical,
            expected: "06010000000c6f666665722d30303030303100000006616363657074",
        },
        GoldenVector {
            name: "transfer_offer_canonical",
            description: "Canonical bytes of an offer between fixed testnet keys",
            compute: transfer_offer_canonical,
            expected: "050155555555555555555555555555555555555555555555555555555555555555556666666666666666666666666666666666666666666666666666666666666666222222222222222222222222222222222222222222222222222222222222222213777777777777777777777777777777777777777777777777777777777777777713",
        },
        GoldenVector {
            name: "zero_seed_string",
            description: "Seed string of the all-zero testnet core",
            compute: zero_seed_string,
            expected: "YYcwvBJ8rvSMqRnrscEkaT7khnsAG",
        },
        GoldenVector {
            name: "zero_seed_account",
            description: "Account number of the all-zero testnet core",
            compute: zero_seed_account,
            expected: "68k1w8qFyoBqD7j7TGnDDfvBwaUPogkkNyCFCVD3UXRpz5X3hiS",
        },
        GoldenVector {
            name: "sequential_phrase",
            description: "Recovery phrase of the testnet core 00 01 .. 0f",
            compute: sequential_phrase,
            expected: "abandon amount liar amount expire adjust cage candy arch gather drum buyer",
        },
        GoldenVector {
            name: "livenet_phrase_seed",
            description: "Seed string recovered from a fixed livenet phrase (core 7f x 16)",
            compute: livenet_phrase_seed,
            expected: "YWq7XFc3nEhJsG9wKFbEFN4S8P4M2",
        },
    ]
}

/// Run every vector. Returns `(name, matches, produced)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let produced = (v.compute)();
            let matches = produced == v.expected;
            (v.name.to_string(), matches, produced)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_match() {
        for (name, matches, produced) in verify_all_vectors() {
            assert!(matches, "vector '{}' produced {}", name, produced);
        }
    }

    #[test]
    fn test_vectors_are_deterministic() {
        for vector in all_vectors() {
            assert_eq!(
                (vector.compute)(),
                (vector.compute)(),
                "vector '{}' is not deterministic",
                vector.name
            );
        }
    }

    #[test]
    fn test_vector_names_unique() {
        let vectors = all_vectors();
        let mut names: Vec<_> = vectors.iter().map(|v| v.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), vectors.len());
    }
}
