//! Twelve-word recovery phrases.
//!
//! Words come from the BIP-39 English dictionary (2048 entries, 11 bits per
//! word). Only the dictionary is shared with BIP-39; the bit layout is our
//! own and maps one-to-one onto a [`Seed`]:
//!
//! ```text
//! bit 0                    128   129        132
//! | core (128 bits)        | net | checksum |
//! ```
//!
//! `net` is the seed's network tag bit and `checksum` the top three bits of
//! `blake3(PHRASE_DOMAIN || core || network_tag)[0]`. Bits are packed
//! most-significant first and split into twelve 11-bit word indices.

use bip39::Language;
use zeroize::Zeroize;

use crate::error::{CoreError, Result};
use crate::seed::{Seed, SEED_CORE_LEN};
use crate::types::Network;

/// Number of words in a recovery phrase.
pub const PHRASE_WORDS: usize = 12;

const BITS_PER_WORD: usize = 11;
const CHECKSUM_BITS: usize = 3;

/// Domain separator for the phrase checksum.
const PHRASE_DOMAIN: &[u8] = b"bitmark-core/phrase/v2";

/// Encode a seed as twelve dictionary words. Always succeeds.
pub fn to_phrase(seed: &Seed) -> Vec<&'static str> {
    let mut bits = [0u8; 17];
    bits[..SEED_CORE_LEN].copy_from_slice(seed.core());
    // Byte 16 holds the network bit followed by the three checksum bits;
    // the low four bits are padding past bit 132.
    let checksum = phrase_checksum(seed.core(), seed.network());
    bits[SEED_CORE_LEN] = (seed.network().tag() << 7) | (checksum << 4);

    let words = Language::English.word_list();
    let phrase = (0..PHRASE_WORDS)
        .map(|i| words[read_bits(&bits, i * BITS_PER_WORD, BITS_PER_WORD) as usize])
        .collect();

    bits.zeroize();
    phrase
}

/// Render a seed's phrase as a single space-separated string.
pub fn to_phrase_string(seed: &Seed) -> String {
    to_phrase(seed).join(" ")
}

/// Decode a recovery phrase back into the seed it was derived from.
///
/// The phrase is split on whitespace and lowercased. Fails with
/// `InvalidFormat` when the word count is not twelve, `UnknownWord` for the
/// first word missing from the dictionary (positions are zero-based), and
/// `InvalidChecksum` when the words are all valid but do not belong together.
pub fn from_phrase(phrase: &str) -> Result<Seed> {
    let words: Vec<String> = phrase
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect();

    if words.len() != PHRASE_WORDS {
        return Err(CoreError::InvalidFormat(format!(
            "recovery phrase must have {} words, got {}",
            PHRASE_WORDS,
            words.len()
        )));
    }

    let mut bits = [0u8; 17];
    for (position, word) in words.iter().enumerate() {
        let index = Language::English
            .find_word(word)
            .ok_or_else(|| CoreError::UnknownWord {
                position,
                word: word.clone(),
            })?;
        write_bits(&mut bits, position * BITS_PER_WORD, BITS_PER_WORD, index);
    }

    let mut core = [0u8; SEED_CORE_LEN];
    core.copy_from_slice(&bits[..SEED_CORE_LEN]);
    let trailer = bits[SEED_CORE_LEN];
    bits.zeroize();

    // The network bit is covered by the checksum.
    let network = if trailer & 0x80 == 0 {
        Network::Livenet
    } else {
        Network::Testnet
    };
    let checksum = (trailer >> 4) & 0x07;
    if checksum != phrase_checksum(&core, network) {
        core.zeroize();
        return Err(CoreError::InvalidChecksum);
    }

    let seed = Seed::from_core(core, network);
    core.zeroize();
    Ok(seed)
}

fn phrase_checksum(core: &[u8; SEED_CORE_LEN], network: Network) -> u8 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(PHRASE_DOMAIN);
    hasher.update(core);
    hasher.update(&[network.tag()]);
    hasher.finalize().as_bytes()[0] >> (8 - CHECKSUM_BITS)
}

/// Read `len` bits starting at bit `offset`, most-significant first.
fn read_bits(buf: &[u8], offset: usize, len: usize) -> u16 {
    let mut value = 0u16;
    for i in 0..len {
        let bit = offset + i;
        let set = (buf[bit / 8] >> (7 - bit % 8)) & 1;
        value = (value << 1) | set as u16;
    }
    value
}

fn write_bits(buf: &mut [u8], offset: usize, len: usize, value: u16) {
    for i in 0..len {
        let bit = offset + i;
        if (value >> (len - 1 - i)) & 1 == 1 {
            buf[bit / 8] |= 1 << (7 - bit % 8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_phrase_has_twelve_dictionary_words() {
        let seed = Seed::from_core([0xa7; 16], Network::Livenet);
        let phrase = to_phrase(&seed);
        assert_eq!(phrase.len(), PHRASE_WORDS);
        for word in &phrase {
            assert!(Language::English.find_word(word).is_some());
        }
    }

    #[test]
    fn test_all_zero_core() {
        let seed = Seed::from_core([0u8; 16], Network::Livenet);
        let phrase = to_phrase(&seed);
        // Eleven leading zero words, then the trailer word.
        assert!(phrase[..11].iter().all(|w| *w == "abandon"));
        assert_eq!(from_phrase(&phrase.join(" ")).unwrap(), seed);
    }

    #[test]
    fn test_phrase_is_case_and_whitespace_insensitive() {
        let seed = Seed::from_core([0x3c; 16], Network::Testnet);
        let shouted = to_phrase(&seed)
            .iter()
            .map(|w| w.to_uppercase())
            .collect::<Vec<_>>()
            .join("   \n");
        assert_eq!(from_phrase(&shouted).unwrap(), seed);
    }

    #[test]
    fn test_wrong_word_count() {
        let err = from_phrase("abandon abandon abandon").unwrap_err();
        assert!(matches!(err, CoreError::InvalidFormat(_)));
    }

    #[test]
    fn test_unknown_word_reports_position() {
        let seed = Seed::from_core([0x10; 16], Network::Livenet);
        let mut words = to_phrase(&seed);
        words[4] = "bitmarkk";
        match from_phrase(&words.join(" ")) {
            Err(CoreError::UnknownWord { position, word }) => {
                assert_eq!(position, 4);
                assert_eq!(word, "bitmarkk");
            }
            other => panic!("expected UnknownWord, got {:?}", other),
        }
    }

    #[test]
    fn test_swapped_last_word_fails_or_differs() {
        let seed = Seed::from_core([0x99; 16], Network::Livenet);
        let words = to_phrase(&seed);
        let dictionary = Language::English.word_list();

        let mut checksum_failures = 0;
        for candidate in dictionary.iter().take(64) {
            if *candidate == words[11] {
                continue;
            }
            let mut changed = words.clone();
            changed[11] = candidate;
            match from_phrase(&changed.join(" ")) {
                Err(CoreError::InvalidChecksum) => checksum_failures += 1,
                Ok(other) => assert_ne!(other, seed),
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert!(checksum_failures > 0);
    }

    #[test]
    fn test_bit_helpers_roundtrip() {
        let mut buf = [0u8; 3];
        write_bits(&mut buf, 5, 11, 0x5a5);
        assert_eq!(read_bits(&buf, 5, 11), 0x5a5);
    }

    proptest! {
        #[test]
        fn prop_phrase_roundtrip(core in any::<[u8; 16]>(), testnet in any::<bool>()) {
            let network = if testnet { Network::Testnet } else { Network::Livenet };
            let seed = Seed::from_core(core, network);
            let recovered = from_phrase(&to_phrase_string(&seed)).unwrap();
            prop_assert_eq!(recovered, seed);
        }

        #[test]
        fn prop_distinct_seeds_give_distinct_phrases(
            a in any::<[u8; 16]>(),
            b in any::<[u8; 16]>(),
        ) {
            prop_assume!(a != b);
            let pa = to_phrase(&Seed::from_core(a, Network::Livenet));
            let pb = to_phrase(&Seed::from_core(b, Network::Livenet));
            prop_assert_ne!(pa, pb);
        }
    }
}
