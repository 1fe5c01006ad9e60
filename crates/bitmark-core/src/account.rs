//! Accounts and account numbers.
//!
//! An [`Account`] owns a seed and the keys derived from it. Records never
//! hold an account, only its [`AccountNumber`]: the public key plus a key
//! tag naming the signature scheme and network.
//!
//! Printable account number:
//!
//! ```text
//! base58( public_key:32 || key_tag:1 || checksum:4 )
//! key_tag = scheme_id << 4 | network_bit << 1 | 0x01
//! ```
//!
//! Inside canonical records the raw 33-byte `public_key || key_tag` form is
//! used instead.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::crypto::{
    checksum4, EncryptionKeypair, Ed25519PublicKey, Ed25519Signature, SignatureScheme,
    SigningKeypair, X25519PublicKey,
};
use crate::error::{CoreError, Result};
use crate::keys::{derive_encryption_keypair, derive_signing_keypair_for, DEFAULT_SCHEME};
use crate::phrase;
use crate::record::{Record, Signed};
use crate::seed::Seed;
use crate::types::Network;

/// Length of the raw account number used inside canonical records.
pub const ACCOUNT_NUMBER_RAW_LEN: usize = 33;

const ACCOUNT_NUMBER_ENCODED_LEN: usize = ACCOUNT_NUMBER_RAW_LEN + 4;

/// The public identity of an account on one network.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountNumber {
    public_key: Ed25519PublicKey,
    network: Network,
    scheme: SignatureScheme,
}

impl AccountNumber {
    pub fn new(public_key: Ed25519PublicKey, network: Network, scheme: SignatureScheme) -> Self {
        Self {
            public_key,
            network,
            scheme,
        }
    }

    pub fn public_key(&self) -> &Ed25519PublicKey {
        &self.public_key
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    /// The key tag byte: scheme, network and the key-type marker bit.
    pub fn key_tag(&self) -> u8 {
        (self.scheme.id() << 4) | (self.network.tag() << 1) | 0x01
    }

    fn parse_key_tag(tag: u8) -> Result<(SignatureScheme, Network)> {
        if tag & 0x01 != 0x01 || tag & 0x0c != 0 {
            return Err(CoreError::InvalidFormat(format!(
                "malformed account key tag: {tag:#04x}"
            )));
        }
        let scheme = SignatureScheme::from_id(tag >> 4).ok_or_else(|| {
            CoreError::InvalidFormat(format!("unknown signature scheme in key tag: {tag:#04x}"))
        })?;
        let network = Network::from_tag((tag >> 1) & 0x01).ok_or_else(|| {
            CoreError::InvalidFormat(format!("unknown network in key tag: {tag:#04x}"))
        })?;
        Ok((scheme, network))
    }

    /// Raw `public_key || key_tag` bytes, as written into canonical records.
    pub fn to_raw(&self) -> [u8; ACCOUNT_NUMBER_RAW_LEN] {
        let mut raw = [0u8; ACCOUNT_NUMBER_RAW_LEN];
        raw[..32].copy_from_slice(self.public_key.as_bytes());
        raw[32] = self.key_tag();
        raw
    }

    /// Parse the raw 33-byte form.
    pub fn from_raw(raw: &[u8]) -> Result<Self> {
        if raw.len() != ACCOUNT_NUMBER_RAW_LEN {
            return Err(CoreError::InvalidFormat(format!(
                "raw account number must be {} bytes, got {}",
                ACCOUNT_NUMBER_RAW_LEN,
                raw.len()
            )));
        }
        let (scheme, network) = Self::parse_key_tag(raw[32])?;
        let mut key = [0u8; 32];
        key.copy_from_slice(&raw[..32]);
        Ok(Self::new(Ed25519PublicKey::from_bytes(key), network, scheme))
    }

    /// The printable, checksummed account number.
    pub fn encode(&self) -> String {
        let raw = self.to_raw();
        let mut bytes = Vec::with_capacity(ACCOUNT_NUMBER_ENCODED_LEN);
        bytes.extend_from_slice(&raw);
        bytes.extend_from_slice(&checksum4(&raw));
        bs58::encode(bytes).into_string()
    }

    /// Parse a printable account number.
    pub fn decode(s: &str) -> Result<Self> {
        let bytes = bs58::decode(s.trim())
            .into_vec()
            .map_err(|e| CoreError::InvalidFormat(format!("account number is not base58: {e}")))?;
        if bytes.len() != ACCOUNT_NUMBER_ENCODED_LEN {
            return Err(CoreError::InvalidFormat(format!(
                "account number must decode to {} bytes, got {}",
                ACCOUNT_NUMBER_ENCODED_LEN,
                bytes.len()
            )));
        }
        let (raw, checksum) = bytes.split_at(ACCOUNT_NUMBER_RAW_LEN);
        if checksum4(raw) != checksum {
            return Err(CoreError::InvalidChecksum);
        }
        Self::from_raw(raw)
    }

    /// Fail with `NetworkMismatch` unless this account is on `network`.
    pub fn ensure_network(&self, network: Network) -> Result<()> {
        if self.network != network {
            return Err(CoreError::NetworkMismatch {
                expected: network,
                actual: self.network,
            });
        }
        Ok(())
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl fmt::Debug for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountNumber({}, {})", self.encode(), self.network)
    }
}

impl FromStr for AccountNumber {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl Serialize for AccountNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for AccountNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::decode(&s).map_err(serde::de::Error::custom)
    }
}

/// A local account: a seed and the keys derived from it.
///
/// Immutable after construction. Signing borrows the account and never
/// changes it, so one account can sign from many threads at once.
#[derive(Clone)]
pub struct Account {
    seed: Seed,
    signing: SigningKeypair,
    encryption: EncryptionKeypair,
    account_number: AccountNumber,
}

impl Account {
    /// Create an account from a freshly generated seed.
    pub fn new(network: Network) -> Self {
        Self::from_seed(Seed::generate(network))
    }

    /// Derive an account from an existing seed.
    pub fn from_seed(seed: Seed) -> Self {
        let signing = derive_signing_keypair_for(&seed, DEFAULT_SCHEME);
        let encryption = derive_encryption_keypair(&seed);
        let account_number =
            AccountNumber::new(signing.public_key(), seed.network(), signing.scheme());
        Self {
            seed,
            signing,
            encryption,
            account_number,
        }
    }

    /// Derive an account from a printable seed string.
    pub fn from_seed_str(s: &str) -> Result<Self> {
        Ok(Self::from_seed(Seed::decode(s)?))
    }

    /// Recover an account from its twelve-word phrase.
    pub fn from_recovery_phrase(phrase: &str) -> Result<Self> {
        Ok(Self::from_seed(phrase::from_phrase(phrase)?))
    }

    pub fn account_number(&self) -> &AccountNumber {
        &self.account_number
    }

    pub fn network(&self) -> Network {
        self.seed.network()
    }

    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    pub fn seed_string(&self) -> String {
        self.seed.encode()
    }

    pub fn recovery_phrase(&self) -> Vec<&'static str> {
        phrase::to_phrase(&self.seed)
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        self.signing.public_key()
    }

    pub fn encryption_public_key(&self) -> X25519PublicKey {
        self.encryption.public_key()
    }

    /// The X25519 keypair, for agreeing on content keys with other accounts.
    pub fn encryption_keypair(&self) -> &EncryptionKeypair {
        &self.encryption
    }

    /// Sign arbitrary bytes with this account's key.
    pub fn sign(&self, bytes: &[u8]) -> Ed25519Signature {
        self.signing.sign(bytes)
    }

    /// Validate, canonicalize and sign a record.
    ///
    /// Fails with `NetworkMismatch` when any account referenced by the record
    /// lives on a different network from this account.
    pub fn sign_record<R: Record>(&self, record: R) -> Result<Signed<R>> {
        for account in record.accounts() {
            account.ensure_network(self.network())?;
        }
        let bytes = record.canonical_bytes()?;
        let signature = self.signing.sign(&bytes);
        Ok(Signed::from_parts(record, self.account_number, signature))
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("account_number", &self.account_number)
            .finish_non_exhaustive()
    }
}
