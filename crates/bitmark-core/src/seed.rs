//! Seeds: the root secret every account key is derived from.
//!
//! A seed is a 128-bit random core tagged with a version and a network.
//! Its printable form is
//!
//! ```text
//! base58( version:1 || network:1 || core:16 || checksum:4 )
//! ```
//!
//! where `checksum` is the first four bytes of Blake3 over the preceding 18
//! bytes. The 32 bytes of keying entropy are never stored; they are expanded
//! from the core on demand so that the seed stays small enough to be carried
//! by a twelve-word recovery phrase.

use rand::RngCore;
use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::checksum4;
use crate::error::{CoreError, Result};
use crate::types::Network;

/// Current seed format version.
pub const SEED_VERSION: u8 = 0x02;

/// Length of the random seed core in bytes.
pub const SEED_CORE_LEN: usize = 16;

/// Length of the decoded seed string in bytes.
const SEED_BYTES_LEN: usize = 2 + SEED_CORE_LEN + 4;

/// Blake3 derive-key context for expanding the core into keying entropy.
const SEED_ENTROPY_CONTEXT: &str = "bitmark-core 2024-01-01 seed entropy v2";

/// A versioned, network-tagged seed.
///
/// Immutable once created. The core is wiped from memory on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed {
    #[zeroize(skip)]
    version: u8,
    #[zeroize(skip)]
    network: Network,
    core: [u8; SEED_CORE_LEN],
}

impl Seed {
    /// Generate a fresh seed from the operating system RNG.
    pub fn generate(network: Network) -> Self {
        let mut core = [0u8; SEED_CORE_LEN];
        rand::rngs::OsRng.fill_bytes(&mut core);
        Self::from_core(core, network)
    }

    /// Build a seed at the current version from an existing core.
    pub fn from_core(core: [u8; SEED_CORE_LEN], network: Network) -> Self {
        Self {
            version: SEED_VERSION,
            network,
            core,
        }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// The raw 128-bit core. Secret material.
    pub fn core(&self) -> &[u8; SEED_CORE_LEN] {
        &self.core
    }

    /// The 32 bytes of keying entropy all account keys are derived from.
    pub fn entropy(&self) -> [u8; 32] {
        let mut material = [0u8; SEED_CORE_LEN + 1];
        material[..SEED_CORE_LEN].copy_from_slice(&self.core);
        material[SEED_CORE_LEN] = self.network.tag();
        let entropy = blake3::derive_key(SEED_ENTROPY_CONTEXT, &material);
        material.zeroize();
        entropy
    }

    /// Encode to the printable seed string. Always succeeds.
    pub fn encode(&self) -> String {
        let mut bytes = Vec::with_capacity(SEED_BYTES_LEN);
        bytes.push(self.version);
        bytes.push(self.network.tag());
        bytes.extend_from_slice(&self.core);
        let checksum = checksum4(&bytes);
        bytes.extend_from_slice(&checksum);
        let encoded = bs58::encode(&bytes).into_string();
        bytes.zeroize();
        encoded
    }

    /// Decode a printable seed string.
    ///
    /// Fails with `InvalidFormat` on bad base58, length, version or network
    /// tag, and with `InvalidChecksum` when the embedded checksum does not
    /// match the payload.
    pub fn decode(s: &str) -> Result<Self> {
        let mut bytes = bs58::decode(s.trim())
            .into_vec()
            .map_err(|e| CoreError::InvalidFormat(format!("seed is not base58: {e}")))?;

        let result = Self::from_decoded_bytes(&bytes);
        bytes.zeroize();
        result
    }

    fn from_decoded_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SEED_BYTES_LEN {
            return Err(CoreError::InvalidFormat(format!(
                "seed must decode to {} bytes, got {}",
                SEED_BYTES_LEN,
                bytes.len()
            )));
        }

        let (payload, checksum) = bytes.split_at(SEED_BYTES_LEN - 4);
        if checksum4(payload) != checksum {
            return Err(CoreError::InvalidChecksum);
        }

        let version = payload[0];
        if version != SEED_VERSION {
            return Err(CoreError::InvalidFormat(format!(
                "unsupported seed version: {version:#04x}"
            )));
        }

        let network = Network::from_tag(payload[1]).ok_or_else(|| {
            CoreError::InvalidFormat(format!("unknown network tag: {:#04x}", payload[1]))
        })?;

        let mut core = [0u8; SEED_CORE_LEN];
        core.copy_from_slice(&payload[2..]);

        Ok(Self {
            version,
            network,
            core,
        })
    }
}

impl FromStr for Seed {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seed")
            .field("version", &self.version)
            .field("network", &self.network)
            .finish_non_exhaustive()
    }
}
