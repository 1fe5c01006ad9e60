//! Strong type definitions for the Bitmark core.
//!
//! All identifiers are newtypes to prevent misuse at compile time. Fixed-size
//! identifiers travel as lowercase hex on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Implements hex `Serialize`/`Deserialize` and `FromStr` for a byte-array newtype.
///
/// With a length, also `From<[u8; len]>` for types where every byte pattern is
/// valid.
macro_rules! hex_newtype_serde {
    ($ty:ident, $len:expr) => {
        hex_newtype_serde!($ty);

        impl From<[u8; $len]> for $ty {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }
    };
    ($ty:ident) => {
        impl ::serde::Serialize for $ty {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $ty {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::std::result::Result<Self, D::Error> {
                let s = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                $ty::from_hex(&s).map_err(::serde::de::Error::custom)
            }
        }

        impl ::std::str::FromStr for $ty {
            type Err = $crate::error::CoreError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                $ty::from_hex(s)
            }
        }

        impl AsRef<[u8]> for $ty {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

pub(crate) use hex_newtype_serde;

/// Decode a hex string into a fixed-size array.
pub(crate) fn decode_hex_array<const N: usize>(s: &str) -> Result<[u8; N], CoreError> {
    let bytes = hex::decode(s).map_err(|e| CoreError::InvalidFormat(e.to_string()))?;
    bytes.try_into().map_err(|v: Vec<u8>| {
        CoreError::InvalidFormat(format!("expected {} bytes, got {}", N, v.len()))
    })
}

/// The ledger network a seed, account or record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Livenet,
    Testnet,
}

impl Network {
    /// Tag byte used in seed strings.
    pub const fn tag(self) -> u8 {
        match self {
            Network::Livenet => 0x00,
            Network::Testnet => 0x01,
        }
    }

    /// Parse a tag byte.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x00 => Some(Network::Livenet),
            0x01 => Some(Network::Testnet),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Network::Livenet => "livenet",
            Network::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "livenet" | "bitmark" => Ok(Network::Livenet),
            "testnet" => Ok(Network::Testnet),
            other => Err(CoreError::InvalidFormat(format!("unknown network: {other}"))),
        }
    }
}

/// A 32-byte record identifier: the transaction id of a signed record, and
/// the identity of an issued bitmark.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub [u8; 32]);

impl RecordId {
    /// Create a new RecordId from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        decode_hex_array(s).map(Self)
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

hex_newtype_serde!(RecordId, 32);

/// A 64-byte asset identifier, derived from fingerprint, name and metadata.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(pub [u8; 64]);

impl AssetId {
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        decode_hex_array(s).map(Self)
    }
}

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetId({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

hex_newtype_serde!(AssetId, 64);

/// Ledger-assigned transfer offer identifier. Opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfferId(String);

impl OfferId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OfferId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_hex_roundtrip() {
        let id = RecordId::from_bytes([0x42; 32]);
        let recovered = RecordId::from_hex(&id.to_hex()).unwrap();
        assert_eq!(id, recovered);
    }

    #[test]
    fn test_record_id_rejects_wrong_length() {
        assert!(matches!(
            RecordId::from_hex("abcd"),
            Err(CoreError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_asset_id_serializes_as_hex() {
        let id = AssetId::from_bytes([0xab; 64]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(64)));
        let back: AssetId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_network_tags() {
        for network in [Network::Livenet, Network::Testnet] {
            assert_eq!(Network::from_tag(network.tag()), Some(network));
            assert_eq!(network.as_str().parse::<Network>().unwrap(), network);
        }
        assert_eq!(Network::from_tag(0x02), None);
    }
}
