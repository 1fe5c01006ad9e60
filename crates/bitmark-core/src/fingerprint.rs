//! Content fingerprints.
//!
//! A fingerprint is `0x01 || SHA-512(content)`: 65 bytes, printed as 130
//! lowercase hex characters. The leading byte names the digest algorithm.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::crypto::sha512;
use crate::error::CoreError;
use crate::types::{decode_hex_array, hex_newtype_serde};

/// Algorithm byte for SHA-512 fingerprints.
pub const FINGERPRINT_SHA512: u8 = 0x01;

/// Length of a fingerprint in bytes.
pub const FINGERPRINT_LEN: usize = 65;

/// Only built by hashing or by parsing, so the algorithm byte is always known.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; FINGERPRINT_LEN]);

impl Fingerprint {
    /// Fingerprint a byte slice.
    pub fn compute(content: &[u8]) -> Self {
        let mut out = [0u8; FINGERPRINT_LEN];
        out[0] = FINGERPRINT_SHA512;
        out[1..].copy_from_slice(&sha512(&[content]));
        Self(out)
    }

    /// Fingerprint the contents of a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let content = fs::read(path)?;
        Ok(Self::compute(&content))
    }

    pub const fn as_bytes(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a printed fingerprint. The algorithm byte must be known.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let bytes: [u8; FINGERPRINT_LEN] = decode_hex_array(s)?;
        if bytes[0] != FINGERPRINT_SHA512 {
            return Err(CoreError::InvalidFormat(format!(
                "unknown fingerprint algorithm: {:#04x}",
                bytes[0]
            )));
        }
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", &self.to_hex()[..18])
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

hex_newtype_serde!(Fingerprint);

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_fingerprint_shape() {
        let fp = Fingerprint::compute(b"hello");
        assert_eq!(fp.as_bytes()[0], FINGERPRINT_SHA512);
        assert_eq!(fp.to_hex().len(), 130);
        assert!(fp.to_hex().starts_with("01"));
    }

    #[test]
    fn test_identical_files_share_fingerprint() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.bin");
        let b = dir.path().join("b.bin");
        let content = vec![0x5au8; 1000];
        fs::File::create(&a).unwrap().write_all(&content).unwrap();
        fs::File::create(&b).unwrap().write_all(&content).unwrap();

        let fa = Fingerprint::from_file(&a).unwrap();
        let fb = Fingerprint::from_file(&b).unwrap();
        assert_eq!(fa, fb);
        assert_eq!(fa, Fingerprint::compute(&content));
    }

    #[test]
    fn test_single_byte_change() {
        let mut content = vec![0u8; 256];
        let before = Fingerprint::compute(&content);
        content[128] = 1;
        assert_ne!(before, Fingerprint::compute(&content));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Fingerprint::from_file(dir.path().join("absent"));
        assert!(matches!(result, Err(CoreError::Io(_))));
    }

    #[test]
    fn test_hex_roundtrip_and_unknown_algorithm() {
        let fp = Fingerprint::compute(b"content");
        assert_eq!(Fingerprint::from_hex(&fp.to_hex()).unwrap(), fp);

        let mut other = fp.to_hex();
        other.replace_range(..2, "02");
        assert!(matches!(
            Fingerprint::from_hex(&other),
            Err(CoreError::InvalidFormat(_))
        ));
        assert!(other.parse::<Fingerprint>().is_err());
        assert!(serde_json::from_value::<Fingerprint>(serde_json::json!(other)).is_err());
    }
}
