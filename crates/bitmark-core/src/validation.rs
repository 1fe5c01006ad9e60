//! Bounds checks applied before a record is canonicalized.
//!
//! A record that fails any of these never reaches the signer.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::metadata::Metadata;

/// Maximum asset name length in characters.
pub const MAX_NAME_CHARS: usize = 64;

/// Maximum size of the flat metadata string in characters.
pub const MAX_METADATA_CHARS: usize = 2048;

/// Maximum number of bitmarks in one issuance.
pub const MAX_ISSUE_QUANTITY: usize = 100;

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let chars = name.chars().count();
    if chars > MAX_NAME_CHARS {
        return Err(ValidationError::NameTooLong(chars));
    }
    Ok(())
}

/// Check metadata keys, separators and total size.
pub fn validate_metadata(metadata: &Metadata) -> Result<(), ValidationError> {
    for (key, value) in metadata.iter() {
        // 1. Keys are required
        if key.is_empty() {
            return Err(ValidationError::EmptyMetadataKey);
        }

        // 2. NUL is the separator of the flat form
        if key.contains('\0') {
            return Err(ValidationError::MetadataContainsNul(key.to_string()));
        }
        if value.contains('\0') {
            return Err(ValidationError::MetadataContainsNul(key.to_string()));
        }
    }

    // 3. Size limit on the flat form
    let size = metadata.serialized_len();
    if size > MAX_METADATA_CHARS {
        return Err(ValidationError::MetadataTooLarge(size));
    }

    Ok(())
}

pub fn validate_quantity(quantity: usize) -> Result<(), ValidationError> {
    if quantity == 0 || quantity > MAX_ISSUE_QUANTITY {
        return Err(ValidationError::QuantityOutOfRange(quantity));
    }
    Ok(())
}

/// Quantity bounds plus pairwise-distinct nonces.
pub fn validate_nonces(nonces: &[u64]) -> Result<(), ValidationError> {
    validate_quantity(nonces.len())?;
    let mut seen = HashSet::with_capacity(nonces.len());
    if !nonces.iter().all(|n| seen.insert(*n)) {
        return Err(ValidationError::DuplicateNonce);
    }
    Ok(())
}
