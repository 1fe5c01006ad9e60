//! Asset registration records.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::account::{Account, AccountNumber};
use crate::canonical::{self, CanonicalWriter};
use crate::error::{Result, ValidationError};
use crate::fingerprint::Fingerprint;
use crate::metadata::Metadata;
use crate::record::{Record, RecordKind, Signed};
use crate::types::AssetId;
use crate::validation::{validate_metadata, validate_name};

/// Registration of a piece of content under a name and metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRegistration {
    pub name: String,
    pub fingerprint: Fingerprint,
    pub metadata: Metadata,
    pub registrant: AccountNumber,
}

impl AssetRegistration {
    /// The ledger identity of the registered asset.
    pub fn asset_id(&self) -> Result<AssetId> {
        canonical::asset_id(&self.fingerprint, &self.name, &self.metadata)
    }
}

impl Record for AssetRegistration {
    const KIND: RecordKind = RecordKind::AssetRegistration;

    fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_metadata(&self.metadata)?;
        Ok(())
    }

    fn encode_fields(&self, w: &mut CanonicalWriter) -> Result<()> {
        w.put_str(&self.name)?;
        w.put_raw(self.fingerprint.as_bytes());
        w.put_metadata(&self.metadata)?;
        w.put_account(&self.registrant);
        Ok(())
    }

    fn accounts(&self) -> Vec<AccountNumber> {
        vec![self.registrant]
    }
}

/// Parameters for registering an asset.
///
/// ```ignore
/// let signed = AssetRegistrationParams::new("name", Metadata::new())
///     .fingerprint_file("content.bin")?
///     .sign(&account)?;
/// ```
#[derive(Debug, Clone)]
pub struct AssetRegistrationParams {
    name: String,
    metadata: Metadata,
    fingerprint: Option<Fingerprint>,
}

impl AssetRegistrationParams {
    pub fn new(name: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            name: name.into(),
            metadata,
            fingerprint: None,
        }
    }

    pub fn with_fingerprint(mut self, fingerprint: Fingerprint) -> Self {
        self.fingerprint = Some(fingerprint);
        self
    }

    /// Fingerprint in-memory content.
    pub fn fingerprint_bytes(self, content: &[u8]) -> Self {
        self.with_fingerprint(Fingerprint::compute(content))
    }

    /// Fingerprint a file's content.
    pub fn fingerprint_file(self, path: impl AsRef<Path>) -> Result<Self> {
        Ok(self.with_fingerprint(Fingerprint::from_file(path)?))
    }

    /// Build the record with `account` as registrant and sign it.
    pub fn sign(&self, account: &Account) -> Result<Signed<AssetRegistration>> {
        let fingerprint = self.fingerprint.ok_or(ValidationError::MissingFingerprint)?;
        let record = AssetRegistration {
            name: self.name.clone(),
            fingerprint,
            metadata: self.metadata.clone(),
            registrant: *account.account_number(),
        };
        account.sign_record(record)
    }
}
