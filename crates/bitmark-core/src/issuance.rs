//! Issuance records: one signed record minting `quantity` bitmarks.

use std::collections::HashSet;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::account::{Account, AccountNumber};
use crate::canonical::{self, CanonicalWriter};
use crate::error::{CoreError, Result};
use crate::record::{Record, RecordKind, Signed};
use crate::types::{AssetId, RecordId};
use crate::validation::{validate_nonces, validate_quantity};

/// Issuance of bitmarks for a registered asset.
///
/// Each nonce yields one bitmark; all of them share this record's signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issuance {
    pub asset_id: AssetId,
    pub owner: AccountNumber,
    pub nonces: Vec<u64>,
}

impl Issuance {
    pub fn quantity(&self) -> usize {
        self.nonces.len()
    }
}

impl Record for Issuance {
    const KIND: RecordKind = RecordKind::Issuance;

    fn validate(&self) -> Result<()> {
        validate_nonces(&self.nonces)?;
        Ok(())
    }

    fn encode_fields(&self, w: &mut CanonicalWriter) -> Result<()> {
        let quantity = u16::try_from(self.nonces.len())
            .map_err(|_| CoreError::InvalidFormat("issuance quantity exceeds u16".into()))?;
        w.put_raw(self.asset_id.as_bytes());
        w.put_account(&self.owner);
        w.put_u16(quantity);
        for nonce in &self.nonces {
            w.put_u64(*nonce);
        }
        Ok(())
    }

    fn accounts(&self) -> Vec<AccountNumber> {
        vec![self.owner]
    }
}

impl Signed<Issuance> {
    /// The identities of the issued bitmarks, in nonce order.
    pub fn bitmark_ids(&self) -> Result<Vec<RecordId>> {
        let issuance = self.id()?;
        Ok(self
            .record
            .nonces
            .iter()
            .map(|nonce| canonical::bitmark_id(&issuance, *nonce))
            .collect())
    }
}

/// Parameters for issuing bitmarks of an asset to the signing account.
#[derive(Debug, Clone)]
pub struct IssuanceParams {
    asset_id: AssetId,
    quantity: usize,
    nonces: Option<Vec<u64>>,
}

impl IssuanceParams {
    pub fn new(asset_id: AssetId, quantity: usize) -> Self {
        Self {
            asset_id,
            quantity,
            nonces: None,
        }
    }

    /// Use fixed nonces instead of random ones. Overrides `quantity`.
    pub fn with_nonces(mut self, nonces: Vec<u64>) -> Self {
        self.quantity = nonces.len();
        self.nonces = Some(nonces);
        self
    }

    pub fn sign(&self, account: &Account) -> Result<Signed<Issuance>> {
        validate_quantity(self.quantity)?;
        let nonces = match &self.nonces {
            Some(nonces) => nonces.clone(),
            None => random_nonces(self.quantity),
        };
        let record = Issuance {
            asset_id: self.asset_id,
            owner: *account.account_number(),
            nonces,
        };
        account.sign_record(record)
    }
}

fn random_nonces(quantity: usize) -> Vec<u64> {
    let mut rng = rand::thread_rng();
    let mut seen = HashSet::with_capacity(quantity);
    let mut nonces = Vec::with_capacity(quantity);
    while nonces.len() < quantity {
        let nonce = rng.next_u64();
        if seen.insert(nonce) {
            nonces.push(nonce);
        }
    }
    nonces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::seed::Seed;
    use crate::types::Network;

    fn account() -> Account {
        Account::from_seed(Seed::from_core([0x71; 16], Network::Testnet))
    }

    fn asset() -> AssetId {
        AssetId::from_bytes([0xaa; 64])
    }

    #[test]
    fn test_quantity_bounds() {
        for bad in [0, 101] {
            assert!(matches!(
                IssuanceParams::new(asset(), bad).sign(&account()),
                Err(CoreError::Validation(ValidationError::QuantityOutOfRange(_)))
            ));
        }
        for good in [1, 100] {
            let signed = IssuanceParams::new(asset(), good).sign(&account()).unwrap();
            assert_eq!(signed.record.quantity(), good);
        }
    }

    #[test]
    fn test_ten_distinct_bitmarks_share_signature() {
        let signed = IssuanceParams::new(asset(), 10).sign(&account()).unwrap();
        assert!(signed.verify().is_ok());

        let ids = signed.bitmark_ids().unwrap();
        assert_eq!(ids.len(), 10);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn test_fixed_nonces_are_deterministic() {
        let params = IssuanceParams::new(asset(), 1).with_nonces(vec![1, 2, 3]);
        let a = params.sign(&account()).unwrap();
        let b = params.sign(&account()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.bitmark_ids().unwrap(), b.bitmark_ids().unwrap());
    }

    #[test]
    fn test_duplicate_nonces_rejected() {
        let result = IssuanceParams::new(asset(), 2)
            .with_nonces(vec![9, 9])
            .sign(&account());
        assert!(matches!(
            result,
            Err(CoreError::Validation(ValidationError::DuplicateNonce))
        ));
    }

    #[test]
    fn test_canonical_layout() {
        let signed = IssuanceParams::new(asset(), 1)
            .with_nonces(vec![5])
            .sign(&account())
            .unwrap();
        let bytes = signed.canonical_bytes().unwrap();
        // header + asset id + owner + quantity + one nonce
        assert_eq!(bytes.len(), 2 + 64 + 33 + 2 + 8);
        assert_eq!(&bytes[99..101], &[0, 1]);
        assert_eq!(&bytes[101..], &5u64.to_be_bytes());
    }
}
