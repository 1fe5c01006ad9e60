//! One-signature transfers, signed by the current owner alone.

use serde::{Deserialize, Serialize};

use crate::account::{Account, AccountNumber};
use crate::canonical::CanonicalWriter;
use crate::error::{Result, ValidationError};
use crate::record::{Record, RecordKind, Signed};
use crate::types::RecordId;

/// Moves a bitmark to a new owner by spending its current head record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// The bitmark's current head: its bitmark id if never transferred,
    /// otherwise the id of the latest transfer.
    pub previous_record_id: RecordId,
    pub new_owner: AccountNumber,
}

impl Record for Transfer {
    const KIND: RecordKind = RecordKind::Transfer;

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn encode_fields(&self, w: &mut CanonicalWriter) -> Result<()> {
        w.put_raw(self.previous_record_id.as_bytes());
        w.put_account(&self.new_owner);
        Ok(())
    }

    fn accounts(&self) -> Vec<AccountNumber> {
        vec![self.new_owner]
    }
}

/// Parameters for a one-signature transfer.
#[derive(Debug, Clone)]
pub struct TransferParams {
    receiver: AccountNumber,
    previous_record_id: Option<RecordId>,
}

impl TransferParams {
    pub fn new(receiver: AccountNumber) -> Self {
        Self {
            receiver,
            previous_record_id: None,
        }
    }

    /// Spend the given head record.
    pub fn from_head(mut self, previous_record_id: RecordId) -> Self {
        self.previous_record_id = Some(previous_record_id);
        self
    }

    pub fn receiver(&self) -> &AccountNumber {
        &self.receiver
    }

    pub fn sign(&self, owner: &Account) -> Result<Signed<Transfer>> {
        let previous_record_id = self
            .previous_record_id
            .ok_or(ValidationError::MissingBitmark)?;
        owner.sign_record(Transfer {
            previous_record_id,
            new_owner: self.receiver,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::seed::Seed;
    use crate::types::Network;

    fn account(byte: u8, network: Network) -> Account {
        Account::from_seed(Seed::from_core([byte; 16], network))
    }

    #[test]
    fn test_transfer_signed_by_owner() {
        let owner = account(0x01, Network::Livenet);
        let receiver = account(0x02, Network::Livenet);
        let signed = TransferParams::new(*receiver.account_number())
            .from_head(RecordId::from_bytes([3; 32]))
            .sign(&owner)
            .unwrap();
        assert!(signed.verify().is_ok());
        assert_eq!(signed.signer, *owner.account_number());
    }

    #[test]
    fn test_cross_network_transfer_rejected() {
        let owner = account(0x01, Network::Livenet);
        let receiver = account(0x02, Network::Testnet);
        let result = TransferParams::new(*receiver.account_number())
            .from_head(RecordId::from_bytes([3; 32]))
            .sign(&owner);
        assert!(matches!(
            result,
            Err(CoreError::NetworkMismatch {
                expected: Network::Livenet,
                actual: Network::Testnet
            })
        ));
    }

    #[test]
    fn test_missing_head() {
        let owner = account(0x01, Network::Livenet);
        let result = TransferParams::new(*owner.account_number()).sign(&owner);
        assert!(matches!(
            result,
            Err(CoreError::Validation(ValidationError::MissingBitmark))
        ));
    }

    #[test]
    fn test_tampered_record_fails_verification() {
        let owner = account(0x01, Network::Livenet);
        let receiver = account(0x02, Network::Livenet);
        let mut signed = TransferParams::new(*receiver.account_number())
            .from_head(RecordId::from_bytes([3; 32]))
            .sign(&owner)
            .unwrap();
        signed.record.new_owner = *owner.account_number();
        assert!(matches!(signed.verify(), Err(CoreError::VerificationError)));
    }
}
