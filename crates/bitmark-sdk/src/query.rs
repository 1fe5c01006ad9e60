//! Query builders for listing bitmarks, assets and transactions.
//!
//! Builders are plain values: every setter consumes the builder and returns
//! the updated one, and [`build`](BitmarkQueryBuilder::build) validates once
//! and yields an immutable [`Query`].
//!
//! ```
//! use bitmark_sdk::query::{BitmarkQueryBuilder, Query};
//!
//! let query = BitmarkQueryBuilder::new().pending(true).limit(10).build().unwrap();
//! assert!(matches!(query, Query::Bitmarks(_)));
//! ```

use std::fmt;

use thiserror::Error;

use bitmark_core::{AccountNumber, AssetId, RecordId};

/// Maximum page size the ledger API accepts.
pub const MAX_QUERY_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("limit {0} is outside 1..={MAX_QUERY_LIMIT}")]
    LimitOutOfRange(usize),

    #[error("{0} filter needs at least one id")]
    EmptyIdList(&'static str),
}

/// Paging direction relative to the `at` cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Earlier,
    Later,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Earlier => "earlier",
            Direction::Later => "later",
        })
    }
}

/// Cursor and page size shared by every query kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Paging {
    pub limit: Option<usize>,
    pub at: Option<u64>,
    pub direction: Direction,
}

impl Paging {
    fn validate(&self) -> Result<(), QueryError> {
        match self.limit {
            Some(limit) if limit == 0 || limit > MAX_QUERY_LIMIT => {
                Err(QueryError::LimitOutOfRange(limit))
            }
            _ => Ok(()),
        }
    }

    fn push_pairs(&self, pairs: &mut Vec<(&'static str, String)>) {
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(at) = self.at {
            pairs.push(("at", at.to_string()));
            pairs.push(("to", self.direction.to_string()));
        }
    }
}

/// A validated, immutable query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Bitmarks(BitmarkQuery),
    Assets(AssetQuery),
    Transactions(TransactionQuery),
}

impl Query {
    /// API path for this query kind.
    pub fn path(&self) -> &'static str {
        match self {
            Query::Bitmarks(_) => "/v3/bitmarks",
            Query::Assets(_) => "/v3/assets",
            Query::Transactions(_) => "/v3/txs",
        }
    }

    /// URL query parameters, in a stable order.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        match self {
            Query::Bitmarks(q) => {
                if let Some(owner) = &q.owner {
                    pairs.push(("owner", owner.to_string()));
                }
                if let Some(issuer) = &q.issuer {
                    pairs.push(("issuer", issuer.to_string()));
                }
                if let Some(asset_id) = &q.asset_id {
                    pairs.push(("asset_id", asset_id.to_hex()));
                }
                for id in &q.bitmark_ids {
                    pairs.push(("bitmark_ids", id.to_hex()));
                }
                if let Some(from) = &q.offer_from {
                    pairs.push(("offer_from", from.to_string()));
                }
                if let Some(to) = &q.offer_to {
                    pairs.push(("offer_to", to.to_string()));
                }
                pairs.push(("pending", q.pending.to_string()));
                if q.load_asset {
                    pairs.push(("asset", "true".into()));
                }
                q.paging.push_pairs(&mut pairs);
            }
            Query::Assets(q) => {
                if let Some(registrant) = &q.registrant {
                    pairs.push(("registrant", registrant.to_string()));
                }
                for id in &q.asset_ids {
                    pairs.push(("asset_ids", id.to_hex()));
                }
                pairs.push(("pending", q.pending.to_string()));
                q.paging.push_pairs(&mut pairs);
            }
            Query::Transactions(q) => {
                if let Some(owner) = &q.owner {
                    pairs.push(("owner", owner.to_string()));
                }
                if let Some(bitmark_id) = &q.bitmark_id {
                    pairs.push(("bitmark_id", bitmark_id.to_hex()));
                }
                if let Some(asset_id) = &q.asset_id {
                    pairs.push(("asset_id", asset_id.to_hex()));
                }
                if let Some(block) = q.block_number {
                    pairs.push(("block_number", block.to_string()));
                }
                pairs.push(("pending", q.pending.to_string()));
                if q.load_asset {
                    pairs.push(("asset", "true".into()));
                }
                q.paging.push_pairs(&mut pairs);
            }
        }
        pairs
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bitmarks
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmarkQuery {
    owner: Option<AccountNumber>,
    issuer: Option<AccountNumber>,
    asset_id: Option<AssetId>,
    bitmark_ids: Vec<RecordId>,
    offer_from: Option<AccountNumber>,
    offer_to: Option<AccountNumber>,
    pending: bool,
    load_asset: bool,
    paging: Paging,
}

impl BitmarkQuery {
    pub fn owner(&self) -> Option<&AccountNumber> {
        self.owner.as_ref()
    }

    pub fn bitmark_ids(&self) -> &[RecordId] {
        &self.bitmark_ids
    }

    pub fn paging(&self) -> &Paging {
        &self.paging
    }
}

#[derive(Debug, Clone, Default)]
pub struct BitmarkQueryBuilder {
    owner: Option<AccountNumber>,
    issuer: Option<AccountNumber>,
    asset_id: Option<AssetId>,
    bitmark_ids: Option<Vec<RecordId>>,
    offer_from: Option<AccountNumber>,
    offer_to: Option<AccountNumber>,
    pending: bool,
    load_asset: bool,
    paging: Paging,
}

impl BitmarkQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owned_by(mut self, owner: AccountNumber) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn issued_by(mut self, issuer: AccountNumber) -> Self {
        self.issuer = Some(issuer);
        self
    }

    pub fn referenced_asset(mut self, asset_id: AssetId) -> Self {
        self.asset_id = Some(asset_id);
        self
    }

    pub fn bitmark_ids(mut self, ids: Vec<RecordId>) -> Self {
        self.bitmark_ids = Some(ids);
        self
    }

    pub fn offer_from(mut self, sender: AccountNumber) -> Self {
        self.offer_from = Some(sender);
        self
    }

    pub fn offer_to(mut self, receiver: AccountNumber) -> Self {
        self.offer_to = Some(receiver);
        self
    }

    /// Include records the ledger has not confirmed yet.
    pub fn pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }

    pub fn load_asset(mut self, load: bool) -> Self {
        self.load_asset = load;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.paging.limit = Some(limit);
        self
    }

    pub fn at(mut self, at: u64) -> Self {
        self.paging.at = Some(at);
        self
    }

    pub fn to(mut self, direction: Direction) -> Self {
        self.paging.direction = direction;
        self
    }

    pub fn build(self) -> Result<Query, QueryError> {
        self.paging.validate()?;
        let bitmark_ids = match self.bitmark_ids {
            Some(ids) if ids.is_empty() => return Err(QueryError::EmptyIdList("bitmark_ids")),
            Some(ids) => ids,
            None => Vec::new(),
        };
        Ok(Query::Bitmarks(BitmarkQuery {
            owner: self.owner,
            issuer: self.issuer,
            asset_id: self.asset_id,
            bitmark_ids,
            offer_from: self.offer_from,
            offer_to: self.offer_to,
            pending: self.pending,
            load_asset: self.load_asset,
            paging: self.paging,
        }))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Assets
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetQuery {
    registrant: Option<AccountNumber>,
    asset_ids: Vec<AssetId>,
    pending: bool,
    paging: Paging,
}

impl AssetQuery {
    pub fn registrant(&self) -> Option<&AccountNumber> {
        self.registrant.as_ref()
    }

    pub fn asset_ids(&self) -> &[AssetId] {
        &self.asset_ids
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssetQueryBuilder {
    registrant: Option<AccountNumber>,
    asset_ids: Option<Vec<AssetId>>,
    pending: bool,
    paging: Paging,
}

impl AssetQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registered_by(mut self, registrant: AccountNumber) -> Self {
        self.registrant = Some(registrant);
        self
    }

    pub fn asset_ids(mut self, ids: Vec<AssetId>) -> Self {
        self.asset_ids = Some(ids);
        self
    }

    pub fn pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.paging.limit = Some(limit);
        self
    }

    pub fn at(mut self, at: u64) -> Self {
        self.paging.at = Some(at);
        self
    }

    pub fn to(mut self, direction: Direction) -> Self {
        self.paging.direction = direction;
        self
    }

    pub fn build(self) -> Result<Query, QueryError> {
        self.paging.validate()?;
        let asset_ids = match self.asset_ids {
            Some(ids) if ids.is_empty() => return Err(QueryError::EmptyIdList("asset_ids")),
            Some(ids) => ids,
            None => Vec::new(),
        };
        Ok(Query::Assets(AssetQuery {
            registrant: self.registrant,
            asset_ids,
            pending: self.pending,
            paging: self.paging,
        }))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transactions
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionQuery {
    owner: Option<AccountNumber>,
    bitmark_id: Option<RecordId>,
    asset_id: Option<AssetId>,
    block_number: Option<u64>,
    pending: bool,
    load_asset: bool,
    paging: Paging,
}

impl TransactionQuery {
    pub fn owner(&self) -> Option<&AccountNumber> {
        self.owner.as_ref()
    }

    pub fn bitmark_id(&self) -> Option<&RecordId> {
        self.bitmark_id.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransactionQueryBuilder {
    owner: Option<AccountNumber>,
    bitmark_id: Option<RecordId>,
    asset_id: Option<AssetId>,
    block_number: Option<u64>,
    pending: bool,
    load_asset: bool,
    paging: Paging,
}

impl TransactionQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owned_by(mut self, owner: AccountNumber) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn referenced_bitmark(mut self, bitmark_id: RecordId) -> Self {
        self.bitmark_id = Some(bitmark_id);
        self
    }

    pub fn referenced_asset(mut self, asset_id: AssetId) -> Self {
        self.asset_id = Some(asset_id);
        self
    }

    pub fn referenced_block_number(mut self, block: u64) -> Self {
        self.block_number = Some(block);
        self
    }

    pub fn pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }

    pub fn load_asset(mut self, load: bool) -> Self {
        self.load_asset = load;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.paging.limit = Some(limit);
        self
    }

    pub fn at(mut self, at: u64) -> Self {
        self.paging.at = Some(at);
        self
    }

    pub fn to(mut self, direction: Direction) -> Self {
        self.paging.direction = direction;
        self
    }

    pub fn build(self) -> Result<Query, QueryError> {
        self.paging.validate()?;
        Ok(Query::Transactions(TransactionQuery {
            owner: self.owner,
            bitmark_id: self.bitmark_id,
            asset_id: self.asset_id,
            block_number: self.block_number,
            pending: self.pending,
            load_asset: self.load_asset,
            paging: self.paging,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitmark_core::{Account, Network, Seed};

    fn owner() -> AccountNumber {
        *Account::from_seed(Seed::from_core([0x01; 16], Network::Testnet)).account_number()
    }

    #[test]
    fn test_limit_bounds() {
        assert!(BitmarkQueryBuilder::new().limit(1).build().is_ok());
        assert!(BitmarkQueryBuilder::new().limit(100).build().is_ok());
        assert_eq!(
            AssetQueryBuilder::new().limit(0).build(),
            Err(QueryError::LimitOutOfRange(0))
        );
        assert_eq!(
            TransactionQueryBuilder::new().limit(101).build(),
            Err(QueryError::LimitOutOfRange(101))
        );
    }

    #[test]
    fn test_empty_id_filters_rejected() {
        assert_eq!(
            AssetQueryBuilder::new().asset_ids(vec![]).build(),
            Err(QueryError::EmptyIdList("asset_ids"))
        );
        assert_eq!(
            BitmarkQueryBuilder::new().bitmark_ids(vec![]).build(),
            Err(QueryError::EmptyIdList("bitmark_ids"))
        );
    }

    #[test]
    fn test_builders_do_not_share_state() {
        let base = BitmarkQueryBuilder::new().pending(true);
        let mine = base.clone().owned_by(owner()).build().unwrap();
        let all = base.build().unwrap();
        assert_ne!(mine, all);
        match all {
            Query::Bitmarks(q) => assert!(q.owner().is_none()),
            other => panic!("unexpected query {:?}", other),
        }
    }

    #[test]
    fn test_query_pairs() {
        let query = BitmarkQueryBuilder::new()
            .owned_by(owner())
            .pending(true)
            .limit(5)
            .at(42)
            .to(Direction::Later)
            .build()
            .unwrap();
        assert_eq!(query.path(), "/v3/bitmarks");
        let pairs = query.to_query_pairs();
        assert_eq!(pairs[0], ("owner", owner().to_string()));
        assert!(pairs.contains(&("pending", "true".to_string())));
        assert!(pairs.contains(&("limit", "5".to_string())));
        assert!(pairs.contains(&("at", "42".to_string())));
        assert!(pairs.contains(&("to", "later".to_string())));
    }

    #[test]
    fn test_asset_query_by_registrant() {
        let query = AssetQueryBuilder::new()
            .registered_by(owner())
            .build()
            .unwrap();
        match &query {
            Query::Assets(q) => assert_eq!(q.registrant(), Some(&owner())),
            other => panic!("unexpected query {:?}", other),
        }
        assert_eq!(query.path(), "/v3/assets");
    }
}
