#![forbid(unsafe_code)]

pub mod claim_metrics;
pub mod claims;
pub mod pricing;
pub mod sled_claim_ledger;

pub use claims::{entity_hash, FreeClaimProgram, FREE_CLAIM_CAP};
pub use pricing::{calculate_territory_pricing, rurality_tier, tier_fees};
pub use sled_claim_ledger::SledClaimLedger;

use anyhow::Result;
use async_trait::async_trait;
use hearth_types::EntityClaimRecord;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

/// Error types specific to the territory module
#[derive(Error, Debug)]
pub enum TerritoryError {
    #[error("entity {0} has already claimed a free territory")]
    DuplicateEntityClaim(String),

    #[error("free claim cap of {cap} reached")]
    FreeClaimCapReached { cap: u64 },

    #[error(transparent)]
    Ledger(#[from] anyhow::Error),
}

/// Repository for recorded free-claim records.
///
/// Records are append-only: implementations never mutate or remove an
/// existing record, and keep at most one record per entity hash.
#[async_trait]
pub trait ClaimLedger: Send + Sync {
    /// Whether a record with this entity hash has been recorded.
    async fn contains(&self, entity_hash: &str) -> Result<bool>;

    /// Number of recorded claims.
    async fn count(&self) -> Result<u64>;

    /// All recorded claims, in unspecified order.
    async fn all_claims(&self) -> Result<Vec<EntityClaimRecord>>;

    /// Atomically insert the record if no record with the same entity hash
    /// exists. Returns `true` when the record was inserted, `false` when an
    /// existing record won. This is the only write primitive, so the
    /// one-claim-per-entity invariant holds under concurrent callers.
    async fn insert_if_absent(&self, record: EntityClaimRecord) -> Result<bool>;
}

/// In-memory implementation of the ClaimLedger trait for tests and
/// ephemeral use.
#[derive(Default)]
pub struct InMemoryClaimLedger {
    records: RwLock<HashMap<String, EntityClaimRecord>>,
}

#[async_trait]
impl ClaimLedger for InMemoryClaimLedger {
    async fn contains(&self, entity_hash: &str) -> Result<bool> {
        Ok(self.records.read().await.contains_key(entity_hash))
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.records.read().await.len() as u64)
    }

    async fn all_claims(&self) -> Result<Vec<EntityClaimRecord>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn insert_if_absent(&self, record: EntityClaimRecord) -> Result<bool> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.entity_hash) {
            return Ok(false);
        }
        records.insert(record.entity_hash.clone(), record);
        Ok(true)
    }
}
