use crate::claim_metrics::{
    CLAIM_LEDGER_ERRORS_TOTAL, CLAIM_LEDGER_OPERATIONS_TOTAL, FREE_CLAIMS_RECORDED_TOTAL,
};
use crate::ClaimLedger;
use anyhow::{Context, Result};
use async_trait::async_trait;
use hearth_types::EntityClaimRecord;
use sled::Db;
use tracing::{error, warn};

const CLAIMS_TREE_NAME: &str = "free_claims";

/// A ClaimLedger implementation using Sled persistent storage.
///
/// Records are keyed by entity hash, so the one-record-per-entity invariant
/// is enforced by the key space itself; inserts go through
/// `compare_and_swap` to stay atomic under concurrent claimers.
///
/// Reads fail open: an unreadable store reports no claims. Writes fail
/// loud: a silently dropped claim record would break the uniqueness
/// invariant, so storage errors propagate to the caller.
#[derive(Clone)] // Clone is possible because sled::Db is Arc internally
pub struct SledClaimLedger {
    db: Db,
}

impl SledClaimLedger {
    /// Opens or creates a Sled database at the given path for the claim ledger.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let db = sled::open(path).context("Failed to open Sled database for claim ledger")?;
        db.open_tree(CLAIMS_TREE_NAME)
            .context("Failed to open free_claims tree in Sled database")?;
        Ok(Self { db })
    }

    fn tree(&self) -> Result<sled::Tree> {
        self.db
            .open_tree(CLAIMS_TREE_NAME)
            .context("Failed to access free_claims tree in Sled database")
    }
}

#[async_trait]
impl ClaimLedger for SledClaimLedger {
    async fn contains(&self, entity_hash: &str) -> Result<bool> {
        let tree = match self.tree() {
            Ok(tree) => tree,
            Err(e) => {
                CLAIM_LEDGER_ERRORS_TOTAL
                    .with_label_values(&["sled", "contains", "io"])
                    .inc();
                warn!(entity_hash, error = %e, "Claim tree unavailable, reading as empty");
                return Ok(false);
            }
        };

        match tree.contains_key(entity_hash.as_bytes()) {
            Ok(found) => {
                CLAIM_LEDGER_OPERATIONS_TOTAL
                    .with_label_values(&["sled", "contains", "success"])
                    .inc();
                Ok(found)
            }
            Err(e) => {
                CLAIM_LEDGER_ERRORS_TOTAL
                    .with_label_values(&["sled", "contains", "io"])
                    .inc();
                warn!(entity_hash, error = %e, "Claim lookup failed, reading as absent");
                Ok(false)
            }
        }
    }

    async fn count(&self) -> Result<u64> {
        match self.tree() {
            Ok(tree) => {
                CLAIM_LEDGER_OPERATIONS_TOTAL
                    .with_label_values(&["sled", "count", "success"])
                    .inc();
                Ok(tree.len() as u64)
            }
            Err(e) => {
                CLAIM_LEDGER_ERRORS_TOTAL
                    .with_label_values(&["sled", "count", "io"])
                    .inc();
                warn!(error = %e, "Claim tree unavailable, counting as empty");
                Ok(0)
            }
        }
    }

    async fn all_claims(&self) -> Result<Vec<EntityClaimRecord>> {
        let tree = match self.tree() {
            Ok(tree) => tree,
            Err(e) => {
                CLAIM_LEDGER_ERRORS_TOTAL
                    .with_label_values(&["sled", "list", "io"])
                    .inc();
                warn!(error = %e, "Claim tree unavailable, listing no claims");
                return Ok(Vec::new());
            }
        };

        let mut claims = Vec::new();
        for item in tree.iter() {
            match item {
                Ok((_key, value)) => match bincode::deserialize::<EntityClaimRecord>(&value) {
                    Ok(record) => claims.push(record),
                    Err(e) => {
                        // Skip the record rather than poison the whole read.
                        CLAIM_LEDGER_ERRORS_TOTAL
                            .with_label_values(&["sled", "list", "deserialization"])
                            .inc();
                        warn!(error = %e, "Skipping undecodable claim record");
                    }
                },
                Err(e) => {
                    CLAIM_LEDGER_ERRORS_TOTAL
                        .with_label_values(&["sled", "list", "io"])
                        .inc();
                    warn!(error = %e, "Claim iteration failed, returning partial list");
                    break;
                }
            }
        }

        CLAIM_LEDGER_OPERATIONS_TOTAL
            .with_label_values(&["sled", "list", "success"])
            .inc();
        Ok(claims)
    }

    async fn insert_if_absent(&self, record: EntityClaimRecord) -> Result<bool> {
        let tree = self.tree().map_err(|e| {
            CLAIM_LEDGER_ERRORS_TOTAL
                .with_label_values(&["sled", "insert", "io"])
                .inc();
            e
        })?;

        let bytes = bincode::serialize(&record).map_err(|e| {
            CLAIM_LEDGER_ERRORS_TOTAL
                .with_label_values(&["sled", "insert", "serialization"])
                .inc();
            error!(entity_hash = %record.entity_hash, error = %e, "Failed to serialize claim record");
            anyhow::anyhow!(
                "Serialization error for claim record {}: {}",
                record.entity_hash,
                e
            )
        })?;

        let swap = tree
            .compare_and_swap(record.entity_hash.as_bytes(), None::<&[u8]>, Some(bytes))
            .map_err(|e| {
                CLAIM_LEDGER_ERRORS_TOTAL
                    .with_label_values(&["sled", "insert", "io"])
                    .inc();
                error!(entity_hash = %record.entity_hash, error = %e, "Failed to insert claim record");
                anyhow::anyhow!(
                    "Sled insert I/O error for claim {}: {}",
                    record.entity_hash,
                    e
                )
            })?;

        match swap {
            Ok(()) => {
                tree.flush_async()
                    .await
                    .context("Failed to flush claim ledger after insert")?;
                CLAIM_LEDGER_OPERATIONS_TOTAL
                    .with_label_values(&["sled", "insert", "success"])
                    .inc();
                FREE_CLAIMS_RECORDED_TOTAL.inc();
                Ok(true)
            }
            Err(_existing) => {
                // Lost the swap: a record for this entity already exists.
                CLAIM_LEDGER_OPERATIONS_TOTAL
                    .with_label_values(&["sled", "insert", "duplicate"])
                    .inc();
                Ok(false)
            }
        }
    }
}
