use crate::{ClaimLedger, TerritoryError};
use hearth_types::{EntityClaimRecord, EntityInfo};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, info};

/// Global cap on promotional free claims.
pub const FREE_CLAIM_CAP: u64 = 300;

/// Deterministic fingerprint of a legal entity.
///
/// Derived from `(entity_type, email, tax_id-or-empty)` so the same entity
/// hashes identically no matter which user account performs the claim.
/// Email is trimmed and lowercased before hashing; tax ids are trimmed.
/// Total function: never fails.
pub fn entity_hash(entity: &EntityInfo) -> String {
    let mut hasher = Sha256::new();
    hasher.update(entity.entity_type.to_string().as_bytes());
    hasher.update(b"|");
    hasher.update(entity.email.trim().to_lowercase().as_bytes());
    hasher.update(b"|");
    hasher.update(entity.tax_id.as_deref().unwrap_or("").trim().as_bytes());
    hex::encode(hasher.finalize())
}

/// Enforces the "first 300 free" program: one free territory per legal
/// entity, at most [`FREE_CLAIM_CAP`] free claims overall.
///
/// All state lives in the injected [`ClaimLedger`]; the program itself is
/// stateless.
pub struct FreeClaimProgram {
    ledger: Arc<dyn ClaimLedger>,
}

impl FreeClaimProgram {
    pub fn new(ledger: Arc<dyn ClaimLedger>) -> Self {
        Self { ledger }
    }

    /// Whether this entity still has its free claim available.
    ///
    /// Checks the entity fingerprint only; the global cap is a separate
    /// check ([`Self::check_first_300_availability`]) that callers combine
    /// with this one.
    pub async fn can_claim_free(
        &self,
        user_id: &str,
        entity: &EntityInfo,
    ) -> Result<bool, TerritoryError> {
        let hash = entity_hash(entity);
        let claimed = self.ledger.contains(&hash).await?;
        debug!(user_id, entity_hash = %hash, claimed, "checked free-claim eligibility");
        Ok(!claimed)
    }

    /// Whether the global promotional pool still has slots.
    pub async fn check_first_300_availability(&self) -> Result<bool, TerritoryError> {
        Ok(self.ledger.count().await? < FREE_CLAIM_CAP)
    }

    /// Free-claim slots left in the promotional pool.
    pub async fn claims_remaining(&self) -> Result<u64, TerritoryError> {
        Ok(FREE_CLAIM_CAP.saturating_sub(self.ledger.count().await?))
    }

    /// Appends the claim record for this entity.
    ///
    /// Append-only: existing records are never touched. The insert is
    /// atomic on the entity hash, so two concurrent claims for one entity
    /// resolve to a single record and a [`TerritoryError::DuplicateEntityClaim`]
    /// for the loser. Does not re-check the global cap; use
    /// [`Self::claim_free`] for the full guarded path.
    pub async fn record_free_claim(
        &self,
        user_id: &str,
        entity: &EntityInfo,
        territory_id: u64,
    ) -> Result<EntityClaimRecord, TerritoryError> {
        let hash = entity_hash(entity);
        let record = EntityClaimRecord::new(hash.clone(), user_id, territory_id);

        if !self.ledger.insert_if_absent(record.clone()).await? {
            return Err(TerritoryError::DuplicateEntityClaim(hash));
        }

        info!(user_id, territory_id, entity_hash = %hash, "recorded free territory claim");
        Ok(record)
    }

    /// Full guarded claim: verifies the global cap, then records the claim
    /// for the entity.
    pub async fn claim_free(
        &self,
        user_id: &str,
        entity: &EntityInfo,
        territory_id: u64,
    ) -> Result<EntityClaimRecord, TerritoryError> {
        if !self.check_first_300_availability().await? {
            return Err(TerritoryError::FreeClaimCapReached {
                cap: FREE_CLAIM_CAP,
            });
        }
        self.record_free_claim(user_id, entity, territory_id).await
    }
}
