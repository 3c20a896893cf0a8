use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Legal form of the entity claiming a territory.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntityType {
    Individual,
    Llc,
    Corporation,
}

/// Identifying details of a legal entity, independent of which user account
/// acts on its behalf. Input to the entity fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityInfo {
    pub entity_type: EntityType,
    pub email: String,
    #[serde(default)]
    pub tax_id: Option<String>,
}

impl EntityInfo {
    pub fn new(entity_type: EntityType, email: impl Into<String>) -> Self {
        Self {
            entity_type,
            email: email.into(),
            tax_id: None,
        }
    }

    pub fn with_tax_id(mut self, tax_id: impl Into<String>) -> Self {
        self.tax_id = Some(tax_id.into());
        self
    }
}

/// Persisted proof that a legal entity has consumed its one free territory
/// claim. Records are append-only; at most one exists per `entity_hash`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityClaimRecord {
    /// Stable fingerprint of the claiming entity.
    pub entity_hash: String,
    /// User account that performed the claim.
    pub user_id: String,
    /// Territory that was claimed.
    pub territory_id: u64,
    pub claimed_at: DateTime<Utc>,
}

impl EntityClaimRecord {
    /// Creates a record stamped with the current time.
    pub fn new(
        entity_hash: impl Into<String>,
        user_id: impl Into<String>,
        territory_id: u64,
    ) -> Self {
        Self {
            entity_hash: entity_hash.into(),
            user_id: user_id.into(),
            territory_id,
            claimed_at: Utc::now(),
        }
    }
}
