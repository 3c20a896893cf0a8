use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Four-level population classification of a sales territory.
///
/// Drives the fee schedule; ordering is from least to most populous.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RuralityTier {
    Rural,
    Small,
    Medium,
    Metro,
}

/// A geographic sales territory.
///
/// Created by an external catalog/import process; read-only to the pricing
/// engine apart from free-claim bookkeeping held elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Territory {
    pub id: u64,
    pub name: String,
    pub population: u64,
    /// Manual tier override set upstream. When present it is honored as-is
    /// and never recomputed from `population`.
    #[serde(default)]
    pub rurality_classification: Option<RuralityTier>,
    /// Pre-computed projected annual job output. When absent, derived as
    /// `population * 500`.
    #[serde(default)]
    pub projected_job_output: Option<u64>,
}

impl Territory {
    pub fn new(id: u64, name: impl Into<String>, population: u64) -> Self {
        Self {
            id,
            name: name.into(),
            population,
            rurality_classification: None,
            projected_job_output: None,
        }
    }
}

/// Fee quote for one territory, as returned by the pricing engine.
///
/// Carries `is_free` so downstream consumers do not need to re-derive it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PricingInfo {
    pub rurality_tier: RuralityTier,
    /// One-time claim fee in whole dollars.
    pub one_time_fee: u64,
    /// Recurring monthly fee in whole dollars.
    pub monthly_fee: u64,
    /// `one_time_fee + monthly_fee * 12`, or `0` when free.
    pub total_first_year: u64,
    pub projected_job_output: u64,
    pub is_free: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn tier_round_trips_through_serde_lowercase() {
        let json = serde_json::to_string(&RuralityTier::Metro).unwrap();
        assert_eq!(json, "\"metro\"");
        let tier: RuralityTier = serde_json::from_str("\"small\"").unwrap();
        assert_eq!(tier, RuralityTier::Small);
    }

    #[test]
    fn tier_display_and_parse_agree() {
        for tier in [
            RuralityTier::Rural,
            RuralityTier::Small,
            RuralityTier::Medium,
            RuralityTier::Metro,
        ] {
            assert_eq!(RuralityTier::from_str(&tier.to_string()).unwrap(), tier);
        }
    }

    #[test]
    fn territory_deserializes_without_optional_fields() {
        let t: Territory =
            serde_json::from_str(r#"{"id": 7, "name": "Red Hook", "population": 42000}"#).unwrap();
        assert_eq!(t.rurality_classification, None);
        assert_eq!(t.projected_job_output, None);
    }
}
