use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A contractor's monetary offer on a posted job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bid {
    /// Unique identifier for this bid.
    pub id: Uuid,
    /// The job this bid was placed on.
    pub job_id: Uuid,
    /// Identifier of the contractor who placed the bid.
    pub contractor_id: String,
    /// Offered amount in whole dollars. Positive by convention; priority
    /// scoring does not read it.
    pub amount: f64,
    /// When the bid was submitted.
    pub submitted_at: DateTime<Utc>,
}

impl Bid {
    /// Creates a new bid with a fresh id, stamped with the current time.
    pub fn new(job_id: Uuid, contractor_id: impl Into<String>, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            job_id,
            contractor_id: contractor_id.into(),
            amount,
            submitted_at: Utc::now(),
        }
    }
}

/// The slice of a contractor profile that priority scoring reads.
///
/// Scoring must be a pure function of `performance_score`, `bid_accuracy`
/// and `is_operator` — nothing else on the profile participates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contractor {
    pub id: String,
    /// Platform performance rating, nominally in 0..=10.
    #[serde(default)]
    pub performance_score: f64,
    /// Historical estimate accuracy as a ratio in 0..=1.
    #[serde(default)]
    pub bid_accuracy: f64,
    /// Elevated operator status (paid/approved tier).
    #[serde(default)]
    pub is_operator: bool,
}

impl Contractor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            performance_score: 0.0,
            bid_accuracy: 0.0,
            is_operator: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contractor_missing_numeric_fields_default_to_zero() {
        let c: Contractor = serde_json::from_str(r#"{"id": "c-1"}"#).unwrap();
        assert_eq!(c.performance_score, 0.0);
        assert_eq!(c.bid_accuracy, 0.0);
        assert!(!c.is_operator);
    }
}
