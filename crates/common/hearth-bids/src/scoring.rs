use hearth_types::{Bid, Contractor};
use std::collections::HashMap;

/// Fixed boost added to the score of a contractor with operator status.
pub const OPERATOR_BOOST: f64 = 0.2;

/// Performance and accuracy contribute equally once both sit on the
/// common 0-10 scale.
const PERFORMANCE_WEIGHT: f64 = 0.5;
const ACCURACY_WEIGHT: f64 = 0.5;

/// Negative and non-finite ratings are treated as zero. The upstream data
/// never clamps the top end, so values above the nominal domain pass
/// through unchanged.
fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Computes the priority score for a contractor's bids.
///
/// `performance_score` (nominally 0-10) and `bid_accuracy` (0-1, scaled onto
/// 0-10) are combined 50/50 into a base score, then [`OPERATOR_BOOST`] is
/// added for operators. A zeroed non-operator profile scores exactly `0.0`.
pub fn calculate_bid_score(contractor: &Contractor) -> f64 {
    let performance = sanitize(contractor.performance_score);
    let accuracy = sanitize(contractor.bid_accuracy) * 10.0;
    let base = performance * PERFORMANCE_WEIGHT + accuracy * ACCURACY_WEIGHT;
    if contractor.is_operator {
        base + OPERATOR_BOOST
    } else {
        base
    }
}

/// Returns `bids` reordered by descending priority score.
///
/// A bid whose `contractor_id` has no entry in `contractors_by_id` scores
/// `0.0` and sinks to the bottom rather than failing the sort. Ties keep
/// their original relative order; there is no secondary tie-break field.
pub fn sort_bids_by_priority(
    bids: &[Bid],
    contractors_by_id: &HashMap<String, Contractor>,
) -> Vec<Bid> {
    let mut scored: Vec<(f64, &Bid)> = bids
        .iter()
        .map(|bid| {
            let score = contractors_by_id
                .get(&bid.contractor_id)
                .map(calculate_bid_score)
                .unwrap_or(0.0);
            (score, bid)
        })
        .collect();

    // sort_by is stable, and sanitize() guarantees the keys are never NaN,
    // so total_cmp gives a well-defined descending order.
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    scored.into_iter().map(|(_, bid)| bid.clone()).collect()
}
