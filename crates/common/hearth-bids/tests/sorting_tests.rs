use hearth_bids::{calculate_bid_score, sort_bids_by_priority};
use hearth_types::{Bid, Contractor};
use std::collections::HashMap;
use uuid::Uuid;

fn contractor(id: &str, performance: f64, accuracy: f64, operator: bool) -> Contractor {
    Contractor {
        id: id.to_string(),
        performance_score: performance,
        bid_accuracy: accuracy,
        is_operator: operator,
    }
}

fn bid(contractor_id: &str, amount: f64) -> Bid {
    Bid::new(Uuid::new_v4(), contractor_id, amount)
}

fn lookup(contractors: Vec<Contractor>) -> HashMap<String, Contractor> {
    contractors.into_iter().map(|c| (c.id.clone(), c)).collect()
}

#[test]
fn sorts_by_descending_score() {
    let contractors = lookup(vec![
        contractor("low", 2.0, 0.3, false),
        contractor("high", 9.0, 0.95, true),
        contractor("mid", 6.0, 0.6, false),
    ]);
    let bids = vec![bid("low", 100.0), bid("high", 250.0), bid("mid", 175.0)];

    let sorted = sort_bids_by_priority(&bids, &contractors);

    let order: Vec<&str> = sorted.iter().map(|b| b.contractor_id.as_str()).collect();
    assert_eq!(order, vec!["high", "mid", "low"]);
}

#[test]
fn equal_scores_preserve_submission_order() {
    // Same profile, distinct contractors: identical scores.
    let contractors = lookup(vec![
        contractor("a", 5.0, 0.5, false),
        contractor("b", 5.0, 0.5, false),
        contractor("c", 5.0, 0.5, false),
    ]);
    let bids = vec![bid("a", 90.0), bid("b", 110.0), bid("c", 100.0)];
    let ids: Vec<Uuid> = bids.iter().map(|b| b.id).collect();

    let sorted = sort_bids_by_priority(&bids, &contractors);

    let sorted_ids: Vec<Uuid> = sorted.iter().map(|b| b.id).collect();
    assert_eq!(sorted_ids, ids);
}

#[test]
fn empty_input_returns_empty_output() {
    let sorted = sort_bids_by_priority(&[], &HashMap::new());
    assert!(sorted.is_empty());
}

#[test]
fn unknown_contractor_sorts_last_without_panicking() {
    let contractors = lookup(vec![contractor("known", 1.0, 0.1, false)]);
    let bids = vec![bid("ghost", 500.0), bid("known", 50.0)];

    let sorted = sort_bids_by_priority(&bids, &contractors);

    assert_eq!(sorted.len(), 2);
    assert_eq!(sorted[0].contractor_id, "known");
    assert_eq!(sorted[1].contractor_id, "ghost");
}

#[test]
fn unknown_contractor_ties_with_zero_score_profile() {
    // An absent profile and an all-zero profile both score 0; the earlier
    // bid must stay first.
    let contractors = lookup(vec![contractor("zero", 0.0, 0.0, false)]);
    let bids = vec![bid("zero", 10.0), bid("ghost", 20.0)];

    let sorted = sort_bids_by_priority(&bids, &contractors);

    assert_eq!(sorted[0].contractor_id, "zero");
    assert_eq!(sorted[1].contractor_id, "ghost");
}

#[test]
fn operator_outranks_identical_non_operator() {
    let contractors = lookup(vec![
        contractor("plain", 8.0, 0.8, false),
        contractor("op", 8.0, 0.8, true),
    ]);
    assert!(
        calculate_bid_score(&contractors["op"]) > calculate_bid_score(&contractors["plain"])
    );

    let bids = vec![bid("plain", 100.0), bid("op", 100.0)];
    let sorted = sort_bids_by_priority(&bids, &contractors);
    assert_eq!(sorted[0].contractor_id, "op");
}

#[test]
fn input_slice_is_left_untouched() {
    let contractors = lookup(vec![
        contractor("a", 1.0, 0.0, false),
        contractor("b", 9.0, 0.9, false),
    ]);
    let bids = vec![bid("a", 10.0), bid("b", 20.0)];
    let before = bids.clone();

    let _ = sort_bids_by_priority(&bids, &contractors);

    assert_eq!(bids, before);
}
