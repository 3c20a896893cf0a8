#![forbid(unsafe_code)]

pub mod scoring;

pub use scoring::{calculate_bid_score, sort_bids_by_priority, OPERATOR_BOOST};
