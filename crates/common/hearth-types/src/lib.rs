#![forbid(unsafe_code)]

pub mod bid;
pub mod entity;
pub mod territory;

pub use bid::{Bid, Contractor};
pub use entity::{EntityClaimRecord, EntityInfo, EntityType};
pub use territory::{PricingInfo, RuralityTier, Territory};
