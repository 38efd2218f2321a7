// src/index/mod.rs
pub mod activity;
pub mod aggregator;

pub use activity::{load_activities, Activity};
pub use aggregator::{ActivitySummary, IndexEntry, LocationIndex};
