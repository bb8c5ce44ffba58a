//! Cohort Match - compatibility matching for campaign rounds
//!
//! This library scores every eligible pair within a cohort and selects a
//! bounded, ranked set of matches per member for one campaign.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use core::{MatchingEngine, MatchingOutcome, MatchingError, CompatibilityScorer, PoolStrategy};
pub use models::{Profile, CrushEntry, MatchRecord, ValidationReport, CategoryWeights, RunMatchingRequest, RunMatchingResponse};
