// Core algorithm exports
pub mod crush;
pub mod error;
pub mod filters;
pub mod matcher;
pub mod matrix;
pub mod pools;
pub mod scoring;
pub mod validation;

pub use crush::{calculate_crush_bonus, CrushIndex, CrushStatus};
pub use error::MatchingError;
pub use filters::{is_pool_eligible, meets_preferences};
pub use matcher::{create_match_records, MatchMap, MatchingEngine, MatchingOutcome, DEFAULT_NUM_MATCHES, MIN_MATCH_SCORE};
pub use matrix::CompatibilityMatrix;
pub use pools::{partition_pools, Pool, PoolStrategy};
pub use scoring::{category_scores, CategoryScores, CompatibilityScorer};
pub use validation::{validate_matches, ValidationBaseline};
