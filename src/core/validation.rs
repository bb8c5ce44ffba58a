use serde::{Deserialize, Serialize};

use crate::core::matcher::MatchMap;
use crate::models::{Profile, ValidationReport};

/// Reference match count used by the fixed baseline
pub const FIXED_VALIDATION_TARGET: usize = 7;

/// Which per-user match count counts as "enough"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationBaseline {
    /// The run's configured `num_matches`
    #[default]
    Configured,
    /// Always [`FIXED_VALIDATION_TARGET`]
    Fixed,
}

impl ValidationBaseline {
    pub fn target(self, num_matches: usize) -> usize {
        match self {
            ValidationBaseline::Configured => num_matches,
            ValidationBaseline::Fixed => FIXED_VALIDATION_TARGET,
        }
    }
}

/// Aggregate statistics over a run's matches. Never touches the matches.
pub fn validate_matches(matches: &MatchMap, users: &[Profile], target: usize) -> ValidationReport {
    let total_users = matches.len();
    let total_matches: usize = matches.values().map(Vec::len).sum();

    let scores: Vec<f64> = matches
        .values()
        .flat_map(|list| list.iter().map(|m| m.score))
        .collect();

    let (avg_compatibility, min_compatibility, max_compatibility) = if scores.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        let sum: f64 = scores.iter().sum();
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (sum / scores.len() as f64, min, max)
    };

    let users_with_fewer_matches = matches.values().filter(|list| list.len() < target).count();

    let avg_matches_per_user = if total_users > 0 {
        total_matches as f64 / total_users as f64
    } else {
        0.0
    };

    if users_with_fewer_matches > 0 {
        tracing::debug!(
            "{} of {} users received fewer than {} matches",
            users_with_fewer_matches,
            total_users,
            target
        );
    }

    ValidationReport {
        total_users,
        total_participants: users.len(),
        total_matches,
        avg_matches_per_user,
        avg_compatibility,
        min_compatibility,
        max_compatibility,
        users_with_fewer_matches,
        target_matches: target,
        success: users_with_fewer_matches == 0,
    }
}
