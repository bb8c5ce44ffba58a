use thiserror::Error;

/// Errors raised while configuring a matching run
///
/// Scoring itself never fails; missing or malformed survey data degrades to
/// neutral defaults instead.
#[derive(Debug, Error, PartialEq)]
pub enum MatchingError {
    #[error("num_matches must be at least 1, got {0}")]
    InvalidMatchCount(usize),

    #[error("invalid weight for category '{category}': {value}")]
    InvalidWeight { category: String, value: f64 },
}
