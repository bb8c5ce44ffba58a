use serde::{Deserialize, Serialize};

use crate::core::MatchMap;
use crate::models::domain::{MatchRecord, Profile, ValidationReport};

/// Response for the run matching endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMatchingResponse {
    pub success: bool,
    pub message: String,
    pub run_id: uuid::Uuid,
    pub campaign_id: String,
    pub total_users: usize,
    pub total_matches_generated: usize,
    pub stats: ValidationReport,
    pub matches: Vec<MatchRecord>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Response for the fixture matching endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestMatchingResponse {
    pub users: Vec<Profile>,
    pub matches: MatchMap,
    pub stats: ValidationReport,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
