use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use validator::{Validate, ValidationError};

use crate::models::domain::{CrushEntry, Profile};

/// Request to run matching over a campaign snapshot
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RunMatchingRequest {
    #[validate(length(min = 1))]
    pub campaign_id: String,
    #[serde(default)]
    #[validate(custom(function = "validate_unique_ids"))]
    pub users: Vec<Profile>,
    #[serde(default, alias = "crush_lists")]
    pub crushes: Vec<CrushEntry>,
    #[validate(range(min = 1))]
    pub num_matches: Option<usize>,
    #[serde(default)]
    pub weights: Option<HashMap<String, f64>>,
}

fn validate_unique_ids(users: &Vec<Profile>) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(users.len());
    for user in users {
        if user.id.is_empty() {
            return Err(ValidationError::new("empty_user_id"));
        }
        if !seen.insert(user.id.as_str()) {
            let mut error = ValidationError::new("duplicate_user_id");
            error.add_param("id".into(), &user.id);
            return Err(error);
        }
    }
    Ok(())
}
