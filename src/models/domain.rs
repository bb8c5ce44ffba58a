use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::core::error::MatchingError;

/// Neutral midpoint of the 1-5 survey scale
pub const NEUTRAL_SCALE_ANSWER: i64 = 3;

/// Self-reported gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    PreferNotSay,
}

/// Academic year, ordered from first year to graduate studies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>")]
pub enum AcademicYear {
    #[serde(rename = "1st_year")]
    First,
    #[serde(rename = "2nd_year")]
    Second,
    #[serde(rename = "3rd_year")]
    Third,
    #[serde(rename = "4th_year")]
    Fourth,
    #[serde(rename = "5th_year")]
    Fifth,
    #[serde(rename = "graduate")]
    Graduate,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl AcademicYear {
    /// Ordinal 1-6, or `None` when the year is unknown
    pub fn ordinal(self) -> Option<u8> {
        match self {
            AcademicYear::First => Some(1),
            AcademicYear::Second => Some(2),
            AcademicYear::Third => Some(3),
            AcademicYear::Fourth => Some(4),
            AcademicYear::Fifth => Some(5),
            AcademicYear::Graduate => Some(6),
            AcademicYear::Unknown => None,
        }
    }
}

impl From<&str> for AcademicYear {
    fn from(value: &str) -> Self {
        match value {
            "1st_year" => AcademicYear::First,
            "2nd_year" => AcademicYear::Second,
            "3rd_year" => AcademicYear::Third,
            "4th_year" => AcademicYear::Fourth,
            "5th_year" => AcademicYear::Fifth,
            "graduate" => AcademicYear::Graduate,
            _ => AcademicYear::Unknown,
        }
    }
}

impl From<Option<String>> for AcademicYear {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(AcademicYear::from).unwrap_or_default()
    }
}

/// A single survey answer: a 1-5 scale value or a categorical choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SurveyAnswer {
    Scale(i64),
    Choice(String),
    Other(serde_json::Value),
}

impl SurveyAnswer {
    /// Integer reading of the answer
    ///
    /// Numeric strings such as "4" and whole floats such as 4.0 are accepted.
    pub fn as_scale(&self) -> Option<i64> {
        match self {
            SurveyAnswer::Scale(value) => Some(*value),
            SurveyAnswer::Choice(text) => text.trim().parse().ok(),
            SurveyAnswer::Other(serde_json::Value::Number(number)) => number
                .as_f64()
                .filter(|value| value.is_finite() && value.fract() == 0.0)
                .map(|value| value as i64),
            SurveyAnswer::Other(_) => None,
        }
    }

    pub fn as_choice(&self) -> Option<&str> {
        match self {
            SurveyAnswer::Choice(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

impl From<i64> for SurveyAnswer {
    fn from(value: i64) -> Self {
        SurveyAnswer::Scale(value)
    }
}

impl From<&str> for SurveyAnswer {
    fn from(value: &str) -> Self {
        SurveyAnswer::Choice(value.to_string())
    }
}

/// Normalized participant profile for one matching run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Empty means open to all genders
    #[serde(default, deserialize_with = "null_as_default")]
    pub seeking_gender: BTreeSet<Gender>,
    #[serde(default)]
    pub year: AcademicYear,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub responses: HashMap<String, SurveyAnswer>,
    #[serde(
        default,
        rename = "interests_hobbies",
        alias = "interests",
        deserialize_with = "null_as_default"
    )]
    pub interests: BTreeSet<String>,
}

impl Profile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            gender: None,
            seeking_gender: BTreeSet::new(),
            year: AcademicYear::Unknown,
            major: None,
            responses: HashMap::new(),
            interests: BTreeSet::new(),
        }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn seeking(mut self, genders: impl IntoIterator<Item = Gender>) -> Self {
        self.seeking_gender = genders.into_iter().collect();
        self
    }

    pub fn with_year(mut self, year: AcademicYear) -> Self {
        self.year = year;
        self
    }

    pub fn with_major(mut self, major: impl Into<String>) -> Self {
        self.major = Some(major.into());
        self
    }

    pub fn with_response(mut self, question_id: &str, answer: impl Into<SurveyAnswer>) -> Self {
        self.responses.insert(question_id.to_string(), answer.into());
        self
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    /// Scale answer clamped to 1-5, neutral 3 when missing or unreadable
    pub fn scale_answer(&self, question_id: &str) -> i64 {
        self.responses
            .get(question_id)
            .and_then(SurveyAnswer::as_scale)
            .map(|value| value.clamp(1, 5))
            .unwrap_or(NEUTRAL_SCALE_ANSWER)
    }

    pub fn choice_answer(&self, question_id: &str) -> Option<&str> {
        self.responses.get(question_id).and_then(SurveyAnswer::as_choice)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One-directional crush declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrushEntry {
    #[serde(rename = "user_id", alias = "source_user_id")]
    pub source_user_id: String,
    #[serde(rename = "crush_target_id", alias = "target_user_id")]
    pub target_user_id: String,
}

impl CrushEntry {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source_user_id: source.into(),
            target_user_id: target.into(),
        }
    }
}

/// Ranked candidate for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub user_id: String,
    pub matched_user_id: String,
    pub score: f64,
    /// Dense, 1-based
    pub rank: usize,
    #[serde(default)]
    pub is_mutual_crush: bool,
}

/// Persistable, undirected match for a campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub campaign_id: String,
    pub user_a_id: String,
    pub user_b_id: String,
    #[serde(rename = "compatibility_score")]
    pub score: f64,
    pub rank_for_a: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank_for_b: Option<usize>,
    pub is_mutual_crush: bool,
}

/// Aggregate quality statistics over a run's matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub total_users: usize,
    pub total_participants: usize,
    pub total_matches: usize,
    pub avg_matches_per_user: f64,
    pub avg_compatibility: f64,
    pub min_compatibility: f64,
    pub max_compatibility: f64,
    pub users_with_fewer_matches: usize,
    pub target_matches: usize,
    pub success: bool,
}

/// Scoring categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Demographics,
    Personality,
    Values,
    Lifestyle,
    Interests,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Demographics,
        Category::Personality,
        Category::Values,
        Category::Lifestyle,
        Category::Interests,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Demographics => "demographics",
            Category::Personality => "personality",
            Category::Values => "values",
            Category::Lifestyle => "lifestyle",
            Category::Interests => "interests",
        }
    }
}

/// Per-category weights of the compatibility score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub demographics: f64,
    pub personality: f64,
    pub values: f64,
    pub lifestyle: f64,
    pub interests: f64,
}

impl CategoryWeights {
    /// Build weights from a loosely keyed map.
    ///
    /// Categories absent from the map weigh zero; the omission and any
    /// unrecognized keys are logged, never rejected.
    pub fn from_map(map: &HashMap<String, f64>) -> Result<Self, MatchingError> {
        for key in map.keys() {
            if !Category::ALL.iter().any(|c| c.key() == key) {
                tracing::warn!("Ignoring unknown weight category: {}", key);
            }
        }

        let lookup = |category: Category| -> f64 {
            match map.get(category.key()) {
                Some(&value) => value,
                None => {
                    tracing::warn!(
                        "Weight for category '{}' missing, contributing zero",
                        category.key()
                    );
                    0.0
                }
            }
        };

        let weights = Self {
            demographics: lookup(Category::Demographics),
            personality: lookup(Category::Personality),
            values: lookup(Category::Values),
            lifestyle: lookup(Category::Lifestyle),
            interests: lookup(Category::Interests),
        };
        weights.validate()?;
        Ok(weights)
    }

    /// Reject weights that would make the weighted sum meaningless
    pub fn validate(&self) -> Result<(), MatchingError> {
        for category in Category::ALL {
            let value = self.weight(category);
            if !value.is_finite() || value < 0.0 {
                return Err(MatchingError::InvalidWeight {
                    category: category.key().to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    pub fn weight(&self, category: Category) -> f64 {
        match category {
            Category::Demographics => self.demographics,
            Category::Personality => self.personality,
            Category::Values => self.values,
            Category::Lifestyle => self.lifestyle,
            Category::Interests => self.interests,
        }
    }

    pub fn sum(&self) -> f64 {
        Category::ALL.iter().map(|c| self.weight(*c)).sum()
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            demographics: 0.10,
            personality: 0.30,
            values: 0.25,
            lifestyle: 0.20,
            interests: 0.15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        assert!((CategoryWeights::default().sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_weight_map_zeroes_missing() {
        let mut map = HashMap::new();
        map.insert("personality".to_string(), 0.5);
        map.insert("charisma".to_string(), 0.5);

        let weights = CategoryWeights::from_map(&map).unwrap();
        assert_eq!(weights.personality, 0.5);
        assert_eq!(weights.values, 0.0);
        assert_eq!(weights.demographics, 0.0);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut map = HashMap::new();
        map.insert("values".to_string(), -1.0);

        assert!(CategoryWeights::from_map(&map).is_err());
    }

    #[test]
    fn test_profile_deserializes_survey_record() {
        let json = serde_json::json!({
            "id": "u1",
            "gender": "male",
            "seeking_gender": ["female"],
            "year": "3rd_year",
            "major": "cs",
            "responses": {
                "personality_introvert": 2,
                "personality_social": "4",
                "lifestyle_study_habits": "night_owl"
            },
            "interests_hobbies": ["gaming", "music"]
        });

        let profile: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(profile.gender, Some(Gender::Male));
        assert!(profile.seeking_gender.contains(&Gender::Female));
        assert_eq!(profile.year, AcademicYear::Third);
        assert_eq!(profile.scale_answer("personality_introvert"), 2);
        assert_eq!(profile.scale_answer("personality_social"), 4);
        assert_eq!(profile.choice_answer("lifestyle_study_habits"), Some("night_owl"));
        assert_eq!(profile.interests.len(), 2);
    }

    #[test]
    fn test_profile_nulls_default() {
        let json = serde_json::json!({
            "id": "u2",
            "gender": null,
            "seeking_gender": null,
            "year": null,
            "interests_hobbies": null
        });

        let profile: Profile = serde_json::from_value(json).unwrap();
        assert!(profile.gender.is_none());
        assert!(profile.seeking_gender.is_empty());
        assert_eq!(profile.year, AcademicYear::Unknown);
        assert!(profile.interests.is_empty());
    }

    #[test]
    fn test_scale_answer_defaults_and_clamps() {
        let profile = Profile::new("u")
            .with_response("values_family", 9)
            .with_response("values_career", "often");

        assert_eq!(profile.scale_answer("values_family"), 5);
        assert_eq!(profile.scale_answer("values_career"), NEUTRAL_SCALE_ANSWER);
        assert_eq!(profile.scale_answer("values_religion"), NEUTRAL_SCALE_ANSWER);
    }

    #[test]
    fn test_whole_float_scale_answers() {
        let json = serde_json::json!({
            "id": "u",
            "responses": { "values_family": 4.0, "values_career": 4.5, "values_religion": 1 }
        });

        let profile: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(profile.scale_answer("values_family"), 4);
        assert_eq!(profile.scale_answer("values_career"), NEUTRAL_SCALE_ANSWER);
        assert_eq!(profile.scale_answer("values_religion"), 1);
    }

    #[test]
    fn test_unknown_year_token() {
        assert_eq!(AcademicYear::from("6th_year"), AcademicYear::Unknown);
        assert_eq!(AcademicYear::Graduate.ordinal(), Some(6));
        assert_eq!(AcademicYear::Unknown.ordinal(), None);
    }
}
