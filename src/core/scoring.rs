use serde::Serialize;

use crate::core::filters::meets_preferences;
use crate::models::{Category, CategoryWeights, Profile};

/// Survey questions feeding the personality vector
pub const PERSONALITY_QUESTIONS: [&str; 4] = [
    "personality_introvert",
    "personality_planner",
    "personality_social",
    "personality_adventurous",
];

/// Survey questions compared for values alignment
pub const VALUES_QUESTIONS: [&str; 4] = [
    "values_family",
    "values_career",
    "values_religion",
    "values_politics",
];

pub const STUDY_HABITS_QUESTION: &str = "lifestyle_study_habits";
pub const WEEKEND_QUESTION: &str = "lifestyle_weekend";
pub const CLEANLINESS_QUESTION: &str = "lifestyle_cleanliness";

/// Study habits that pair well precisely because they differ
const COMPLEMENTARY_STUDY_HABITS: [(&str, &str); 2] = [
    ("night_owl", "early_bird"),
    ("last_minute", "consistent"),
];

/// Fallback when a sub-score cannot be computed from the data
const NEUTRAL_SCORE: f64 = 50.0;

/// Per-category sub-scores for a pair, each nominally 0-100
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryScores {
    pub demographics: f64,
    pub personality: f64,
    pub values: f64,
    pub lifestyle: f64,
    pub interests: f64,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Demographics => self.demographics,
            Category::Personality => self.personality,
            Category::Values => self.values,
            Category::Lifestyle => self.lifestyle,
            Category::Interests => self.interests,
        }
    }
}

/// Multi-factor compatibility scorer
///
/// Holds only its weights, so one instance can be shared across runs.
#[derive(Debug, Clone)]
pub struct CompatibilityScorer {
    weights: CategoryWeights,
}

impl CompatibilityScorer {
    pub fn new(weights: CategoryWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &CategoryWeights {
        &self.weights
    }

    /// Compatibility (0-100) between two profiles
    ///
    /// Pairs failing the gender preference gate score 0 outright. Otherwise
    /// the weighted sub-scores are multiplied by `crush_bonus` and clamped.
    pub fn score(&self, a: &Profile, b: &Profile, crush_bonus: f64) -> f64 {
        if !meets_preferences(a, b) {
            return 0.0;
        }

        let scores = category_scores(a, b);

        let total: f64 = Category::ALL
            .iter()
            .map(|&category| self.weights.weight(category) * scores.get(category))
            .sum::<f64>()
            * crush_bonus;

        total.min(100.0).max(0.0)
    }
}

impl Default for CompatibilityScorer {
    fn default() -> Self {
        Self::new(CategoryWeights::default())
    }
}

/// All five sub-scores for a pair, ignoring the preference gate
pub fn category_scores(a: &Profile, b: &Profile) -> CategoryScores {
    CategoryScores {
        demographics: demographics_score(a, b),
        personality: personality_score(a, b),
        values: values_score(a, b),
        lifestyle: lifestyle_score(a, b),
        interests: interests_score(a, b),
    }
}

/// Year proximity plus a shared-major bonus
pub fn demographics_score(a: &Profile, b: &Profile) -> f64 {
    let mut score: f64 = 0.0;

    if let (Some(year_a), Some(year_b)) = (a.year.ordinal(), b.year.ordinal()) {
        score += match year_a.abs_diff(year_b) {
            0 => 60.0,
            1 => 45.0,
            2 => 30.0,
            _ => 15.0,
        };
    }

    if let (Some(major_a), Some(major_b)) = (&a.major, &b.major) {
        if major_a == major_b {
            score += 40.0;
        }
    }

    score.min(100.0)
}

/// Cosine similarity of the normalized personality vectors, scaled to 0-100
pub fn personality_score(a: &Profile, b: &Profile) -> f64 {
    let vec_a = personality_vector(a);
    let vec_b = personality_vector(b);

    let dot: f64 = vec_a.iter().zip(vec_b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = vec_a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = vec_b.iter().map(|x| x * x).sum::<f64>().sqrt();

    // All-minimum answers give a zero vector with no defined direction
    if norm_a == 0.0 || norm_b == 0.0 {
        return NEUTRAL_SCORE;
    }

    let similarity = dot / (norm_a * norm_b);
    if !similarity.is_finite() {
        return NEUTRAL_SCORE;
    }

    similarity * 100.0
}

/// Answers rescaled from 1-5 to 0-1
#[inline]
fn personality_vector(profile: &Profile) -> [f64; 4] {
    PERSONALITY_QUESTIONS.map(|question| (profile.scale_answer(question) - 1) as f64 / 4.0)
}

/// One minus the mean absolute answer difference, scaled to 0-100
pub fn values_score(a: &Profile, b: &Profile) -> f64 {
    let total_diff: i64 = VALUES_QUESTIONS
        .iter()
        .map(|question| (a.scale_answer(question) - b.scale_answer(question)).abs())
        .sum();

    let avg_diff = total_diff as f64 / VALUES_QUESTIONS.len() as f64;

    (1.0 - avg_diff / 4.0) * 100.0
}

/// Study habits, weekend plans and cleanliness
///
/// A missing categorical answer reads as the empty string, so two unanswered
/// questions compare equal.
pub fn lifestyle_score(a: &Profile, b: &Profile) -> f64 {
    let mut score: f64 = 0.0;

    let habit_a = a.choice_answer(STUDY_HABITS_QUESTION).unwrap_or_default();
    let habit_b = b.choice_answer(STUDY_HABITS_QUESTION).unwrap_or_default();
    if is_complementary_habit(habit_a, habit_b) {
        score += 40.0;
    } else if habit_a == habit_b {
        score += 30.0;
    }

    let weekend_a = a.choice_answer(WEEKEND_QUESTION).unwrap_or_default();
    let weekend_b = b.choice_answer(WEEKEND_QUESTION).unwrap_or_default();
    if weekend_a == weekend_b {
        score += 35.0;
    }

    let cleanliness_diff =
        (a.scale_answer(CLEANLINESS_QUESTION) - b.scale_answer(CLEANLINESS_QUESTION)).abs();
    score += (1.0 - cleanliness_diff as f64 / 4.0) * 25.0;

    score.min(100.0)
}

#[inline]
fn is_complementary_habit(habit_a: &str, habit_b: &str) -> bool {
    COMPLEMENTARY_STUDY_HABITS
        .iter()
        .any(|&(x, y)| (habit_a == x && habit_b == y) || (habit_a == y && habit_b == x))
}

/// Jaccard overlap of hobbies (70 pts) plus a shared-count bonus (30 pts)
pub fn interests_score(a: &Profile, b: &Profile) -> f64 {
    if a.interests.is_empty() || b.interests.is_empty() {
        return NEUTRAL_SCORE;
    }

    let shared = a.interests.intersection(&b.interests).count();
    let union = a.interests.union(&b.interests).count();

    let jaccard = shared as f64 / union as f64;
    let shared_bonus = (shared as f64 * 10.0).min(30.0);

    jaccard * 70.0 + shared_bonus
}
