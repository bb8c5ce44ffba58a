// Unit tests for Cohort Match

use cohort_match::core::{
    crush::calculate_crush_bonus,
    filters::meets_preferences,
    scoring::{demographics_score, interests_score, lifestyle_score, personality_score, values_score, CompatibilityScorer},
};
use cohort_match::models::{AcademicYear, CategoryWeights, CrushEntry, Gender, Profile};

fn varied_profile(i: usize) -> Profile {
    let genders = [Gender::Male, Gender::Female, Gender::NonBinary, Gender::PreferNotSay];
    let years = [
        AcademicYear::First,
        AcademicYear::Second,
        AcademicYear::Third,
        AcademicYear::Fourth,
        AcademicYear::Fifth,
        AcademicYear::Graduate,
        AcademicYear::Unknown,
    ];
    let habits = ["night_owl", "early_bird", "last_minute", "consistent"];
    let hobbies = ["gaming", "music", "sports", "reading", "art", "travel"];

    let mut profile = Profile::new(format!("user-{}", i))
        .with_gender(genders[i % genders.len()])
        .with_year(years[i % years.len()])
        .with_response("personality_introvert", (i % 5) as i64 + 1)
        .with_response("personality_planner", ((i * 3) % 7) as i64 - 1)
        .with_response("values_family", ((i * 7) % 5) as i64 + 1)
        .with_response("values_politics", "not a number")
        .with_response("lifestyle_study_habits", habits[i % habits.len()])
        .with_response("lifestyle_cleanliness", (i % 9) as i64)
        .with_interests(hobbies.iter().skip(i % 4).take(i % 3).copied());

    if i % 3 == 0 {
        profile = profile.with_major("cs");
    }
    if i % 2 == 0 {
        profile = profile.seeking([genders[(i + 1) % genders.len()]]);
    }
    profile
}

#[test]
fn test_scores_symmetric_and_bounded() {
    let scorer = CompatibilityScorer::default();
    let profiles: Vec<Profile> = (0..24).map(varied_profile).collect();

    for a in &profiles {
        for b in &profiles {
            for bonus in [1.0, 1.1, 1.2] {
                let ab = scorer.score(a, b, bonus);
                let ba = scorer.score(b, a, bonus);
                assert_eq!(ab, ba, "asymmetric score for {} / {}", a.id, b.id);
                assert!((0.0..=100.0).contains(&ab), "score {} out of range", ab);
            }
        }
    }
}

#[test]
fn test_sub_scores_in_range() {
    let profiles: Vec<Profile> = (0..24).map(varied_profile).collect();

    for a in &profiles {
        for b in &profiles {
            for score in [
                demographics_score(a, b),
                personality_score(a, b),
                values_score(a, b),
                lifestyle_score(a, b),
                interests_score(a, b),
            ] {
                assert!((0.0..=100.0 + 1e-9).contains(&score), "sub-score {} out of range", score);
            }
        }
    }
}

#[test]
fn test_crush_bonus_symmetric() {
    let crushes = vec![
        CrushEntry::new("user-1", "user-2"),
        CrushEntry::new("user-2", "user-1"),
        CrushEntry::new("user-3", "user-1"),
    ];

    for a in ["user-1", "user-2", "user-3", "user-4"] {
        for b in ["user-1", "user-2", "user-3", "user-4"] {
            assert_eq!(calculate_crush_bonus(a, b, &crushes), calculate_crush_bonus(b, a, &crushes));
        }
    }
    assert_eq!(calculate_crush_bonus("user-1", "user-3", &crushes), 1.1);
}

#[test]
fn test_preference_gate_overrides_everything() {
    let scorer = CompatibilityScorer::new(CategoryWeights {
        demographics: 1.0,
        personality: 1.0,
        values: 1.0,
        lifestyle: 1.0,
        interests: 1.0,
    });
    let a = Profile::new("a")
        .with_gender(Gender::Male)
        .with_year(AcademicYear::Second)
        .with_major("cs")
        .with_interests(["music"]);
    let b = Profile::new("b")
        .with_gender(Gender::Female)
        .seeking([Gender::Female])
        .with_year(AcademicYear::Second)
        .with_major("cs")
        .with_interests(["music"]);

    assert!(!meets_preferences(&a, &b));
    assert_eq!(scorer.score(&a, &b, 1.2), 0.0);
}

#[test]
fn test_demographics_examples() {
    let a = Profile::new("a").with_year(AcademicYear::Fourth).with_major("archi");
    let b = Profile::new("b").with_year(AcademicYear::Fourth).with_major("archi");
    let c = Profile::new("c").with_year(AcademicYear::Fifth).with_major("acctg");

    assert_eq!(demographics_score(&a, &b), 100.0);
    assert_eq!(demographics_score(&a, &c), 45.0);
}

#[test]
fn test_interests_example() {
    let a = Profile::new("a").with_interests(["gaming", "music"]);
    let b = Profile::new("b").with_interests(["gaming", "music", "art"]);

    let score = interests_score(&a, &b);
    assert!((score - 66.67).abs() < 0.01, "expected 66.67, got {}", score);
}
