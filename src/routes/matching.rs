use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::MatchingEngine;
use crate::models::{
    AcademicYear, CategoryWeights, ErrorResponse, Gender, HealthResponse, Profile,
    RunMatchingRequest, RunMatchingResponse, TestMatchingResponse,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: MatchingEngine,
}

/// Configure all matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matching/run", web::post().to(run_matching))
        .route("/matching/test", web::post().to(test_matching));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

/// Run matching endpoint
///
/// POST /api/v1/matching/run
///
/// Request body:
/// ```json
/// {
///   "campaign_id": "string",
///   "users": [{ "id": "string", "gender": "male", "seeking_gender": ["female"], ... }],
///   "crushes": [{ "user_id": "string", "crush_target_id": "string" }],
///   "num_matches": 7,
///   "weights": { "personality": 0.3, ... }
/// }
/// ```
async fn run_matching(
    state: web::Data<AppState>,
    req: web::Json<RunMatchingRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!(
            "Validation failed for run_matching request: campaign={}, errors={:?}",
            req.campaign_id,
            errors
        );
        return bad_request("Validation failed", errors.to_string());
    }

    if req.users.is_empty() {
        return bad_request(
            "No survey responses",
            format!("Campaign {} has no participants", req.campaign_id),
        );
    }

    let weights = match req.weights.as_ref().map(CategoryWeights::from_map).transpose() {
        Ok(weights) => weights,
        Err(e) => return bad_request("Invalid weights", e.to_string()),
    };

    let engine = match state.engine.reconfigured(weights, req.num_matches) {
        Ok(engine) => engine,
        Err(e) => return bad_request("Invalid configuration", e.to_string()),
    };

    tracing::info!(
        "Running matching for campaign {}: {} users, {} crushes, num_matches={}",
        req.campaign_id,
        req.users.len(),
        req.crushes.len(),
        engine.num_matches()
    );

    let outcome = engine.run(&req.users, &req.crushes, &req.campaign_id);

    HttpResponse::Ok().json(RunMatchingResponse {
        success: true,
        message: "Matching completed successfully".to_string(),
        run_id: uuid::Uuid::new_v4(),
        campaign_id: req.campaign_id.clone(),
        total_users: req.users.len(),
        total_matches_generated: outcome.records.len(),
        stats: outcome.report,
        matches: outcome.records,
        generated_at: chrono::Utc::now(),
    })
}

/// Fixture matching endpoint
///
/// POST /api/v1/matching/test
///
/// Runs the default engine over two built-in profiles.
async fn test_matching() -> impl Responder {
    let users = fixture_users();
    let engine = MatchingEngine::with_default_weights();
    let outcome = engine.run(&users, &[], "test");

    HttpResponse::Ok().json(TestMatchingResponse {
        users,
        matches: outcome.matches,
        stats: outcome.report,
    })
}

/// Two complementary third-year students
pub fn fixture_users() -> Vec<Profile> {
    vec![
        Profile::new("1")
            .with_gender(Gender::Male)
            .seeking([Gender::Female])
            .with_year(AcademicYear::Third)
            .with_major("cs")
            .with_response("personality_introvert", 2)
            .with_response("personality_social", 4)
            .with_response("values_family", 5)
            .with_response("lifestyle_study_habits", "night_owl")
            .with_interests(["gaming", "music", "tech"]),
        Profile::new("2")
            .with_gender(Gender::Female)
            .seeking([Gender::Male])
            .with_year(AcademicYear::Third)
            .with_major("cs")
            .with_response("personality_introvert", 3)
            .with_response("personality_social", 3)
            .with_response("values_family", 4)
            .with_response("lifestyle_study_habits", "early_bird")
            .with_interests(["gaming", "music", "art"]),
    ]
}
