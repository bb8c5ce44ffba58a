// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{AcademicYear, Category, CategoryWeights, CrushEntry, Gender, MatchCandidate, MatchRecord, Profile, SurveyAnswer, ValidationReport};
pub use requests::RunMatchingRequest;
pub use responses::{ErrorResponse, HealthResponse, RunMatchingResponse, TestMatchingResponse};
