//! OpenAPI Specification for the Starboard API
//!
//! This module defines the OpenAPI document for the Starboard REST API.
//! It uses utoipa to generate the OpenAPI specification from Rust types
//! and route annotations.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::{health, leaderboard, model_version};
use crate::types::{
    CreateModelVersionRequest, LeaderboardEntry, LeaderboardResponse, ListModelVersionsResponse,
    ModelVersionResponse, VoteRequest, VoteResponse,
};

// Import domain types from starboard-core
use starboard_core::{ModelVersion, Score, ScoreHistogram, Vote};

/// OpenAPI document for the Starboard API.
///
/// This struct generates the complete OpenAPI specification for the API,
/// including all schemas and paths.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Starboard API",
        version = "0.2.0",
        description = "Star-rating service for AI model versions: vote submission, aggregation, and leaderboards",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "Starboard", url = "https://starboard.rs")
    ),
    servers(
        (url = "https://api.starboard.rs", description = "Production"),
        (url = "http://localhost:3000", description = "Local Development")
    ),
    tags(
        (name = "Model Versions", description = "Registration and lifecycle of rated model versions"),
        (name = "Votes", description = "1-5 star rating submission"),
        (name = "Leaderboard", description = "Aggregate standings with per-star breakdowns"),
        (name = "Health", description = "Liveness and readiness probes")
    ),
    paths(
        // === Model Version Routes ===
        model_version::create_model_version,
        model_version::list_model_versions,
        model_version::get_model_version,
        model_version::delete_model_version,
        model_version::cast_vote,
        // === Leaderboard Routes ===
        leaderboard::get_leaderboard,
        // === Health Routes ===
        health::ping,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        // Error types
        ApiError,
        ErrorCode,
        // Domain types
        ModelVersion,
        Vote,
        Score,
        ScoreHistogram,
        // Request/response types
        CreateModelVersionRequest,
        ModelVersionResponse,
        ListModelVersionsResponse,
        VoteRequest,
        VoteResponse,
        LeaderboardEntry,
        LeaderboardResponse,
        // Health types
        health::HealthResponse,
        health::HealthStatus,
        health::HealthDetails,
        health::ComponentHealth,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_generates() {
        let doc = ApiDoc::openapi();
        assert_eq!(doc.info.title, "Starboard API");

        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/model-versions"));
        assert!(paths
            .iter()
            .any(|p| p.as_str() == "/api/v1/model-versions/{version}/votes"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/leaderboard"));
        assert!(paths.iter().any(|p| p.as_str() == "/health/ready"));
    }

    #[test]
    fn test_openapi_document_serializes() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("VoteRequest"));
        assert!(json.contains("LeaderboardResponse"));
    }
}
