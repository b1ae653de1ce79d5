//! REST API Routes Module
//!
//! This module contains all REST API route handlers organized by resource.
//!
//! Includes:
//! - Model version CRUD and vote submission
//! - Leaderboard aggregation
//! - Health check endpoints (Kubernetes-compatible)
//! - CORS support for browser-based clients

pub mod health;
pub mod leaderboard;
pub mod model_version;

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::db::DbClient;

// Re-export route creation functions for convenience
pub use health::create_router as health_router;
pub use leaderboard::create_router as leaderboard_router;
pub use model_version::create_router as model_version_router;

// ============================================================================
// OPENAPI ENDPOINTS
// ============================================================================

/// Handler for /openapi.json endpoint.
#[cfg(feature = "openapi")]
async fn openapi_json() -> impl axum::response::IntoResponse {
    use crate::openapi::ApiDoc;
    use utoipa::OpenApi;

    axum::Json(ApiDoc::openapi())
}

// ============================================================================
// CORS LAYER
// ============================================================================

/// Build the CORS layer from ApiConfig.
///
/// In development mode (empty origins), allows all origins.
/// In production mode, only allows configured origins.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.cors_origins.is_empty() {
        // Development mode: allow all origins
        tracing::info!("CORS: Development mode - allowing all origins");
        cors.allow_origin(Any).allow_headers(Any)
    } else {
        // Production mode: only allow configured origins
        tracing::info!(
            "CORS: Production mode - allowing origins: {:?}",
            config.cors_origins
        );
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        if config.cors_allow_credentials {
            cors.allow_origin(origins).allow_credentials(true)
        } else {
            cors.allow_origin(origins)
        }
    }
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the complete API router.
///
/// This function creates a fully configured Axum router with:
/// - Model version routes under /api/v1/model-versions (including votes)
/// - Leaderboard at /api/v1/leaderboard
/// - Health checks at /health/*
/// - OpenAPI spec at /openapi.json
/// - Swagger UI at /swagger-ui (when the swagger-ui feature is enabled)
pub fn create_api_router(db: DbClient, api_config: &ApiConfig) -> Router {
    let api_routes = Router::new()
        .nest("/model-versions", model_version::create_router(db.clone()))
        .nest("/leaderboard", leaderboard::create_router(db.clone()));

    #[allow(unused_mut)]
    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health::create_router(db));

    #[cfg(feature = "openapi")]
    {
        router = router.route("/openapi.json", axum::routing::get(openapi_json));
    }

    #[cfg(feature = "swagger-ui")]
    {
        use crate::openapi::ApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        // SwaggerUi serves its own copy of the spec; keep its path distinct
        // from the plain /openapi.json route above.
        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    let cors = build_cors_layer(api_config);
    router.layer(TraceLayer::new_for_http()).layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_modules_compile() {
        // This test simply verifies all route modules are properly exported
        let _ = model_version::ModelVersionState::new;
        let _ = leaderboard::LeaderboardState::new;
        let _ = health::HealthState::new;
    }

    #[test]
    fn test_cors_layer_dev_mode() {
        let config = ApiConfig::default();
        assert!(!config.is_production());
        // Dev mode builds the permissive layer without panicking.
        let _ = build_cors_layer(&config);
    }

    #[test]
    fn test_cors_layer_production_mode() {
        let config = ApiConfig {
            cors_origins: vec!["https://starboard.rs".to_string()],
            ..ApiConfig::default()
        };
        assert!(config.is_production());
        let _ = build_cors_layer(&config);
    }
}
