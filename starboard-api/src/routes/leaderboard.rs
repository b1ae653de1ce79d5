//! Leaderboard REST API Route
//!
//! Aggregate standings for every registered model version, computed from the
//! vote table on each request.

use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::{db::DbClient, error::ApiResult, types::LeaderboardResponse};

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state for the leaderboard route.
#[derive(Clone)]
pub struct LeaderboardState {
    pub db: DbClient,
}

impl LeaderboardState {
    pub fn new(db: DbClient) -> Self {
        Self { db }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /api/v1/leaderboard - Model standings with per-star breakdowns
#[utoipa::path(
    get,
    path = "/api/v1/leaderboard",
    tag = "Leaderboard",
    responses(
        (status = 200, description = "Ordered model standings", body = LeaderboardResponse),
    )
)]
pub async fn get_leaderboard(
    State(state): State<Arc<LeaderboardState>>,
) -> ApiResult<impl IntoResponse> {
    let leaderboard = state.db.leaderboard().await?;
    Ok(Json(LeaderboardResponse { leaderboard }))
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the leaderboard router.
pub fn create_router(db: DbClient) -> axum::Router {
    let state = Arc::new(LeaderboardState::new(db));

    axum::Router::new()
        .route("/", axum::routing::get(get_leaderboard))
        .with_state(state)
}
