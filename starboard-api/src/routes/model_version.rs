//! Model Version REST API Routes
//!
//! Axum route handlers for model version CRUD and vote submission. Model
//! versions are addressed by their version label, which is unique.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use starboard_core::{provider_for, Score};

use crate::{
    db::DbClient,
    error::{ApiError, ApiResult},
    types::{
        round1, round2, CreateModelVersionRequest, ListModelVersionsRequest,
        ListModelVersionsResponse, ModelVersionResponse, VoteRequest, VoteResponse,
    },
};

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state for model version routes.
#[derive(Clone)]
pub struct ModelVersionState {
    pub db: DbClient,
}

impl ModelVersionState {
    pub fn new(db: DbClient) -> Self {
        Self { db }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /api/v1/model-versions - Register a new model version
#[utoipa::path(
    post,
    path = "/api/v1/model-versions",
    tag = "Model Versions",
    request_body = CreateModelVersionRequest,
    responses(
        (status = 201, description = "Model version created successfully", body = ModelVersionResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 409, description = "Version label already taken", body = ApiError),
    )
)]
pub async fn create_model_version(
    State(state): State<Arc<ModelVersionState>>,
    Json(req): Json<CreateModelVersionRequest>,
) -> ApiResult<impl IntoResponse> {
    if req.version.trim().is_empty() {
        return Err(ApiError::missing_field("version"));
    }

    let provider = match &req.provider {
        Some(provider) if !provider.trim().is_empty() => provider.clone(),
        _ => provider_for(&req.version).to_string(),
    };

    let model_version = state.db.model_version_create(&req.version, &provider).await?;

    Ok((
        StatusCode::CREATED,
        Json(ModelVersionResponse::from(model_version)),
    ))
}

/// GET /api/v1/model-versions - List model versions
#[utoipa::path(
    get,
    path = "/api/v1/model-versions",
    tag = "Model Versions",
    params(
        ("limit" = Option<i64>, Query, description = "Maximum number of results"),
        ("offset" = Option<i64>, Query, description = "Offset for pagination"),
    ),
    responses(
        (status = 200, description = "List of model versions", body = ListModelVersionsResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    )
)]
pub async fn list_model_versions(
    State(state): State<Arc<ModelVersionState>>,
    Query(params): Query<ListModelVersionsRequest>,
) -> ApiResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(100);
    let offset = params.offset.unwrap_or(0);

    if limit < 1 || offset < 0 {
        return Err(ApiError::invalid_input(
            "limit must be positive and offset non-negative",
        ));
    }

    let (model_versions, total) = state.db.model_version_list(limit, offset).await?;

    let response = ListModelVersionsResponse {
        model_versions: model_versions
            .into_iter()
            .map(ModelVersionResponse::from)
            .collect(),
        total,
    };

    Ok(Json(response))
}

/// GET /api/v1/model-versions/{version} - Get model version by label
#[utoipa::path(
    get,
    path = "/api/v1/model-versions/{version}",
    tag = "Model Versions",
    params(
        ("version" = String, Path, description = "Version label, e.g. gpt-4o-mini")
    ),
    responses(
        (status = 200, description = "Model version details", body = ModelVersionResponse),
        (status = 404, description = "Model version not found", body = ApiError),
    )
)]
pub async fn get_model_version(
    State(state): State<Arc<ModelVersionState>>,
    Path(version): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let model_version = state
        .db
        .model_version_get_by_version(&version)
        .await?
        .ok_or_else(|| ApiError::model_version_not_found(&version))?;

    Ok(Json(ModelVersionResponse::from(model_version)))
}

/// DELETE /api/v1/model-versions/{version} - Delete model version
///
/// Votes belonging to the model version are removed by the schema cascade.
#[utoipa::path(
    delete,
    path = "/api/v1/model-versions/{version}",
    tag = "Model Versions",
    params(
        ("version" = String, Path, description = "Version label")
    ),
    responses(
        (status = 204, description = "Model version deleted successfully"),
        (status = 404, description = "Model version not found", body = ApiError),
    )
)]
pub async fn delete_model_version(
    State(state): State<Arc<ModelVersionState>>,
    Path(version): Path<String>,
) -> ApiResult<StatusCode> {
    let deleted = state.db.model_version_delete(&version).await?;
    if !deleted {
        return Err(ApiError::model_version_not_found(&version));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/model-versions/{version}/votes - Submit a 1-5 star rating
///
/// The model version is resolved by get-or-create, so rating an unknown
/// version registers it with its mapped provider. Voting again replaces the
/// caller's previous score.
#[utoipa::path(
    post,
    path = "/api/v1/model-versions/{version}/votes",
    tag = "Votes",
    params(
        ("version" = String, Path, description = "Version label of the rated model")
    ),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Vote recorded, aggregates refreshed", body = VoteResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    )
)]
pub async fn cast_vote(
    State(state): State<Arc<ModelVersionState>>,
    Path(version): Path<String>,
    Json(req): Json<VoteRequest>,
) -> ApiResult<impl IntoResponse> {
    if req.user_id.trim().is_empty() {
        return Err(ApiError::missing_field("user_id"));
    }

    // Reject out-of-range scores before touching the database; the CHECK
    // constraint is the backstop, not the primary validation.
    let score = Score::new(req.score)?;

    let model_version = state.db.model_version_get_or_create(&version).await?;
    let outcome = state
        .db
        .vote_cast(model_version.model_version_id, &req.user_id, score)
        .await?;

    let stats = state
        .db
        .model_version_stats(model_version.model_version_id)
        .await?;
    let average_score = stats.average_score.unwrap_or_else(|| score.value() as f64);

    let message = if outcome.newly_inserted {
        "Vote recorded successfully"
    } else {
        "Vote updated successfully"
    };

    let response = VoteResponse {
        message: message.to_string(),
        model_version: model_version.version,
        user_score: outcome.vote.score.value(),
        average_score: round2(average_score),
        total_votes: stats.total_votes,
        score_percentage: round1(Score::percentage_of(average_score)),
    };

    Ok(Json(response))
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the model version routes router.
pub fn create_router(db: DbClient) -> axum::Router {
    let state = Arc::new(ModelVersionState::new(db));

    axum::Router::new()
        .route("/", axum::routing::post(create_model_version))
        .route("/", axum::routing::get(list_model_versions))
        .route("/:version", axum::routing::get(get_model_version))
        .route("/:version", axum::routing::delete(delete_model_version))
        .route("/:version/votes", axum::routing::post(cast_vote))
        .with_state(state)
}
