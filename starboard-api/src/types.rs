//! API Request and Response Types
//!
//! This module defines all request and response types for the Starboard API.

use serde::{Deserialize, Serialize};
use starboard_core::{EntityId, ModelVersion, ScoreHistogram, Timestamp};

// ============================================================================
// MODEL VERSION TYPES
// ============================================================================

/// Request to register a new model version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateModelVersionRequest {
    /// Version label, unique across the service. e.g. "gpt-4o-mini"
    pub version: String,
    /// Provider name; resolved from the known-provider table when omitted.
    pub provider: Option<String>,
}

/// Request to list model versions with pagination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ListModelVersionsRequest {
    /// Maximum number of results
    pub limit: Option<i64>,
    /// Offset for pagination
    pub offset: Option<i64>,
}

/// Model version response with full details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ModelVersionResponse {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub model_version_id: EntityId,
    pub version: String,
    pub provider: String,
    pub vote_count: i32,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
}

impl From<ModelVersion> for ModelVersionResponse {
    fn from(mv: ModelVersion) -> Self {
        Self {
            model_version_id: mv.model_version_id,
            version: mv.version,
            provider: mv.provider,
            vote_count: mv.vote_count,
            created_at: mv.created_at,
        }
    }
}

/// Response containing a list of model versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ListModelVersionsResponse {
    /// List of model versions
    pub model_versions: Vec<ModelVersionResponse>,
    /// Total count (before pagination)
    pub total: i64,
}

// ============================================================================
// VOTE TYPES
// ============================================================================

/// Request to submit a 1-5 star rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VoteRequest {
    /// Identifier of the voting user
    pub user_id: String,
    /// Star rating, 1 to 5
    pub score: i32,
}

/// Response to a submitted vote, including refreshed aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VoteResponse {
    pub message: String,
    /// Version label of the rated model
    pub model_version: String,
    /// The score this user now has on record
    pub user_score: i32,
    /// Mean score across all votes for the model
    pub average_score: f64,
    /// Total number of votes for the model
    pub total_votes: i64,
    /// average_score / 5 * 100
    pub score_percentage: f64,
}

// ============================================================================
// LEADERBOARD TYPES
// ============================================================================

/// One model version's aggregate standing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LeaderboardEntry {
    pub model_version: String,
    pub provider: String,
    pub total_votes: i64,
    /// Mean score; 0.0 when no votes are recorded
    pub average_score: f64,
    /// average_score / 5 * 100
    pub score_percentage: f64,
    /// Vote counts per star value
    pub score_breakdown: ScoreHistogram,
}

/// Leaderboard over every registered model version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LeaderboardResponse {
    /// Ordered list of model performances, best average first
    pub leaderboard: Vec<LeaderboardEntry>,
}

// ============================================================================
// PRESENTATION HELPERS
// ============================================================================

/// Round to two decimals (average scores).
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to one decimal (score percentages).
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_version_response_from_entity() {
        let mv = starboard_test_utils::model_version_fixture("gpt-4o-mini");

        let response = ModelVersionResponse::from(mv.clone());
        assert_eq!(response.model_version_id, mv.model_version_id);
        assert_eq!(response.version, "gpt-4o-mini");
        assert_eq!(response.provider, "openai");
        assert_eq!(response.vote_count, 0);
    }

    #[test]
    fn test_vote_request_deserialization() -> Result<(), serde_json::Error> {
        let req: VoteRequest = serde_json::from_str(r#"{"user_id": "alice", "score": 4}"#)?;
        assert_eq!(req.user_id, "alice");
        assert_eq!(req.score, 4);
        Ok(())
    }

    #[test]
    fn test_rounding_helpers() {
        assert_eq!(round2(4.666666), 4.67);
        assert_eq!(round2(3.0), 3.0);
        assert_eq!(round1(93.333333), 93.3);
    }

    #[test]
    fn test_leaderboard_entry_serialization() -> Result<(), serde_json::Error> {
        let entry = LeaderboardEntry {
            model_version: "gemini-1.5-pro".to_string(),
            provider: "google".to_string(),
            total_votes: 2,
            average_score: 4.5,
            score_percentage: 90.0,
            score_breakdown: ScoreHistogram {
                score_4: 1,
                score_5: 1,
                ..Default::default()
            },
        };

        let json = serde_json::to_value(&entry)?;
        assert_eq!(json["score_percentage"], 90.0);
        assert_eq!(json["score_breakdown"]["score_5"], 1);
        Ok(())
    }
}
