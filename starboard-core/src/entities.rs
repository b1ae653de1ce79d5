//! Core entity structures

use serde::{Deserialize, Serialize};

use crate::{EntityId, Score, Timestamp};

/// ModelVersion - a versioned identifier of an evaluated model.
///
/// `vote_count` is a denormalized counter maintained in the same transaction
/// as every vote insert; aggregates are computed from the vote table itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ModelVersion {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub model_version_id: EntityId,
    /// Version label, unique across the table. e.g. "gpt-4o-mini"
    pub version: String,
    /// e.g. "openai", "anthropic", "google"
    pub provider: String,
    pub vote_count: i32,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
}

/// Vote - a single user's 1-5 star rating of a ModelVersion.
///
/// At most one vote exists per (user, model version) pair; votes are
/// cascade-deleted with their model version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Vote {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub vote_id: EntityId,
    pub user_id: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub model_version_id: EntityId,
    pub score: Score,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::new_entity_id;
    use chrono::Utc;

    #[test]
    fn test_vote_serialization() -> Result<(), serde_json::Error> {
        let vote = Vote {
            vote_id: new_entity_id(),
            user_id: "alice".to_string(),
            model_version_id: new_entity_id(),
            score: Score::new(5).unwrap(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&vote)?;
        assert_eq!(json["user_id"], "alice");
        assert_eq!(json["score"], 5);

        let back: Vote = serde_json::from_value(json)?;
        assert_eq!(back, vote);
        Ok(())
    }
}
