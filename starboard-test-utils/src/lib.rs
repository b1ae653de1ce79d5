//! Starboard Test Utilities
//!
//! Centralized test infrastructure for the Starboard workspace:
//! - Fixture constructors for the core entity types
//! - Proptest generators for scores, user ids, and version labels
//! - Deterministic RNG construction for distribution tests

// Re-export core types for convenience
pub use starboard_core::{
    new_entity_id, provider_for, EntityId, ModelVersion, Score, ScoreHistogram, Timestamp, Vote,
};

use chrono::Utc;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// FIXTURES
// ============================================================================

/// Build a model version with zero votes and the mapped provider.
pub fn model_version_fixture(version: &str) -> ModelVersion {
    ModelVersion {
        model_version_id: new_entity_id(),
        version: version.to_string(),
        provider: provider_for(version).to_string(),
        vote_count: 0,
        created_at: Utc::now(),
    }
}

/// Build a vote for the given model.
///
/// Panics on an out-of-range score; fixtures take the shortcut on purpose.
pub fn vote_fixture(user_id: &str, model_version_id: EntityId, score: i32) -> Vote {
    Vote {
        vote_id: new_entity_id(),
        user_id: user_id.to_string(),
        model_version_id,
        score: Score::new(score).expect("fixture score must be 1..=5"),
        created_at: Utc::now(),
    }
}

/// Deterministic RNG for distribution tests.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

/// Strategy producing valid scores.
pub fn score_strategy() -> impl Strategy<Value = Score> {
    (1..=5i32).prop_map(|value| Score::new(value).expect("range is valid"))
}

/// Strategy producing plausible user identifiers.
pub fn user_id_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{2,15}"
}

/// Strategy producing plausible model version labels.
pub fn version_label_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9.-]{2,31}"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_are_consistent() {
        let model = model_version_fixture("gpt-4o-mini");
        assert_eq!(model.provider, "openai");
        assert_eq!(model.vote_count, 0);

        let vote = vote_fixture("alice", model.model_version_id, 4);
        assert_eq!(vote.model_version_id, model.model_version_id);
        assert_eq!(vote.score.value(), 4);
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        use rand::Rng;

        let a: u64 = seeded_rng(42).random();
        let b: u64 = seeded_rng(42).random();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_score_strategy_in_range(score in score_strategy()) {
            prop_assert!((1..=5).contains(&score.value()));
        }

        #[test]
        fn prop_user_ids_are_nonempty(user_id in user_id_strategy()) {
            prop_assert!(!user_id.trim().is_empty());
        }
    }
}
