//! Starboard Core - Entity Types
//!
//! Pure data structures with no behavior. All other crates depend on this.
//! This crate contains ONLY data types - no business logic.

use chrono::{DateTime, Utc};
use uuid::Uuid;

mod entities;
mod error;
mod score;

pub use entities::{ModelVersion, Vote};
pub use error::DomainError;
pub use score::{Score, ScoreHistogram};

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Entity identifier using UUIDv7 for timestamp-sortable IDs.
/// UUIDv7 embeds a Unix timestamp, making IDs naturally sortable by creation time.
pub type EntityId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 EntityId (timestamp-sortable).
pub fn new_entity_id() -> EntityId {
    Uuid::now_v7()
}

// ============================================================================
// PROVIDERS
// ============================================================================

/// Known model providers, keyed by version label.
///
/// Labels outside this table resolve to [`UNKNOWN_PROVIDER`]; the provider
/// column is free-form text, this is only the bootstrap mapping.
pub const KNOWN_PROVIDERS: &[(&str, &str)] = &[
    ("gpt-4o", "openai"),
    ("gpt-4o-mini", "openai"),
    ("claude-3-5-sonnet-latest", "anthropic"),
    ("claude-3-5-haiku-20241022", "anthropic"),
    ("claude-3-opus-20240229", "anthropic"),
    ("gemini-1.5-pro", "google"),
    ("gemini-1.5-flash", "google"),
];

/// Provider recorded for version labels with no known mapping.
pub const UNKNOWN_PROVIDER: &str = "unknown";

/// Resolve the provider for a model version label.
pub fn provider_for(version: &str) -> &'static str {
    KNOWN_PROVIDERS
        .iter()
        .find(|(label, _)| *label == version)
        .map(|(_, provider)| *provider)
        .unwrap_or(UNKNOWN_PROVIDER)
}
