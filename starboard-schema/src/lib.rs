//! Starboard Schema - embedded migrations
//!
//! The persisted schema (`model_version`, `vote`) lives here as versioned SQL
//! constants, applied in order by [`Migrator`] and recorded in a
//! `schema_migrations` bookkeeping table. Re-running the migrator applies
//! nothing new.

pub mod migrations;
mod migrator;

pub use migrations::{Migration, ALL_MIGRATIONS};
pub use migrator::{AppliedMigration, Migrator, SchemaError};
