//! Versioned schema migrations.
//!
//! Each module holds the UP and DOWN SQL for one schema version. New
//! migrations are appended to [`ALL_MIGRATIONS`] and never reordered or
//! edited once shipped.

pub mod m001_model_version;
pub mod m002_vote;

/// One schema version: UP applies it, DOWN reverts it.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: i32,
    pub name: &'static str,
    pub up: &'static str,
    pub down: &'static str,
}

/// Every migration, in application order.
pub const ALL_MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_model_version",
        up: m001_model_version::UP,
        down: m001_model_version::DOWN,
    },
    Migration {
        version: 2,
        name: "create_vote",
        up: m002_vote::UP,
        down: m002_vote::DOWN,
    },
];
