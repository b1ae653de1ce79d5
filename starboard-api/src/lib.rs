//! Starboard API - REST API Layer
//!
//! This crate provides the HTTP surface for the Starboard model-rating
//! service: model version CRUD, 1-5 star vote submission, and leaderboard
//! aggregation over PostgreSQL. It also hosts the demo vote seeder and the
//! schema migration binary.

pub mod config;
pub mod db;
pub mod error;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod routes;
pub mod seed;
pub mod telemetry;
pub mod types;

// Re-export commonly used types
pub use config::ApiConfig;
pub use db::{DbClient, DbConfig, ModelStats, VoteOutcome};
pub use error::{ApiError, ApiResult, ErrorCode};
#[cfg(feature = "openapi")]
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use types::*;
