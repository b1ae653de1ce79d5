//! Demo Vote Seeder Entry Point
//!
//! One-shot seeding pass: three demo model versions, ten demo voters,
//! skewed score draws. Safe to re-run; duplicate (user, model) pairs are
//! skipped by the vote uniqueness key.

use starboard_api::{seed, telemetry, ApiResult, DbClient, DbConfig};

#[tokio::main]
async fn main() -> ApiResult<()> {
    telemetry::init_tracing();

    let db_config = DbConfig::from_env();
    let db = DbClient::from_config(&db_config)?;

    let mut rng = rand::rng();
    let summary = seed::run_seed(&db, &mut rng).await?;

    tracing::info!(
        models = summary.reports.len(),
        inserted = summary.total_inserted(),
        "demo seeding complete"
    );

    Ok(())
}
