//! Schema Migration Entry Point
//!
//! Connects with the same environment configuration as the API server and
//! applies pending migrations. Exits cleanly when the schema is already
//! up to date.

use starboard_api::{telemetry, ApiError, ApiResult, DbConfig};
use starboard_schema::Migrator;
use tokio_postgres::NoTls;

#[tokio::main]
async fn main() -> ApiResult<()> {
    telemetry::init_tracing();

    let db_config = DbConfig::from_env();

    let (mut client, connection) = tokio_postgres::Config::new()
        .host(&db_config.host)
        .port(db_config.port)
        .dbname(&db_config.dbname)
        .user(&db_config.user)
        .password(&db_config.password)
        .connect(NoTls)
        .await
        .map_err(|e| ApiError::database_error(format!("Failed to connect: {}", e)))?;

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!("Database connection error: {}", e);
        }
    });

    let applied = Migrator::new()
        .run(&mut client)
        .await
        .map_err(|e| ApiError::database_error(e.to_string()))?;

    if applied.is_empty() {
        tracing::info!("Schema already up to date");
    } else {
        tracing::info!(count = applied.len(), "Applied pending migrations");
    }

    Ok(())
}
