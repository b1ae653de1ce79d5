//! Database Connection Pool Module
//!
//! PostgreSQL connection pooling using deadpool-postgres, and a typed client
//! wrapper over the `model_version` / `vote` tables. All statements are plain
//! parameterized SQL; constraint enforcement (score range, vote uniqueness,
//! cascade) lives in the schema itself.

use crate::error::{ApiError, ApiResult};
use crate::types::{round1, round2, LeaderboardEntry};
use deadpool_postgres::{Config, ManagerConfig, Pool, RecyclingMethod, Runtime};
use starboard_core::{
    new_entity_id, provider_for, EntityId, ModelVersion, Score, ScoreHistogram, Vote,
};
use std::time::Duration;
use tokio_postgres::{NoTls, Row};

// ============================================================================
// CONNECTION POOL CONFIGURATION
// ============================================================================

/// Database connection pool configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// PostgreSQL host
    pub host: String,
    /// PostgreSQL port
    pub port: u16,
    /// Database name
    pub dbname: String,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
    /// Maximum pool size
    pub max_size: usize,
    /// Connection timeout
    pub timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            dbname: "starboard".to_string(),
            user: "postgres".to_string(),
            password: "".to_string(),
            max_size: 16,
            timeout: Duration::from_secs(30),
        }
    }
}

impl DbConfig {
    /// Create a new database configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("STARBOARD_DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: std::env::var("STARBOARD_DB_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5432),
            dbname: std::env::var("STARBOARD_DB_NAME")
                .unwrap_or_else(|_| "starboard".to_string()),
            user: std::env::var("STARBOARD_DB_USER")
                .unwrap_or_else(|_| "postgres".to_string()),
            password: std::env::var("STARBOARD_DB_PASSWORD").unwrap_or_default(),
            max_size: std::env::var("STARBOARD_DB_POOL_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(16),
            timeout: Duration::from_secs(
                std::env::var("STARBOARD_DB_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }

    /// Create a connection pool from this configuration.
    pub fn create_pool(&self) -> ApiResult<Pool> {
        let mut cfg = Config::new();
        cfg.host = Some(self.host.clone());
        cfg.port = Some(self.port);
        cfg.dbname = Some(self.dbname.clone());
        cfg.user = Some(self.user.clone());
        cfg.password = Some(self.password.clone());

        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| ApiError::database_error(format!("Failed to create pool: {}", e)))?;

        Ok(pool)
    }
}

// ============================================================================
// ROW MAPPING
// ============================================================================

fn model_version_from_row(row: &Row) -> ModelVersion {
    ModelVersion {
        model_version_id: row.get("id"),
        version: row.get("version"),
        provider: row.get("provider"),
        vote_count: row.get("vote_count"),
        created_at: row.get("created_at"),
    }
}

fn vote_from_row(row: &Row) -> ApiResult<Vote> {
    // The CHECK constraint keeps scores in range; a violation here means the
    // schema and the binary disagree.
    let score = Score::new(row.get("score"))
        .map_err(|e| ApiError::database_error(format!("Stored vote is invalid: {}", e)))?;

    Ok(Vote {
        vote_id: row.get("id"),
        user_id: row.get("user_id"),
        model_version_id: row.get("model_version_id"),
        score,
        created_at: row.get("created_at"),
    })
}

// ============================================================================
// DATABASE CLIENT WRAPPER
// ============================================================================

/// Aggregate vote statistics for a single model version.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelStats {
    /// Mean score, None when the model has no votes.
    pub average_score: Option<f64>,
    pub total_votes: i64,
}

/// Result of casting a vote.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteOutcome {
    pub vote: Vote,
    /// False when the vote replaced the user's previous score.
    pub newly_inserted: bool,
}

/// Database client that wraps a connection pool and provides
/// high-level operations over the model_version and vote tables.
#[derive(Clone)]
pub struct DbClient {
    pool: Pool,
}

impl DbClient {
    /// Create a new database client with the given pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create a new database client from configuration.
    pub fn from_config(config: &DbConfig) -> ApiResult<Self> {
        let pool = config.create_pool()?;
        Ok(Self::new(pool))
    }

    /// Get the current pool size for observability.
    pub fn pool_size(&self) -> usize {
        let status = self.pool.status();
        status.size
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> ApiResult<deadpool_postgres::Object> {
        self.pool.get().await.map_err(ApiError::from)
    }

    /// Cheap connectivity probe for readiness checks.
    pub async fn ping(&self) -> ApiResult<()> {
        let conn = self.get_conn().await?;
        conn.query_one("SELECT 1", &[]).await?;
        Ok(())
    }

    // ========================================================================
    // MODEL VERSION OPERATIONS
    // ========================================================================

    /// Insert a new model version. Fails with EntityAlreadyExists when the
    /// version label is taken.
    pub async fn model_version_create(
        &self,
        version: &str,
        provider: &str,
    ) -> ApiResult<ModelVersion> {
        let conn = self.get_conn().await?;

        let row = conn
            .query_one(
                "INSERT INTO model_version (id, version, provider) \
                 VALUES ($1, $2, $3) \
                 RETURNING id, version, provider, vote_count, created_at",
                &[&new_entity_id(), &version, &provider],
            )
            .await?;

        Ok(model_version_from_row(&row))
    }

    /// Get a model version by its version label.
    pub async fn model_version_get_by_version(
        &self,
        version: &str,
    ) -> ApiResult<Option<ModelVersion>> {
        let conn = self.get_conn().await?;

        let row = conn
            .query_opt(
                "SELECT id, version, provider, vote_count, created_at \
                 FROM model_version WHERE version = $1",
                &[&version],
            )
            .await?;

        Ok(row.as_ref().map(model_version_from_row))
    }

    /// Resolve a model version by label, creating it when absent.
    ///
    /// The provider is taken from the known-provider table. Insert-or-select
    /// rather than a blind upsert so a lost conflict never rewrites the
    /// existing row.
    pub async fn model_version_get_or_create(&self, version: &str) -> ApiResult<ModelVersion> {
        let conn = self.get_conn().await?;

        let inserted = conn
            .query_opt(
                "INSERT INTO model_version (id, version, provider) \
                 VALUES ($1, $2, $3) ON CONFLICT (version) DO NOTHING \
                 RETURNING id, version, provider, vote_count, created_at",
                &[&new_entity_id(), &version, &provider_for(version)],
            )
            .await?;

        if let Some(row) = inserted {
            return Ok(model_version_from_row(&row));
        }

        self.model_version_get_by_version(version)
            .await?
            .ok_or_else(|| ApiError::model_version_not_found(version))
    }

    /// List model versions, newest first.
    pub async fn model_version_list(
        &self,
        limit: i64,
        offset: i64,
    ) -> ApiResult<(Vec<ModelVersion>, i64)> {
        let conn = self.get_conn().await?;

        let rows = conn
            .query(
                "SELECT id, version, provider, vote_count, created_at \
                 FROM model_version ORDER BY created_at DESC LIMIT $1 OFFSET $2",
                &[&limit, &offset],
            )
            .await?;

        let total_row = conn
            .query_one("SELECT count(*) FROM model_version", &[])
            .await?;
        let total: i64 = total_row.get(0);

        Ok((rows.iter().map(model_version_from_row).collect(), total))
    }

    /// Delete a model version by label. Votes go with it via the cascade.
    ///
    /// Returns false when no such version exists.
    pub async fn model_version_delete(&self, version: &str) -> ApiResult<bool> {
        let conn = self.get_conn().await?;

        let deleted = conn
            .execute("DELETE FROM model_version WHERE version = $1", &[&version])
            .await?;

        Ok(deleted > 0)
    }

    // ========================================================================
    // VOTE OPERATIONS
    // ========================================================================

    /// Cast a vote: insert, or replace the caller's previous score for the
    /// same model. The vote_count counter is bumped in the same transaction,
    /// and only for genuinely new rows.
    pub async fn vote_cast(
        &self,
        model_version_id: EntityId,
        user_id: &str,
        score: Score,
    ) -> ApiResult<VoteOutcome> {
        let mut conn = self.get_conn().await?;
        let tx = conn.transaction().await?;

        let inserted = tx
            .query_opt(
                "INSERT INTO vote (id, user_id, model_version_id, score) \
                 VALUES ($1, $2, $3, $4) \
                 ON CONFLICT ON CONSTRAINT unique_user_model_vote DO NOTHING \
                 RETURNING id, user_id, model_version_id, score, created_at",
                &[&new_entity_id(), &user_id, &model_version_id, &score.value()],
            )
            .await?;

        let outcome = match inserted {
            Some(row) => {
                tx.execute(
                    "UPDATE model_version SET vote_count = vote_count + 1 WHERE id = $1",
                    &[&model_version_id],
                )
                .await?;
                VoteOutcome {
                    vote: vote_from_row(&row)?,
                    newly_inserted: true,
                }
            }
            None => {
                let row = tx
                    .query_one(
                        "UPDATE vote SET score = $1 \
                         WHERE user_id = $2 AND model_version_id = $3 \
                         RETURNING id, user_id, model_version_id, score, created_at",
                        &[&score.value(), &user_id, &model_version_id],
                    )
                    .await?;
                VoteOutcome {
                    vote: vote_from_row(&row)?,
                    newly_inserted: false,
                }
            }
        };

        tx.commit().await?;
        Ok(outcome)
    }

    /// Seed-style insert: one vote per (user, model) pair, duplicates
    /// silently skipped. Returns whether a row was actually inserted.
    pub async fn vote_seed_insert(
        &self,
        model_version_id: EntityId,
        user_id: &str,
        score: Score,
    ) -> ApiResult<bool> {
        let mut conn = self.get_conn().await?;
        let tx = conn.transaction().await?;

        let inserted = tx
            .query_opt(
                "INSERT INTO vote (id, user_id, model_version_id, score) \
                 VALUES ($1, $2, $3, $4) \
                 ON CONFLICT ON CONSTRAINT unique_user_model_vote DO NOTHING \
                 RETURNING id",
                &[&new_entity_id(), &user_id, &model_version_id, &score.value()],
            )
            .await?
            .is_some();

        if inserted {
            tx.execute(
                "UPDATE model_version SET vote_count = vote_count + 1 WHERE id = $1",
                &[&model_version_id],
            )
            .await?;
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Aggregate vote statistics for one model version.
    pub async fn model_version_stats(&self, model_version_id: EntityId) -> ApiResult<ModelStats> {
        let conn = self.get_conn().await?;

        let row = conn
            .query_one(
                "SELECT avg(score)::float8, count(*) FROM vote WHERE model_version_id = $1",
                &[&model_version_id],
            )
            .await?;

        Ok(ModelStats {
            average_score: row.get(0),
            total_votes: row.get(1),
        })
    }

    /// Recompute every vote_count from the vote table. Repair tool for the
    /// denormalized counter; returns the number of model versions touched.
    pub async fn vote_recount(&self) -> ApiResult<u64> {
        let conn = self.get_conn().await?;

        let updated = conn
            .execute(
                "UPDATE model_version SET vote_count = \
                 (SELECT count(*) FROM vote WHERE vote.model_version_id = model_version.id)",
                &[],
            )
            .await?;

        Ok(updated)
    }

    // ========================================================================
    // LEADERBOARD
    // ========================================================================

    /// Aggregate standings for every model version, best average first,
    /// zero-vote models last. Aggregates come from the vote table directly,
    /// never from the vote_count counter.
    pub async fn leaderboard(&self) -> ApiResult<Vec<LeaderboardEntry>> {
        let conn = self.get_conn().await?;

        let rows = conn
            .query(
                "SELECT mv.version, mv.provider, \
                        count(v.id) AS total_votes, \
                        avg(v.score)::float8 AS average_score, \
                        count(*) FILTER (WHERE v.score = 1) AS score_1, \
                        count(*) FILTER (WHERE v.score = 2) AS score_2, \
                        count(*) FILTER (WHERE v.score = 3) AS score_3, \
                        count(*) FILTER (WHERE v.score = 4) AS score_4, \
                        count(*) FILTER (WHERE v.score = 5) AS score_5 \
                 FROM model_version mv \
                 LEFT JOIN vote v ON v.model_version_id = mv.id \
                 GROUP BY mv.id, mv.version, mv.provider \
                 ORDER BY avg(v.score) DESC NULLS LAST, mv.version ASC",
                &[],
            )
            .await?;

        let entries = rows
            .iter()
            .map(|row| {
                let average_score: Option<f64> = row.get("average_score");
                let average_score = average_score.unwrap_or(0.0);
                LeaderboardEntry {
                    model_version: row.get("version"),
                    provider: row.get("provider"),
                    total_votes: row.get("total_votes"),
                    average_score: round2(average_score),
                    score_percentage: round1(Score::percentage_of(average_score)),
                    score_breakdown: ScoreHistogram {
                        score_1: row.get("score_1"),
                        score_2: row.get("score_2"),
                        score_3: row.get("score_3"),
                        score_4: row.get("score_4"),
                        score_5: row.get("score_5"),
                    },
                }
            })
            .collect();

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_config_defaults() {
        let config = DbConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.dbname, "starboard");
        assert_eq!(config.max_size, 16);
    }

    #[test]
    fn test_model_stats_empty_model() {
        let stats = ModelStats {
            average_score: None,
            total_votes: 0,
        };
        assert_eq!(stats.average_score, None);
        assert_eq!(stats.total_votes, 0);
    }
}
