//! Migration runner.

use thiserror::Error;
use tokio_postgres::Client;

use crate::migrations::{Migration, ALL_MIGRATIONS};

/// Errors raised while applying or reverting migrations.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("migration {version} ({name}) failed: {source}")]
    MigrationFailed {
        version: i32,
        name: &'static str,
        #[source]
        source: tokio_postgres::Error,
    },

    #[error("schema bookkeeping query failed: {0}")]
    Bookkeeping(#[from] tokio_postgres::Error),
}

/// Record of one applied migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    pub version: i32,
    pub name: String,
}

const CREATE_BOOKKEEPING: &str = r#"
CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
"#;

/// Applies pending migrations in version order, one transaction each.
pub struct Migrator {
    migrations: &'static [Migration],
}

impl Default for Migrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Migrator {
    pub fn new() -> Self {
        Self {
            migrations: ALL_MIGRATIONS,
        }
    }

    /// Apply every migration not yet recorded in `schema_migrations`.
    ///
    /// Returns the migrations applied by this call, oldest first. Calling
    /// again immediately returns an empty list.
    pub async fn run(&self, client: &mut Client) -> Result<Vec<AppliedMigration>, SchemaError> {
        client.batch_execute(CREATE_BOOKKEEPING).await?;

        let rows = client
            .query("SELECT version FROM schema_migrations", &[])
            .await?;
        let applied: Vec<i32> = rows.iter().map(|row| row.get(0)).collect();

        let mut newly_applied = Vec::new();
        for migration in self.migrations {
            if applied.contains(&migration.version) {
                continue;
            }

            let tx = client.transaction().await?;
            let result = async {
                tx.batch_execute(migration.up).await?;
                tx.execute(
                    "INSERT INTO schema_migrations (version, name) VALUES ($1, $2)",
                    &[&migration.version, &migration.name],
                )
                .await?;
                Ok::<_, tokio_postgres::Error>(())
            }
            .await;

            match result {
                Ok(()) => tx.commit().await?,
                Err(source) => {
                    // Rolled back on drop; surface which version broke.
                    return Err(SchemaError::MigrationFailed {
                        version: migration.version,
                        name: migration.name,
                        source,
                    });
                }
            }

            tracing::info!(
                version = migration.version,
                name = migration.name,
                "applied migration"
            );
            newly_applied.push(AppliedMigration {
                version: migration.version,
                name: migration.name.to_string(),
            });
        }

        Ok(newly_applied)
    }

    /// Revert the most recently applied migration, if any.
    pub async fn revert_latest(
        &self,
        client: &mut Client,
    ) -> Result<Option<AppliedMigration>, SchemaError> {
        client.batch_execute(CREATE_BOOKKEEPING).await?;

        let row = client
            .query_opt(
                "SELECT version FROM schema_migrations ORDER BY version DESC LIMIT 1",
                &[],
            )
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let version: i32 = row.get(0);

        let Some(migration) = self.migrations.iter().find(|m| m.version == version) else {
            // Recorded by a newer binary than this one; refuse to guess.
            return Ok(None);
        };

        let tx = client.transaction().await?;
        let result = async {
            tx.batch_execute(migration.down).await?;
            tx.execute(
                "DELETE FROM schema_migrations WHERE version = $1",
                &[&migration.version],
            )
            .await?;
            Ok::<_, tokio_postgres::Error>(())
        }
        .await;

        match result {
            Ok(()) => tx.commit().await?,
            Err(source) => {
                return Err(SchemaError::MigrationFailed {
                    version: migration.version,
                    name: migration.name,
                    source,
                });
            }
        }

        tracing::info!(
            version = migration.version,
            name = migration.name,
            "reverted migration"
        );
        Ok(Some(AppliedMigration {
            version: migration.version,
            name: migration.name.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookkeeping_table_name_is_stable() {
        // Renaming schema_migrations would orphan every deployed database.
        assert!(CREATE_BOOKKEEPING.contains("schema_migrations"));
    }

    #[test]
    fn test_migrator_covers_all_migrations() {
        let migrator = Migrator::new();
        assert_eq!(migrator.migrations.len(), ALL_MIGRATIONS.len());
    }
}
