use sqlx::PgPool;
use thiserror::Error;

/// Migration error types
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Migration failed: {0}")]
    Failed(#[from] sqlx::migrate::MigrateError),
}

/// Migration status information
#[derive(Debug, Clone)]
pub struct MigrationStatus {
    /// Version number of the migration
    pub version: i64,
    /// Description of the migration
    pub description: String,
    /// Whether the migration has been applied
    pub applied: bool,
}

/// Migration manager for handling database schema migrations
pub struct MigrationManager {
    pool: PgPool,
}

impl MigrationManager {
    /// Create a new migration manager
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run all pending migrations in version order, using sqlx's built-in
    /// migration system.
    pub async fn run_migrations(&self) -> Result<(), MigrationError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(MigrationError::Failed)?;
        Ok(())
    }

    /// Check migration status
    pub async fn check_status(&self) -> Result<Vec<MigrationStatus>, MigrationError> {
        let migrator = sqlx::migrate!("./migrations");

        let applied_migrations: Vec<(i64,)> =
            sqlx::query_as("SELECT version FROM _sqlx_migrations ORDER BY version")
                .fetch_all(&self.pool)
                .await
                .unwrap_or_default();

        let applied_versions: std::collections::HashSet<i64> =
            applied_migrations.iter().map(|(v,)| *v).collect();

        let mut statuses = Vec::new();
        for migration in migrator.iter() {
            statuses.push(MigrationStatus {
                version: migration.version,
                description: migration.description.to_string(),
                applied: applied_versions.contains(&migration.version),
            });
        }

        Ok(statuses)
    }

    /// Check if there are pending migrations
    pub async fn has_pending_migrations(&self) -> Result<bool, MigrationError> {
        let status = self.check_status().await?;
        Ok(status.iter().any(|s| !s.applied))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_status_creation() {
        let status = MigrationStatus {
            version: 1,
            description: "Initial schema".to_string(),
            applied: true,
        };

        assert_eq!(status.version, 1);
        assert_eq!(status.description, "Initial schema");
        assert!(status.applied);
    }
}
