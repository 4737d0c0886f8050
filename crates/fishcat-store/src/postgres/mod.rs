//! PostgreSQL/PostGIS storage adapter implementation

pub mod catalog;
pub mod config;
pub mod migrations;
pub mod registry;

pub use config::{PoolConfig, PostgresConfig};
pub use migrations::{MigrationError, MigrationManager, MigrationStatus};

use fishcat_core::error::{CatalogError, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};

/// PostgreSQL storage adapter
pub struct PostgresStore {
    pool: PgPool,
    config: PostgresConfig,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given configuration
    pub async fn new(config: PostgresConfig) -> Result<Self> {
        config.validate().map_err(|e| CatalogError::ConfigInvalid {
            key: "database_url".to_string(),
            reason: e.to_string(),
        })?;

        let pool = PgPoolOptions::new()
            .min_connections(config.pool.min_connections)
            .max_connections(config.pool.max_connections)
            .acquire_timeout(config.pool.acquire_timeout)
            .idle_timeout(config.pool.idle_timeout)
            .max_lifetime(config.pool.max_lifetime)
            .connect(&config.database_url)
            .await
            .map_err(|e| CatalogError::Database(format!("Failed to connect to database: {}", e)))?;

        // Test connection by executing a simple query
        sqlx::query("SELECT 1")
            .fetch_one(&pool)
            .await
            .map_err(|e| CatalogError::Database(format!("Connection test failed: {}", e)))?;

        Ok(Self { pool, config })
    }

    /// Create a new PostgreSQL store and run migrations
    pub async fn with_migrations(config: PostgresConfig) -> Result<Self> {
        let store = Self::new(config).await?;
        store.run_migrations().await?;
        Ok(store)
    }

    /// Run all pending migrations
    pub async fn run_migrations(&self) -> Result<()> {
        let manager = MigrationManager::new(self.pool.clone());
        manager
            .run_migrations()
            .await
            .map_err(|e| CatalogError::Database(format!("Migration failed: {}", e)))?;
        Ok(())
    }

    /// Check migration status
    pub async fn migration_status(&self) -> Result<Vec<MigrationStatus>> {
        let manager = MigrationManager::new(self.pool.clone());
        manager
            .check_status()
            .await
            .map_err(|e| CatalogError::Database(format!("Failed to check migration status: {}", e)))
    }

    /// Check if there are pending migrations
    pub async fn has_pending_migrations(&self) -> Result<bool> {
        let manager = MigrationManager::new(self.pool.clone());
        manager
            .has_pending_migrations()
            .await
            .map_err(|e| CatalogError::Database(format!("Failed to check pending migrations: {}", e)))
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &PostgresConfig {
        &self.config
    }

    /// Perform a health check on the database connection
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| CatalogError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }
}

/// True when the error is a PostgreSQL unique violation (SQLSTATE 23505).
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

/// Map an sqlx error to the domain error: unique violations become
/// `Duplicate`, everything else is a database failure.
pub(crate) fn map_save_error(
    err: sqlx::Error,
    entity: &str,
    value: &str,
    context: &str,
) -> CatalogError {
    if is_unique_violation(&err) {
        CatalogError::duplicate(entity, value)
    } else {
        CatalogError::Database(format!("{}: {}", context, err))
    }
}

/// Map a non-save sqlx error to a database failure with context.
pub(crate) fn db_error(context: &str, err: sqlx::Error) -> CatalogError {
    CatalogError::Database(format!("{}: {}", context, err))
}
