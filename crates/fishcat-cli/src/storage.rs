use crate::cli::StorageBackend;
use anyhow::{Context, Result};
use fishcat_store::memory::MemoryStore;
use fishcat_store::ports::{ProjectStore, RegistryStore, SampleStore};
use fishcat_store::postgres::{PostgresConfig, PostgresStore};
use std::sync::Arc;

/// Parse database URL to extract connection details for error messages
fn parse_database_url(url: &str) -> (String, String, String) {
    let host = url
        .split('@')
        .nth(1)
        .and_then(|s| s.split('/').next())
        .and_then(|s| s.split(':').next())
        .unwrap_or("localhost")
        .to_string();

    let port = url
        .split('@')
        .nth(1)
        .and_then(|s| s.split('/').next())
        .and_then(|s| s.split(':').nth(1))
        .unwrap_or("5432")
        .to_string();

    let database = url
        .split('/')
        .next_back()
        .and_then(|s| s.split('?').next())
        .unwrap_or("fishcat")
        .to_string();

    (host, port, database)
}

pub struct Storage {
    pub registry: Arc<dyn RegistryStore>,
    pub projects: Arc<dyn ProjectStore>,
    pub samples: Arc<dyn SampleStore>,
}

impl Storage {
    pub async fn new(backend: StorageBackend) -> Result<Self> {
        match backend {
            StorageBackend::Memory => Self::new_memory(),
            StorageBackend::Postgres => Self::new_postgres().await,
        }
    }

    /// Create in-memory storage adapters
    fn new_memory() -> Result<Self> {
        let store = Arc::new(MemoryStore::new());
        Ok(Self {
            registry: store.clone(),
            projects: store.clone(),
            samples: store,
        })
    }

    /// Create PostgreSQL storage adapters
    async fn new_postgres() -> Result<Self> {
        let config = PostgresConfig::from_env().context(
            "Failed to load PostgreSQL configuration. \
             Set DATABASE_URL or PGUSER/PGPASSWORD environment variables.",
        )?;

        let store = PostgresStore::with_migrations(config.clone()).await.map_err(|e| {
            let (host, port, database) = parse_database_url(&config.database_url);

            anyhow::anyhow!(
                "Failed to connect to PostgreSQL\n\n\
                    Connection details:\n\
                      Host: {}\n\
                      Port: {}\n\
                      Database: {}\n\n\
                    Remediation:\n\
                      1. Ensure PostgreSQL is running with the PostGIS extension\n\
                      2. Check DATABASE_URL environment variable\n\
                      3. Verify credentials and database exists\n\
                      4. Test connection: psql {}\n\n\
                    Error: {}",
                host,
                port,
                database,
                config.database_url,
                e
            )
        })?;
        let store = Arc::new(store);

        Ok(Self {
            registry: store.clone(),
            projects: store.clone(),
            samples: store,
        })
    }
}
