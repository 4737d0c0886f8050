use std::env;

use fishcat_core::config::CatalogConfig;
use fishcat_core::error::Result;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    pub database_url: String,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Database credentials are required: the API has no in-memory fallback,
    /// so a missing `DATABASE_URL` (or `PGUSER`/`PGPASSWORD` pair) is fatal.
    pub fn from_env() -> Result<Self> {
        let port = env::var("FISHCAT_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(8000);

        let cors_origin =
            env::var("FISHCAT_CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let database = CatalogConfig::from_env()?;

        Ok(Self {
            port,
            cors_origin,
            database_url: database.database_url,
        })
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
