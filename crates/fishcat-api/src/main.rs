use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use fishcat_store::postgres::{PostgresConfig, PostgresStore};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fishcat_api::config::ApiConfig;
use fishcat_api::router::create_router;
use fishcat_api::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fishcat_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match ApiConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            tracing::error!(
                "Remediation:\n\
                1. Set DATABASE_URL to a PostgreSQL connection string, or\n\
                2. Set PGUSER and PGPASSWORD (plus PGHOST/PGPORT/PGDATABASE as needed)"
            );
            std::process::exit(1);
        }
    };

    tracing::info!(port = config.port, "Starting fishcat API server");

    let store = match init_postgres_storage(&config.database_url).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to connect to PostgreSQL: {}", e);
            tracing::error!(
                "Remediation:\n\
                1. Ensure PostgreSQL is running with the PostGIS extension available\n\
                2. Verify DATABASE_URL is correct\n\
                3. Check that the database exists and is accessible"
            );
            std::process::exit(1);
        }
    };
    tracing::info!("Connected to PostgreSQL");

    let state = Arc::new(AppState::new(store.clone(), store.clone(), store));

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .cors_origin
                .parse::<HeaderValue>()
                .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:3000")),
        )
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = create_router(state).layer(cors);

    let addr = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", config.cors_origin);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize PostgreSQL storage from a database URL, running migrations
async fn init_postgres_storage(database_url: &str) -> Result<Arc<PostgresStore>, String> {
    let config = PostgresConfig::new(database_url.to_string())
        .map_err(|e| format!("Invalid DATABASE_URL: {}", e))?;

    PostgresStore::with_migrations(config)
        .await
        .map(Arc::new)
        .map_err(|e| format!("Connection failed: {}", e))
}
