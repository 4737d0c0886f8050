use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes.
///
/// Every list route is also registered under a `.json` suffix; JSON is the
/// only served format, so both spellings return the same body.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Management unit types
        .route("/api/v1/management_unit_types", get(handlers::list_unit_types))
        .route("/api/v1/management_unit_types.json", get(handlers::list_unit_types))

        // Management units
        .route("/api/v1/management_units", get(handlers::list_units))
        .route("/api/v1/management_units.json", get(handlers::list_units))

        // Projects
        .route("/api/v1/projects", get(handlers::list_projects))
        .route("/api/v1/projects.json", get(handlers::list_projects))

        // Samples
        .route("/api/v1/samples", get(handlers::list_samples))
        .route("/api/v1/samples.json", get(handlers::list_samples))

        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
