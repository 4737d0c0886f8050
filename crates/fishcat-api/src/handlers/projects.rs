use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::ProjectResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_projects(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    tracing::info!("Listing projects");

    let projects = state.projects.list_projects().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list projects");
        ApiError::from(e)
    })?;

    Ok(Json(projects.into_iter().map(ProjectResponse::from).collect()))
}
