use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::UnitTypeResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_unit_types(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UnitTypeResponse>>, ApiError> {
    tracing::info!("Listing management unit types");

    let unit_types = state.registry.list_unit_types().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list unit types");
        ApiError::from(e)
    })?;

    Ok(Json(unit_types.into_iter().map(UnitTypeResponse::from).collect()))
}
