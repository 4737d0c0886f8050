use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use fishcat_store::ports::UnitFilter;

use crate::dto::UnitResponse;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UnitListParams {
    pub lake: Option<String>,
    pub mu_type: Option<String>,
    pub search: Option<String>,
}

pub async fn list_units(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UnitListParams>,
) -> Result<Json<Vec<UnitResponse>>, ApiError> {
    tracing::info!(
        lake = ?params.lake,
        mu_type = ?params.mu_type,
        "Listing management units"
    );

    let filter = UnitFilter {
        lake: params.lake,
        mu_type: params.mu_type,
        search: params.search,
    };

    let units = state.registry.list_units(&filter).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list units");
        ApiError::from(e)
    })?;

    Ok(Json(units.into_iter().map(UnitResponse::from).collect()))
}
