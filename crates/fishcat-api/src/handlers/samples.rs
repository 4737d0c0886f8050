use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use fishcat_store::ports::SampleQuery;

use crate::dto::SampleResponse;
use crate::error::ApiError;
use crate::pagination::{clamp_page_size, Page};
use crate::state::AppState;

#[derive(Debug, Deserialize, Default)]
pub struct SampleListParams {
    pub mu_type: Option<String>,
    pub year: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

pub async fn list_samples(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SampleListParams>,
) -> Result<Json<Page<SampleResponse>>, ApiError> {
    let page = params.page.unwrap_or(1).max(1);
    let page_size = clamp_page_size(params.page_size);
    let year = params.year.clone().unwrap_or_else(|| "2010".to_string());

    tracing::info!(year = %year, mu_type = ?params.mu_type, page = page, "Listing samples");

    let query = SampleQuery {
        mu_type: params.mu_type.clone(),
        year: year.clone(),
        page,
        page_size,
    };

    let listing = state.samples.list_samples(&query).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list samples");
        ApiError::from(e)
    })?;

    let mut extra: Vec<(&str, &str)> = vec![("year", year.as_str())];
    if let Some(mu_type) = params.mu_type.as_deref() {
        extra.push(("mu_type", mu_type));
    }

    let results = listing.results.into_iter().map(SampleResponse::from).collect();

    Ok(Json(Page::new(
        "/api/v1/samples",
        &extra,
        page,
        page_size,
        listing.count,
        results,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fishcat_core::models::{
        Fn011, Fn121, Geometry, Lake, LakeId, ManagementUnit, ManagementUnitType, ProjectId,
        SampleId, UnitId, UnitTypeId,
    };
    use fishcat_store::memory::MemoryStore;
    use fishcat_store::ports::{ProjectStore, RegistryStore, SampleStore};

    fn unit_square_boundary() -> Geometry {
        Geometry::multi_polygon(vec![vec![vec![
            [0.0, 0.0],
            [10.0, 0.0],
            [10.0, 10.0],
            [0.0, 10.0],
            [0.0, 0.0],
        ]]])
    }

    fn new_sample(project_id: ProjectId, sam: &str, lon: f64, lat: f64) -> Fn121 {
        Fn121 {
            id: SampleId(0),
            project_id,
            sam: sam.to_string(),
            slug: String::new(),
            grtp: None,
            gr: None,
            effdt0: None,
            effdt1: None,
            effdur: None,
            efftm0: None,
            efftm1: None,
            effst: None,
            orient: None,
            sidep: None,
            secchi: None,
            site: None,
            sitem: None,
            dd_lat: Some(lat),
            dd_lon: Some(lon),
            geom: None,
            comment1: None,
            management_units: Vec::new(),
        }
    }

    async fn seeded_state() -> Arc<AppState> {
        let store = Arc::new(MemoryStore::new());

        let lake = store
            .create_lake(&Lake {
                id: LakeId(0),
                abbrev: "HU".to_string(),
                lake_name: "Lake Huron".to_string(),
                boundary: None,
            })
            .await
            .unwrap();

        let mu_type = store
            .create_unit_type(&ManagementUnitType {
                id: UnitTypeId(0),
                label: "Quota Management Area".to_string(),
                abbrev: "QMA".to_string(),
                description: String::new(),
            })
            .await
            .unwrap();

        store
            .create_unit(&ManagementUnit {
                id: UnitId(0),
                label: "MU 1".to_string(),
                slug: String::new(),
                description: String::new(),
                boundary: Some(unit_square_boundary()),
                lake_id: lake.id,
                mu_type_id: mu_type.id,
                primary: true,
            })
            .await
            .unwrap();

        let project = store
            .create_project(&Fn011 {
                id: ProjectId(0),
                lake_id: lake.id,
                year: "2010".to_string(),
                prj_cd: "LHA_IA10_123".to_string(),
                slug: String::new(),
                prj_nm: "Offshore Index".to_string(),
                prj_date0: NaiveDate::from_ymd_opt(2010, 6, 1).unwrap(),
                prj_date1: NaiveDate::from_ymd_opt(2010, 8, 31).unwrap(),
                comment0: None,
            })
            .await
            .unwrap();

        // One sample inside the unit boundary, one outside.
        store
            .create_sample(&new_sample(project.id, "001", 5.0, 5.0))
            .await
            .unwrap();
        store
            .create_sample(&new_sample(project.id, "002", 50.0, 50.0))
            .await
            .unwrap();

        Arc::new(AppState::new(store.clone(), store.clone(), store))
    }

    #[tokio::test]
    async fn test_default_year_and_primary_units() {
        let state = seeded_state().await;

        let Json(page) = list_samples(State(state), Query(SampleListParams::default()))
            .await
            .unwrap();

        assert_eq!(page.count, 2);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].sam, "001");
        assert_eq!(page.results[0].management_units.len(), 1);
        assert_eq!(page.results[0].management_units[0].slug, "hu_qma_mu_1");
        assert!(page.results[1].management_units.is_empty());
    }

    #[tokio::test]
    async fn test_year_filter_excludes_other_years() {
        let state = seeded_state().await;

        let params = SampleListParams {
            year: Some("1999".to_string()),
            ..Default::default()
        };
        let Json(page) = list_samples(State(state), Query(params)).await.unwrap();

        assert_eq!(page.count, 0);
        assert!(page.results.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_mu_type_yields_empty_unit_lists() {
        let state = seeded_state().await;

        let params = SampleListParams {
            mu_type: Some("nosuch".to_string()),
            ..Default::default()
        };
        let Json(page) = list_samples(State(state), Query(params)).await.unwrap();

        assert_eq!(page.count, 2);
        assert!(page.results.iter().all(|s| s.management_units.is_empty()));
    }

    #[tokio::test]
    async fn test_pagination_links_carry_filters() {
        let state = seeded_state().await;

        let params = SampleListParams {
            page: Some(1),
            page_size: Some(1),
            ..Default::default()
        };
        let Json(page) = list_samples(State(state), Query(params)).await.unwrap();

        assert_eq!(page.count, 2);
        assert_eq!(page.results.len(), 1);
        assert_eq!(
            page.next.as_deref(),
            Some("/api/v1/samples?page=2&page_size=1&year=2010")
        );
        assert_eq!(page.previous, None);
    }

    #[tokio::test]
    async fn test_page_size_clamped_to_cap() {
        let state = seeded_state().await;

        let params = SampleListParams {
            page_size: Some(99_999),
            ..Default::default()
        };
        let Json(page) = list_samples(State(state), Query(params)).await.unwrap();

        assert_eq!(page.count, 2);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.next, None);
    }
}
