//! Route-level checks: every list route and its `.json` twin answer on a
//! freshly wired state.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use fishcat_api::{create_router, AppState};
use fishcat_store::memory::MemoryStore;

fn test_state() -> Arc<AppState> {
    let store = Arc::new(MemoryStore::new());
    Arc::new(AppState::new(store.clone(), store.clone(), store))
}

async fn get(uri: &str) -> StatusCode {
    let app = create_router(test_state());
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    response.status()
}

#[tokio::test]
async fn test_health_route() {
    assert_eq!(get("/health").await, StatusCode::OK);
}

#[tokio::test]
async fn test_list_routes_answer() {
    for uri in [
        "/api/v1/management_unit_types",
        "/api/v1/management_units",
        "/api/v1/projects",
        "/api/v1/samples",
    ] {
        assert_eq!(get(uri).await, StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn test_json_suffix_twins_answer() {
    for uri in [
        "/api/v1/management_unit_types.json",
        "/api/v1/management_units.json",
        "/api/v1/projects.json",
        "/api/v1/samples.json",
    ] {
        assert_eq!(get(uri).await, StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    assert_eq!(get("/api/v1/boundaries").await, StatusCode::NOT_FOUND);
}
