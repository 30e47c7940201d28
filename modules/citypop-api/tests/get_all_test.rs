//! Drives the query service router in-process.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use citypop_api::{router, AppState};
use citypop_common::{CityPopError, CityRecord};
use citypop_store::{CityStore, MemoryCityStore};

struct BrokenStore;

#[async_trait]
impl CityStore for BrokenStore {
    async fn fetch_all(&self) -> Result<Vec<CityRecord>, CityPopError> {
        Err(CityPopError::Database("connection refused".to_string()))
    }
}

fn scenario_records() -> Vec<CityRecord> {
    vec![
        CityRecord::new(1, "A", "P1", 1000.0, 800.0, 25.0),
        CityRecord::new(2, "B", "P2", 500.0, 600.0, -16.7),
    ]
}

async fn get(store: Arc<dyn CityStore>, uri: &str) -> (StatusCode, serde_json::Value) {
    let app = router(Arc::new(AppState::new(store)));
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

#[tokio::test]
async fn get_all_returns_records_in_store_order() {
    let store = Arc::new(MemoryCityStore::new(scenario_records()));
    let (status, body) = get(store, "/api/data/getAll").await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["City"], "A");
    assert_eq!(rows[0]["Population_2017_Census"], 1000.0);
    assert_eq!(rows[1]["City"], "B");
    assert_eq!(rows[1]["Change"], -16.7);
}

#[tokio::test]
async fn empty_store_is_not_found() {
    let store = Arc::new(MemoryCityStore::default());
    let (status, body) = get(store, "/api/data/getAll").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No data found");
}

#[tokio::test]
async fn store_failure_is_internal_error_with_cause() {
    let (status, body) = get(Arc::new(BrokenStore), "/api/data/getAll").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("connection refused"), "{message}");
}

#[tokio::test]
async fn root_answers_hello() {
    let app = router(Arc::new(AppState::new(Arc::new(MemoryCityStore::default()))));
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"Hello, World!");
}

#[tokio::test]
async fn list_all_distinguishes_empty_from_failure() {
    let empty = citypop_api::rest::list_all(&MemoryCityStore::default()).await;
    assert!(matches!(empty, Err(CityPopError::NotFound)));

    let broken = citypop_api::rest::list_all(&BrokenStore).await;
    assert!(matches!(broken, Err(CityPopError::Database(_))));
}
