//! File-Backed Store Tests
//!
//! Writes accepted through the HTTP API must survive reopening the data
//! directory.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use plantdb::rest_api::{RestServer, TableNames};
use plantdb::store::LocalStore;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

async fn open_router(dir: &std::path::Path) -> Router {
    let store = LocalStore::open(dir, ["Plants", "Occurrences"])
        .await
        .expect("Failed to open store");
    RestServer::new(Arc::new(store), TableNames::default()).router()
}

#[tokio::test]
async fn test_posted_occurrence_survives_reopen() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    {
        let router = open_router(temp_dir.path()).await;
        let body = r#"{"Date":"2021-03-14","Accuracy":0.5,"Latitude":34.1,"Longitude":-118.2,"PlantID":7}"#;
        let response = router
            .oneshot(Request::post("/occurrences").body(Body::from(body)).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let router = open_router(temp_dir.path()).await;
    let response = router
        .oneshot(Request::get("/occurrences?id=7").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let records: Value = serde_json::from_slice(&bytes).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["Date"], "2021-03-14");
    assert_eq!(records[0]["PlantID"], 7);
}

#[tokio::test]
async fn test_corrupt_table_is_server_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let router = open_router(temp_dir.path()).await;
    std::fs::write(temp_dir.path().join("Plants.json"), "{ not an array").unwrap();

    let response = router
        .oneshot(Request::get("/species").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
