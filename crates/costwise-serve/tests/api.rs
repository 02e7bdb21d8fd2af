// Integration tests for the HTTP API
//
// Requests go through the full router (routes, CORS, tracing, state) via
// `tower::ServiceExt::oneshot`, without binding a socket.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use costwise_serve::{initialize, server::build_app, AppState, ServerConfig};
use costwise_store::{
    MemoryStore, NewResource, Resource, ResourceStore, Result as StorageResult, Storage,
    StorageError,
};
use rstest::rstest;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Store whose every call fails, standing in for a lost database.
struct FailingStore;

impl ResourceStore for FailingStore {
    fn list_resources(&self) -> StorageResult<Vec<Resource>> {
        Err(StorageError::InvalidRecord("connection lost".to_string()))
    }

    fn insert_resource(&mut self, _new: &NewResource) -> StorageResult<Resource> {
        Err(StorageError::InvalidRecord("connection lost".to_string()))
    }

    fn count_resources(&self) -> StorageResult<usize> {
        Err(StorageError::InvalidRecord("connection lost".to_string()))
    }
}

fn seeded_app() -> Router {
    let mut storage = Storage::open_in_memory().unwrap();
    initialize(&mut storage, true).unwrap();
    build_app(AppState::new(storage, ServerConfig::default()))
}

fn app_with<S: ResourceStore + 'static>(store: S) -> Router {
    build_app(AppState::new(store, ServerConfig::default()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn post_json(app: Router, uri: &str, payload: &Value) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn test_root_and_health() {
    let (status, body) = get(seeded_app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "Cloud Optimization Dashboard API", "status": "running"})
    );

    let (status, body) = get(seeded_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_resources_lists_seed_data_in_order() {
    let (status, body) = get(seeded_app(), "/resources").await;
    assert_eq!(status, StatusCode::OK);

    let resources = body.as_array().unwrap();
    assert_eq!(resources.len(), 8);
    assert_eq!(resources[0]["id"], 1);
    assert_eq!(resources[0]["name"], "web-server-1");
    assert_eq!(resources[0]["resource_type"], "compute");
    assert_eq!(resources[0]["cpu_utilization"], 15.0);

    let backup = &resources[5];
    assert_eq!(backup["name"], "backup-storage");
    assert_eq!(backup["resource_type"], "storage");
    assert!(backup["cpu_utilization"].is_null());
    assert_eq!(backup["storage_gb"], 1000.0);
    assert!(backup["created_at"].is_string());
}

#[tokio::test]
async fn test_recommendations_for_seed_data() {
    let (status, body) = get(seeded_app(), "/recommendations").await;
    assert_eq!(status, StatusCode::OK);

    let recs = body.as_array().unwrap();
    assert_eq!(recs.len(), 4);

    assert_eq!(
        recs[0],
        json!({
            "resource_id": 1,
            "resource_name": "web-server-1",
            "type": "downsize_instance",
            "current_config": "t3.xlarge - 15.0% CPU, 25.0% Memory",
            "recommended_config": "Smaller instance type (50% less resources)",
            "reasoning": "Low utilization detected: 15.0% CPU, 25.0% Memory",
            "monthly_savings": 75.0,
            "confidence": "High"
        })
    );

    assert_eq!(recs[1]["resource_name"], "api-server-2");
    assert_eq!(recs[1]["confidence"], "Medium");
    assert_eq!(recs[2]["resource_name"], "worker-3");

    assert_eq!(recs[3]["resource_name"], "backup-storage");
    assert_eq!(recs[3]["type"], "optimize_storage");
    assert_eq!(recs[3]["recommended_config"], "700GB S3 Standard");
    assert_eq!(recs[3]["monthly_savings"], 30.0);
    assert_eq!(recs[3]["confidence"], "Medium");
}

#[tokio::test]
async fn test_summary_for_seed_data() {
    let (status, body) = get(seeded_app(), "/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "total_resources": 8,
            "total_monthly_cost": 740.0,
            "total_potential_savings": 185.0,
            "optimization_opportunities": 4
        })
    );
}

#[tokio::test]
async fn test_empty_store() {
    let (status, body) = get(app_with(MemoryStore::new()), "/recommendations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (_, body) = get(app_with(MemoryStore::new()), "/summary").await;
    assert_eq!(body["total_resources"], 0);
    assert_eq!(body["total_potential_savings"], 0.0);
}

#[tokio::test]
async fn test_created_resource_is_recommended() {
    let state = AppState::new(MemoryStore::new(), ServerConfig::default());

    let payload = json!({
        "name": "idle-vm",
        "resource_type": "compute",
        "provider": "Azure",
        "instance_type": "Standard_D4s_v3",
        "cpu_utilization": 5.0,
        "memory_utilization": 10.0,
        "monthly_cost": 240.0
    });
    let (status, bytes) = post_json(build_app(state.clone()), "/resources", &payload).await;
    assert_eq!(status, StatusCode::OK);
    let created: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(created["id"], 1);
    assert!(created["storage_gb"].is_null());

    let (_, body) = get(build_app(state), "/recommendations").await;
    assert_eq!(body[0]["resource_name"], "idle-vm");
    assert_eq!(body[0]["monthly_savings"], 120.0);
    assert_eq!(body[0]["confidence"], "High");
}

#[tokio::test]
async fn test_duplicate_create_is_server_error() {
    let state = AppState::new(MemoryStore::new(), ServerConfig::default());
    let payload = json!({
        "name": "bucket",
        "resource_type": "storage",
        "provider": "AWS",
        "instance_type": "S3 Standard",
        "storage_gb": 100.0,
        "monthly_cost": 2.3
    });

    let (status, _) = post_json(build_app(state.clone()), "/resources", &payload).await;
    assert_eq!(status, StatusCode::OK);

    let (status, bytes) = post_json(build_app(state), "/resources", &payload).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(String::from_utf8(bytes).unwrap().contains("bucket"));
}

#[tokio::test]
async fn test_malformed_create_is_rejected_by_extractor() {
    let payload = json!({"name": "x", "resource_type": "network"});
    let (status, _) = post_json(app_with(MemoryStore::new()), "/resources", &payload).await;
    assert!(status.is_client_error());
}

#[rstest]
#[case::resources("/resources")]
#[case::recommendations("/recommendations")]
#[case::summary("/summary")]
#[tokio::test]
async fn test_store_failure_is_plain_500(#[case] uri: &str) {
    let response = app_with(FailingStore)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let message = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(message.contains("connection lost"));
}

#[tokio::test]
async fn test_health_does_not_touch_store() {
    let (status, _) = get(app_with(FailingStore), "/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_cors_allows_dashboard_origin() {
    let response = seeded_app()
        .oneshot(
            Request::builder()
                .uri("/summary")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3000"
    );
}

#[tokio::test]
async fn test_recommendations_are_recomputed_per_request() {
    let state = AppState::new(MemoryStore::new(), ServerConfig::default());

    let (_, before) = get(build_app(state.clone()), "/recommendations").await;
    assert_eq!(before, json!([]));

    state
        .with_store(|store| {
            store.insert_resource(&NewResource::storage(
                "cold-archive",
                "GCP",
                "Archive",
                4000.0,
                16.0,
            ))
        })
        .unwrap();

    let (_, after) = get(build_app(state), "/recommendations").await;
    assert_eq!(after[0]["recommended_config"], "2800GB Archive");
    assert_eq!(after[0]["monthly_savings"], 4.8);
}
