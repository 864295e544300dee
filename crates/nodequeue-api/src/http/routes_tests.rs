use super::*;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use nodequeue_store::{NewNode, Node, PriorityStore, SqlitePriorityStore, StoreError};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn create_test_router() -> Router {
    let store = Arc::new(SqlitePriorityStore::in_memory().await.unwrap());
    create_router(Arc::new(AppState::new(store)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_string(&value).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn ids(nodes: &Value) -> Vec<i64> {
    nodes
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_add_and_handle_scenario() {
    let app = create_test_router().await;

    let (status, body) = send(&app, "POST", "/add", Some(json!({"name": "a", "priority": 1}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["node"]["id"], 1);
    assert!(body["message"].is_string());

    let (status, body) = send(&app, "POST", "/add", Some(json!({"name": "b", "priority": 5}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["node"]["id"], 2);

    let (status, queue) = send(&app, "GET", "/queue", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&queue), vec![2, 1]);
    assert_eq!(queue[0]["priority"], 5);

    let (status, body) = send(&app, "POST", "/handle", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["node"], json!({"id": 2, "name": "b", "priority": 5}));

    let (_, queue) = send(&app, "GET", "/queue", None).await;
    assert_eq!(ids(&queue), vec![1]);
}

#[tokio::test]
async fn test_add_defaults_priority() {
    let app = create_test_router().await;
    let (status, body) = send(&app, "POST", "/add", Some(json!({"name": "plain"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["node"]["priority"], 0);
}

#[tokio::test]
async fn test_add_with_explicit_id() {
    let app = create_test_router().await;

    let (status, body) = send(
        &app,
        "POST",
        "/add",
        Some(json!({"id": 42, "name": "x", "priority": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["node"]["id"], 42);

    let (status, body) = send(
        &app,
        "POST",
        "/add",
        Some(json!({"id": 42, "name": "dup", "priority": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_add_with_zero_id_assigns_ids() {
    let app = create_test_router().await;

    let (status, first) = send(&app, "POST", "/add", Some(json!({"id": 0, "name": "a"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["node"]["id"], 1);

    let (status, second) = send(&app, "POST", "/add", Some(json!({"id": 0, "name": "b"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["node"]["id"], 2);

    let (_, tree) = send(&app, "GET", "/tree", None).await;
    assert_eq!(ids(&tree), vec![1, 2]);
}

#[tokio::test]
async fn test_add_malformed_body() {
    let app = create_test_router().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/add")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "POST", "/add", Some(json!({"priority": "high"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("invalid request body"));
}

#[tokio::test]
async fn test_add_without_content_type() {
    let app = create_test_router().await;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/add")
                .body(Body::from(r#"{"name": "a"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_find() {
    let app = create_test_router().await;
    send(&app, "POST", "/add", Some(json!({"name": "a", "priority": 3}))).await;

    let (status, body) = send(&app, "GET", "/find/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "name": "a", "priority": 3}));

    let (status, body) = send(&app, "GET", "/find/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "node 2 not found");
}

#[tokio::test]
async fn test_find_non_numeric_id() {
    let app = create_test_router().await;
    let (status, body) = send(&app, "GET", "/find/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_delete() {
    let app = create_test_router().await;
    send(&app, "POST", "/add", Some(json!({"name": "a", "priority": 3}))).await;

    let (status, body) = send(&app, "DELETE", "/delete/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, _) = send(&app, "GET", "/find/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_nonexistent() {
    let app = create_test_router().await;
    let (status, body) = send(&app, "DELETE", "/delete/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_boost_scenario() {
    let app = create_test_router().await;
    send(&app, "POST", "/add", Some(json!({"name": "a", "priority": 1}))).await;

    let (status, body) = send(&app, "POST", "/boost", Some(json!({"id": 1, "new_priority": 1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "new priority must exceed current priority");

    let (status, body) = send(&app, "POST", "/boost", Some(json!({"id": 1, "new_priority": 10}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["node"]["priority"], 10);

    let (_, body) = send(&app, "GET", "/find/1", None).await;
    assert_eq!(body["priority"], 10);
}

#[tokio::test]
async fn test_boost_missing_node() {
    let app = create_test_router().await;
    let (status, _) = send(&app, "POST", "/boost", Some(json!({"id": 5, "new_priority": 10}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_boost_malformed_body() {
    let app = create_test_router().await;
    let (status, _) = send(&app, "POST", "/boost", Some(json!({"id": 1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_boost_without_id_is_not_found() {
    let app = create_test_router().await;
    send(&app, "POST", "/add", Some(json!({"name": "a", "priority": 1}))).await;

    let (status, body) = send(&app, "POST", "/boost", Some(json!({"new_priority": 10}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "node 0 not found");
}

#[tokio::test]
async fn test_handle_empty_queue() {
    let app = create_test_router().await;
    let (status, body) = send(&app, "POST", "/handle", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "queue is empty");
}

#[tokio::test]
async fn test_tree_orders_by_id() {
    let app = create_test_router().await;
    for (id, priority) in [(3, 9), (1, 0), (2, 5)] {
        send(
            &app,
            "POST",
            "/add",
            Some(json!({"id": id, "name": format!("n{}", id), "priority": priority})),
        )
        .await;
    }

    let (status, tree) = send(&app, "GET", "/tree", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&tree), vec![1, 2, 3]);

    let (_, queue) = send(&app, "GET", "/queue", None).await;
    assert_eq!(ids(&queue), vec![3, 2, 1]);
}

#[tokio::test]
async fn test_empty_listings() {
    let app = create_test_router().await;
    let (status, body) = send(&app, "GET", "/queue", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(&app, "GET", "/tree", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_health_and_liveness() {
    let app = create_test_router().await;

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["nodes"], 0);

    let (status, body) = send(&app, "GET", "/livez", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_wrong_method() {
    let app = create_test_router().await;
    let (status, _) = send(&app, "GET", "/handle", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

/// Store whose every call fails as if the database were unreachable.
struct UnavailableStore;

fn unavailable<T>() -> Result<T, StoreError> {
    Err(StoreError::Storage("database is locked".to_string()))
}

#[async_trait]
impl PriorityStore for UnavailableStore {
    async fn add(&self, _node: NewNode) -> Result<Node, StoreError> {
        unavailable()
    }
    async fn find_by_id(&self, _id: i64) -> Result<Node, StoreError> {
        unavailable()
    }
    async fn delete_by_id(&self, _id: i64) -> Result<(), StoreError> {
        unavailable()
    }
    async fn boost(&self, _id: i64, _new_priority: i64) -> Result<Node, StoreError> {
        unavailable()
    }
    async fn list_by_priority_desc(&self) -> Result<Vec<Node>, StoreError> {
        unavailable()
    }
    async fn list_by_id_asc(&self) -> Result<Vec<Node>, StoreError> {
        unavailable()
    }
    async fn pop_highest_priority(&self) -> Result<Node, StoreError> {
        unavailable()
    }
    async fn count(&self) -> Result<u64, StoreError> {
        unavailable()
    }
}

#[tokio::test]
async fn test_storage_failures_are_500() {
    let app = create_router(Arc::new(AppState::new(Arc::new(UnavailableStore))));

    let (status, body) = send(&app, "POST", "/add", Some(json!({"name": "a"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("database is locked"));

    let (status, _) = send(&app, "GET", "/queue", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(&app, "POST", "/handle", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
}
