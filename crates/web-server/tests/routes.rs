use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use database::{DbError, MemoryRepository, StudentStore};
use core_types::{NewStudent, StudentPatch, StudentRecord};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, value)
}

fn memory_app() -> Router {
    web_server::app(Arc::new(MemoryRepository::new()))
}

#[tokio::test]
async fn health_responds_ok() {
    let app = memory_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".into()));
}

#[tokio::test]
async fn create_then_list_round_trip() {
    let app = memory_app();
    let (status, created) = send(
        &app,
        Method::POST,
        "/students",
        Some(json!({"name": "Alice Roy", "rollNo": "R1", "attendance": 80, "marks": 35})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["_id"].as_str().unwrap().to_string();
    assert!(Uuid::parse_str(&id).is_ok());

    let (status, listed) = send(&app, Method::GET, "/students", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        listed,
        json!([{"_id": id, "name": "Alice Roy", "rollNo": "R1", "attendance": 80.0, "marks": 35.0}])
    );
}

#[tokio::test]
async fn create_without_required_field_is_bad_request() {
    let app = memory_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/students",
        Some(json!({"name": "No Marks", "rollNo": "R2", "attendance": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("marks"));

    let (_, listed) = send(&app, Method::GET, "/students", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn create_with_malformed_json_is_bad_request() {
    let app = memory_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/students",
        Some(json!({"name": "Typo", "rollNo": "R3", "attendance": "eighty", "marks": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unknown_fields_are_not_stored() {
    let app = memory_app();
    let (_, created) = send(
        &app,
        Method::POST,
        "/students",
        Some(json!({"name": "Extra", "rollNo": "R4", "attendance": 1, "marks": 2, "grade": "A"})),
    )
    .await;
    assert!(created.get("grade").is_none());
}

#[tokio::test]
async fn partial_update_returns_new_version() {
    let app = memory_app();
    let (_, created) = send(
        &app,
        Method::POST,
        "/students",
        Some(json!({"name": "Bo", "rollNo": "R5", "attendance": 50, "marks": 20})),
    )
    .await;
    let id = created["_id"].as_str().unwrap();

    let (status, updated) = send(&app, Method::PUT, &format!("/students/{id}"), Some(json!({"marks": 45}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["marks"], 45.0);
    assert_eq!(updated["name"], "Bo");
    assert_eq!(updated["_id"], id);
}

#[tokio::test]
async fn update_of_unknown_id_returns_null_and_creates_nothing() {
    let app = memory_app();
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/students/{}", Uuid::new_v4()),
        Some(json!({"name": "Ghost", "rollNo": "R0", "attendance": 1, "marks": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (_, listed) = send(&app, Method::GET, "/students", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn malformed_id_is_bad_request() {
    let app = memory_app();
    let (status, body) = send(&app, Method::PUT, "/students/not-an-id", Some(json!({"marks": 1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("not-an-id"));

    let (status, _) = send(&app, Method::DELETE, "/students/not-an-id", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_confirms_even_for_absent_id() {
    let app = memory_app();
    let (_, created) = send(
        &app,
        Method::POST,
        "/students",
        Some(json!({"name": "Gone", "rollNo": "R6", "attendance": 1, "marks": 1})),
    )
    .await;
    let id = created["_id"].as_str().unwrap();

    let (status, body) = send(&app, Method::DELETE, &format!("/students/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Student deleted"}));

    let (_, listed) = send(&app, Method::GET, "/students", None).await;
    assert_eq!(listed, json!([]));

    let (status, body) = send(&app, Method::DELETE, &format!("/students/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Student deleted"}));
}

/// A store whose every operation fails, to check status mapping.
struct BrokenStore;

#[async_trait::async_trait]
impl StudentStore for BrokenStore {
    async fn list_students(&self) -> Result<Vec<StudentRecord>, DbError> {
        Err(DbError::ConnectionConfigError("store offline".to_string()))
    }

    async fn create_student(&self, _new: NewStudent) -> Result<StudentRecord, DbError> {
        Err(DbError::ConnectionConfigError("store offline".to_string()))
    }

    async fn update_student(&self, _id: Uuid, _patch: StudentPatch) -> Result<Option<StudentRecord>, DbError> {
        Err(DbError::ConnectionConfigError("store offline".to_string()))
    }

    async fn delete_student(&self, _id: Uuid) -> Result<bool, DbError> {
        Err(DbError::ConnectionConfigError("store offline".to_string()))
    }
}

#[tokio::test]
async fn store_failures_map_to_500_for_list_and_400_for_mutations() {
    let app = web_server::app(Arc::new(BrokenStore));

    let (status, body) = send(&app, Method::GET, "/students", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("store offline"));

    let (status, _) = send(
        &app,
        Method::POST,
        "/students",
        Some(json!({"name": "A", "rollNo": "R", "attendance": 1, "marks": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let id = Uuid::new_v4();
    let (status, _) = send(&app, Method::PUT, &format!("/students/{id}"), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::DELETE, &format!("/students/{id}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
