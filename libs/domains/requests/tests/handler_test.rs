//! Handler tests for the Requests domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Caller identification via the X-Sharer-User-Id header
//! - Request deserialization and validation
//! - HTTP status codes and JSON bodies

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_items::{CreateItem, ItemRepository, PgItemRepository};
use domain_requests::*;
use domain_users::{CreateUser, PgUserRepository, User, UserRepository};
use http_body_util::BodyExt;
use serde_json::json;
use std::sync::Arc;
use test_utils::{TestDataBuilder, TestDatabase};
use tower::ServiceExt; // For oneshot()

const USER_ID_HEADER: &str = "X-Sharer-User-Id";

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app(db: &TestDatabase) -> axum::Router {
    let repo = PgRequestRepository::new(db.connection());
    let users = Arc::new(PgUserRepository::new(db.connection()));
    let items = Arc::new(PgItemRepository::new(db.connection()));
    let service = RequestService::new(repo, users, items);
    handlers::router(service)
}

async fn seed_user(db: &TestDatabase, builder: &TestDataBuilder, local: &str) -> User {
    PgUserRepository::new(db.connection())
        .create(CreateUser {
            name: builder.name("user", local),
            email: builder.email(local),
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_request_handler_returns_201() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("request_handler_create_201");
    let requestor = seed_user(&db, &builder, "requestor").await;

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .header(USER_ID_HEADER, requestor.id.to_string())
        .body(Body::from(
            serde_json::to_string(&json!({ "description": "Need a ladder" })).unwrap(),
        ))
        .unwrap();

    let response = app(&db).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    // Assert on the raw body: response keys are camelCase on the wire
    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["requestorId"], requestor.id);
    assert_eq!(body["description"], "Need a ladder");
    assert!(body["created"].is_string());
}

#[tokio::test]
async fn test_create_request_without_caller_header_returns_400() {
    let db = TestDatabase::new().await;

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "description": "Need a ladder" })).unwrap(),
        ))
        .unwrap();

    let response = app(&db).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_request_for_unknown_user_returns_404() {
    let db = TestDatabase::new().await;

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .header(USER_ID_HEADER, "999999")
        .body(Body::from(
            serde_json::to_string(&json!({ "description": "Need a ladder" })).unwrap(),
        ))
        .unwrap();

    let response = app(&db).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_own_requests_carry_answering_items() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("request_handler_own_items");
    let requestor = seed_user(&db, &builder, "requestor").await;
    let owner = seed_user(&db, &builder, "owner").await;

    let created = PgRequestRepository::new(db.connection())
        .create(
            requestor.id,
            CreateItemRequest {
                description: "Need a ladder".to_string(),
            },
        )
        .await
        .unwrap();

    let item = PgItemRepository::new(db.connection())
        .create(
            owner.id,
            CreateItem {
                name: builder.name("item", "ladder"),
                description: "Six feet".to_string(),
                available: true,
                request_id: Some(created.id),
            },
        )
        .await
        .unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .header(USER_ID_HEADER, requestor.id.to_string())
        .body(Body::empty())
        .unwrap();

    let response = app(&db).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let views: Vec<ItemRequestView> = json_body(response.into_body()).await;
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].id, created.id);
    assert_eq!(views[0].items.len(), 1);
    assert_eq!(views[0].items[0].id, item.id);
}

#[tokio::test]
async fn test_other_requests_exclude_the_callers_own() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("request_handler_all");
    let requestor = seed_user(&db, &builder, "requestor").await;
    let other = seed_user(&db, &builder, "other").await;

    let repo = PgRequestRepository::new(db.connection());
    let mine = repo
        .create(
            requestor.id,
            CreateItemRequest {
                description: "Need a ladder".to_string(),
            },
        )
        .await
        .unwrap();
    let theirs = repo
        .create(
            other.id,
            CreateItemRequest {
                description: "Need a drill".to_string(),
            },
        )
        .await
        .unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/all")
        .header(USER_ID_HEADER, requestor.id.to_string())
        .body(Body::empty())
        .unwrap();

    let response = app(&db).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let views: Vec<ItemRequestView> = json_body(response.into_body()).await;
    assert!(views.iter().all(|v| v.id != mine.id));
    assert!(views.iter().any(|v| v.id == theirs.id));
}

#[tokio::test]
async fn test_other_requests_with_zero_size_returns_400() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("request_handler_zero_size");
    let requestor = seed_user(&db, &builder, "requestor").await;

    let request = Request::builder()
        .method("GET")
        .uri("/all?from=0&size=0")
        .header(USER_ID_HEADER, requestor.id.to_string())
        .body(Body::empty())
        .unwrap();

    let response = app(&db).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_missing_request_returns_404() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("request_handler_missing");
    let requestor = seed_user(&db, &builder, "requestor").await;

    let request = Request::builder()
        .method("GET")
        .uri("/999999")
        .header(USER_ID_HEADER, requestor.id.to_string())
        .body(Body::empty())
        .unwrap();

    let response = app(&db).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
