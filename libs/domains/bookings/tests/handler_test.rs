//! Handler tests for the Bookings domain
//!
//! Full wiring against a real PostgreSQL container: the booking router with
//! the Postgres repositories of all three involved domains behind it.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use domain_bookings::*;
use domain_items::{CreateItem, Item, PgItemRepository};
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
    let repo = PgBookingRepository::new(db.connection());
    let users = Arc::new(PgUserRepository::new(db.connection()));
    let items = Arc::new(PgItemRepository::new(db.connection()));
    let service = BookingService::new(repo, users, items);
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

async fn seed_item(db: &TestDatabase, builder: &TestDataBuilder, owner_id: i64) -> Item {
    use domain_items::ItemRepository;

    PgItemRepository::new(db.connection())
        .create(
            owner_id,
            CreateItem {
                name: builder.name("item", "drill"),
                description: "Cordless drill".to_string(),
                available: true,
                request_id: None,
            },
        )
        .await
        .unwrap()
}

fn booking_request(item_id: i64, booker_id: i64) -> Request<Body> {
    let start = Utc::now() + Duration::days(1);
    let end = Utc::now() + Duration::days(2);

    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .header(USER_ID_HEADER, booker_id.to_string())
        .body(Body::from(
            serde_json::to_string(&json!({
                "itemId": item_id,
                "start": start,
                "end": end,
            }))
            .unwrap(),
        ))
        .unwrap()
}

#[tokio::test]
async fn test_create_booking_returns_200_with_waiting_status() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("booking_handler_create");
    let owner = seed_user(&db, &builder, "owner").await;
    let booker = seed_user(&db, &builder, "booker").await;
    let item = seed_item(&db, &builder, owner.id).await;

    let response = app(&db)
        .oneshot(booking_request(item.id, booker.id))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    // Assert on the raw body: response keys are camelCase on the wire
    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["status"], "WAITING");
    assert_eq!(body["booker"]["id"], booker.id);
    assert_eq!(body["item"]["id"], item.id);
    assert_eq!(body["item"]["ownerId"], owner.id);
}

#[tokio::test]
async fn test_create_booking_without_header_returns_400() {
    let db = TestDatabase::new().await;

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "itemId": 1,
                "start": Utc::now() + Duration::days(1),
                "end": Utc::now() + Duration::days(2),
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app(&db).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_state_filter_returns_400_with_message() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("booking_handler_unknown_state");
    let booker = seed_user(&db, &builder, "booker").await;

    let request = Request::builder()
        .method("GET")
        .uri("/?state=banana")
        .header(USER_ID_HEADER, booker.id.to_string())
        .body(Body::empty())
        .unwrap();

    let response = app(&db).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "Unknown state: banana");
}

#[tokio::test]
async fn test_approve_booking_is_terminal() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("booking_handler_approve");
    let owner = seed_user(&db, &builder, "owner").await;
    let booker = seed_user(&db, &builder, "booker").await;
    let item = seed_item(&db, &builder, owner.id).await;

    let response = app(&db)
        .oneshot(booking_request(item.id, booker.id))
        .await
        .unwrap();
    let created: BookingView = json_body(response.into_body()).await;

    let approve = |caller: i64| {
        Request::builder()
            .method("PATCH")
            .uri(format!("/{}?approved=true", created.id))
            .header(USER_ID_HEADER, caller.to_string())
            .body(Body::empty())
            .unwrap()
    };

    let response = app(&db).oneshot(approve(owner.id)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let approved: BookingView = json_body(response.into_body()).await;
    assert_eq!(approved.status, BookingStatus::Approved);

    // A second decision hits a booking that is no longer waiting
    let response = app(&db).oneshot(approve(owner.id)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_approve_by_non_owner_returns_404() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("booking_handler_approve_stranger");
    let owner = seed_user(&db, &builder, "owner").await;
    let booker = seed_user(&db, &builder, "booker").await;
    let item = seed_item(&db, &builder, owner.id).await;

    let response = app(&db)
        .oneshot(booking_request(item.id, booker.id))
        .await
        .unwrap();
    let created: BookingView = json_body(response.into_body()).await;

    let request = Request::builder()
        .method("PATCH")
        .uri(format!("/{}?approved=true", created.id))
        .header(USER_ID_HEADER, booker.id.to_string())
        .body(Body::empty())
        .unwrap();

    let response = app(&db).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_booking_hidden_from_strangers() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("booking_handler_get_stranger");
    let owner = seed_user(&db, &builder, "owner").await;
    let booker = seed_user(&db, &builder, "booker").await;
    let stranger = seed_user(&db, &builder, "stranger").await;
    let item = seed_item(&db, &builder, owner.id).await;

    let response = app(&db)
        .oneshot(booking_request(item.id, booker.id))
        .await
        .unwrap();
    let created: BookingView = json_body(response.into_body()).await;

    for (caller, expected) in [
        (booker.id, StatusCode::OK),
        (owner.id, StatusCode::OK),
        (stranger.id, StatusCode::NOT_FOUND),
    ] {
        let request = Request::builder()
            .method("GET")
            .uri(format!("/{}", created.id))
            .header(USER_ID_HEADER, caller.to_string())
            .body(Body::empty())
            .unwrap();

        let response = app(&db).oneshot(request).await.unwrap();
        assert_eq!(response.status(), expected, "caller {caller}");
    }
}

#[tokio::test]
async fn test_owner_listing_sees_incoming_waiting_booking() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("booking_handler_owner_list");
    let owner = seed_user(&db, &builder, "owner").await;
    let booker = seed_user(&db, &builder, "booker").await;
    let item = seed_item(&db, &builder, owner.id).await;

    let response = app(&db)
        .oneshot(booking_request(item.id, booker.id))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder()
        .method("GET")
        .uri("/owner?state=waiting")
        .header(USER_ID_HEADER, owner.id.to_string())
        .body(Body::empty())
        .unwrap();

    let response = app(&db).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let views: Vec<BookingView> = json_body(response.into_body()).await;
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].item.id, item.id);

    // The booker has no items, so the owner side is empty for them
    let request = Request::builder()
        .method("GET")
        .uri("/owner")
        .header(USER_ID_HEADER, booker.id.to_string())
        .body(Body::empty())
        .unwrap();

    let response = app(&db).oneshot(request).await.unwrap();
    let views: Vec<BookingView> = json_body(response.into_body()).await;
    assert!(views.is_empty());
}
