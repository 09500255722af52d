//! Router assembly: repositories, services and their HTTP routes

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use domain_bookings::{BookingService, PgBookingRepository};
use domain_items::{BookingDirectory, ItemService, PgItemRepository};
use domain_requests::{PgRequestRepository, RequestService};
use domain_users::{PgUserRepository, UserRepository, UserService};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use std::sync::Arc;

/// Build the domain routers, sharing one connection pool.
///
/// Items receive the bookings repository through [`BookingDirectory`] so the
/// items crate never depends on the bookings crate.
pub fn api_routes(db: &DatabaseConnection) -> Router {
    let users: Arc<PgUserRepository> = Arc::new(PgUserRepository::new(db.clone()));
    let items: Arc<PgItemRepository> = Arc::new(PgItemRepository::new(db.clone()));
    let bookings: Arc<PgBookingRepository> = Arc::new(PgBookingRepository::new(db.clone()));

    let user_service = UserService::new(PgUserRepository::new(db.clone()));
    let item_service = ItemService::new(
        PgItemRepository::new(db.clone()),
        users.clone() as Arc<dyn UserRepository>,
        bookings as Arc<dyn BookingDirectory>,
    );
    let booking_service = BookingService::new(
        PgBookingRepository::new(db.clone()),
        users.clone(),
        items.clone(),
    );
    let request_service = RequestService::new(
        PgRequestRepository::new(db.clone()),
        users,
        items,
    );

    Router::new()
        .nest("/users", domain_users::handlers::router(user_service))
        .nest("/items", domain_items::handlers::router(item_service))
        .nest("/bookings", domain_bookings::handlers::router(booking_service))
        .nest("/requests", domain_requests::handlers::router(request_service))
}

/// Readiness endpoint verifying the database connection
pub fn ready_router(db: DatabaseConnection) -> Router {
    Router::new()
        .route("/ready", get(ready_handler))
        .with_state(db)
}

async fn ready_handler(
    State(db): State<DatabaseConnection>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let checks = vec![(
        "database",
        Box::pin(async {
            database::postgres::check_health(&db)
                .await
                .map_err(|e| e.to_string())
        }) as HealthCheckFuture,
    )];

    run_health_checks(checks).await
}
