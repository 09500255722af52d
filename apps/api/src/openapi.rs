//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the LendHub API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "LendHub API",
        version = "0.1.0",
        description = "Peer-to-peer item sharing: users list items, book each other's items and comment after use",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/users", api = domain_users::handlers::ApiDoc),
        (path = "/api/items", api = domain_items::handlers::ApiDoc),
        (path = "/api/bookings", api = domain_bookings::handlers::ApiDoc),
        (path = "/api/requests", api = domain_requests::handlers::ApiDoc)
    ),
    tags(
        (name = "users", description = "Account management"),
        (name = "items", description = "Item listings, search and comments"),
        (name = "bookings", description = "Booking lifecycle"),
        (name = "requests", description = "Item requests")
    )
)]
pub struct ApiDoc;
