use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use axum_helpers::{CallerId, ErrorResponse, ValidatedJson};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::error::BookingResult;
use crate::models::{
    Booking, BookingStatus, BookingView, CreateBooking, Page, StateFilter,
};
use crate::repository::BookingRepository;
use crate::service::BookingService;

const TAG: &str = "bookings";

/// OpenAPI documentation for the Bookings API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_booking,
        approve_booking,
        get_booking,
        bookings_for_booker,
        bookings_for_owner
    ),
    components(schemas(
        Booking,
        BookingView,
        BookingStatus,
        CreateBooking,
        StateFilter,
        Page,
        ErrorResponse
    )),
    tags(
        (name = TAG, description = "Booking lifecycle endpoints")
    )
)]
pub struct ApiDoc;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ApprovalParams {
    /// true approves the booking, false rejects it
    pub approved: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListParams {
    /// State filter, case-insensitive; defaults to ALL
    pub state: Option<String>,
    /// Number of leading records to skip (default 0)
    pub from: Option<u64>,
    /// Page size (default 10, minimum 1)
    pub size: Option<u64>,
}

impl ListParams {
    fn into_filter_and_page(self) -> BookingResult<(StateFilter, Page)> {
        let filter = StateFilter::from_query(self.state)?;
        let page = Page::from_query(self.from, self.size)?;
        Ok((filter, page))
    }
}

/// Create the booking router with all HTTP endpoints
pub fn router<R: BookingRepository + 'static>(service: BookingService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(bookings_for_booker).post(create_booking))
        .route("/owner", get(bookings_for_owner))
        .route("/{id}", get(get_booking).patch(approve_booking))
        .with_state(shared_service)
}

/// Place a booking on an available item
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateBooking,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID (the booker)")
    ),
    responses(
        (status = 200, description = "Booking placed with WAITING status", body = BookingView),
        (status = 400, description = "Item unavailable or invalid time range", body = ErrorResponse),
        (status = 404, description = "User or item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn create_booking<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    CallerId(caller): CallerId,
    ValidatedJson(input): ValidatedJson<CreateBooking>,
) -> BookingResult<Json<BookingView>> {
    let view = service.create_booking(caller, input).await?;
    Ok(Json(view))
}

/// Approve or reject a WAITING booking (item owner only)
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Booking ID"),
        ApprovalParams,
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID (the item owner)")
    ),
    responses(
        (status = 200, description = "Booking resolved", body = BookingView),
        (status = 400, description = "Booking is not waiting for approval", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn approve_booking<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    CallerId(caller): CallerId,
    Path(id): Path<i64>,
    Query(params): Query<ApprovalParams>,
) -> BookingResult<Json<BookingView>> {
    let view = service.approve_booking(caller, id, params.approved).await?;
    Ok(Json(view))
}

/// Fetch one booking (booker or item owner only)
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Booking ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID")
    ),
    responses(
        (status = 200, description = "Booking found", body = BookingView),
        (status = 404, description = "Booking not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_booking<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    CallerId(caller): CallerId,
    Path(id): Path<i64>,
) -> BookingResult<Json<BookingView>> {
    let view = service.get_booking(caller, id).await?;
    Ok(Json(view))
}

/// The caller's bookings as booker, state-filtered and paginated
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(
        ListParams,
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID (the booker)")
    ),
    responses(
        (status = 200, description = "Bookings ordered by start descending", body = Vec<BookingView>),
        (status = 400, description = "Unknown state filter", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn bookings_for_booker<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    CallerId(caller): CallerId,
    Query(params): Query<ListParams>,
) -> BookingResult<Json<Vec<BookingView>>> {
    let (filter, page) = params.into_filter_and_page()?;
    let views = service.bookings_for_booker(caller, filter, page).await?;
    Ok(Json(views))
}

/// Bookings of the items the caller owns, state-filtered and paginated
#[utoipa::path(
    get,
    path = "/owner",
    tag = TAG,
    params(
        ListParams,
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID (the owner)")
    ),
    responses(
        (status = 200, description = "Bookings ordered by start descending", body = Vec<BookingView>),
        (status = 400, description = "Unknown state filter", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn bookings_for_owner<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    CallerId(caller): CallerId,
    Query(params): Query<ListParams>,
) -> BookingResult<Json<Vec<BookingView>>> {
    let (filter, page) = params.into_filter_and_page()?;
    let views = service.bookings_for_owner(caller, filter, page).await?;
    Ok(Json(views))
}
