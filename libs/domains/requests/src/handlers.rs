use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use axum_helpers::{CallerId, ErrorResponse, ValidatedJson};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::error::{RequestError, RequestResult};
use crate::models::{CreateItemRequest, ItemRequest, ItemRequestView};
use crate::repository::RequestRepository;
use crate::service::RequestService;

const TAG: &str = "requests";

/// OpenAPI documentation for the Requests API
#[derive(OpenApi)]
#[openapi(
    paths(create_request, own_requests, other_requests, get_request),
    components(schemas(ItemRequest, ItemRequestView, CreateItemRequest, ErrorResponse)),
    tags(
        (name = TAG, description = "Item request endpoints")
    )
)]
pub struct ApiDoc;

#[derive(Debug, Deserialize, IntoParams)]
pub struct PageParams {
    /// Number of leading records to skip (default 0)
    pub from: Option<u64>,
    /// Page size (default 10, minimum 1)
    pub size: Option<u64>,
}

impl PageParams {
    fn resolve(self) -> RequestResult<(u64, u64)> {
        let from = self.from.unwrap_or(0);
        let size = self.size.unwrap_or(10);
        if size == 0 {
            return Err(RequestError::Validation(
                "Page size must be at least 1".to_string(),
            ));
        }
        Ok((from, size))
    }
}

/// Create the request router with all HTTP endpoints
pub fn router<R: RequestRepository + 'static>(service: RequestService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(own_requests).post(create_request))
        .route("/all", get(other_requests))
        .route("/{id}", get(get_request))
        .with_state(shared_service)
}

/// File a new item request
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateItemRequest,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID (the requestor)")
    ),
    responses(
        (status = 201, description = "Request created", body = ItemRequest),
        (status = 400, description = "Blank description", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn create_request<R: RequestRepository>(
    State(service): State<Arc<RequestService<R>>>,
    CallerId(caller): CallerId,
    ValidatedJson(input): ValidatedJson<CreateItemRequest>,
) -> RequestResult<(StatusCode, Json<ItemRequest>)> {
    let request = service.create_request(caller, input).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// The caller's own requests, newest first, with answering items
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID (the requestor)")
    ),
    responses(
        (status = 200, description = "Requests ordered by creation descending", body = Vec<ItemRequestView>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn own_requests<R: RequestRepository>(
    State(service): State<Arc<RequestService<R>>>,
    CallerId(caller): CallerId,
) -> RequestResult<Json<Vec<ItemRequestView>>> {
    let views = service.own_requests(caller).await?;
    Ok(Json(views))
}

/// Requests filed by other users, newest first, paginated
#[utoipa::path(
    get,
    path = "/all",
    tag = TAG,
    params(
        PageParams,
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID")
    ),
    responses(
        (status = 200, description = "Requests ordered by creation descending", body = Vec<ItemRequestView>),
        (status = 400, description = "Invalid page size", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn other_requests<R: RequestRepository>(
    State(service): State<Arc<RequestService<R>>>,
    CallerId(caller): CallerId,
    Query(params): Query<PageParams>,
) -> RequestResult<Json<Vec<ItemRequestView>>> {
    let (from, size) = params.resolve()?;
    let views = service.other_requests(caller, from, size).await?;
    Ok(Json(views))
}

/// Fetch one request with its answering items
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Request ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID")
    ),
    responses(
        (status = 200, description = "Request found", body = ItemRequestView),
        (status = 404, description = "Request or user not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_request<R: RequestRepository>(
    State(service): State<Arc<RequestService<R>>>,
    CallerId(caller): CallerId,
    Path(id): Path<i64>,
) -> RequestResult<Json<ItemRequestView>> {
    let view = service.get_request(caller, id).await?;
    Ok(Json(view))
}
