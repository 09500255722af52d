use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{CallerId, ErrorResponse, ValidatedJson};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::error::ItemResult;
use crate::models::{
    BookingSummary, Comment, CommentView, CreateComment, CreateItem, Item, ItemView, UpdateItem,
};
use crate::repository::ItemRepository;
use crate::service::ItemService;

const TAG: &str = "items";

/// OpenAPI documentation for the Items API
#[derive(OpenApi)]
#[openapi(
    paths(create_item, update_item, get_item, list_items, search_items, add_comment),
    components(schemas(
        Item,
        ItemView,
        CreateItem,
        UpdateItem,
        BookingSummary,
        Comment,
        CreateComment,
        CommentView,
        ErrorResponse
    )),
    tags(
        (name = TAG, description = "Item and comment endpoints")
    )
)]
pub struct ApiDoc;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Substring to match against item name and description
    #[serde(default)]
    pub text: String,
}

/// Create the item router with all HTTP endpoints
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/search", get(search_items))
        .route("/{id}", get(get_item).patch(update_item))
        .route("/{id}/comment", axum::routing::post(add_comment))
        .with_state(shared_service)
}

/// List a new item
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateItem,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID")
    ),
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Owner not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    CallerId(caller): CallerId,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> ItemResult<impl IntoResponse> {
    let item = service.create_item(caller, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Partially update an item (owner only)
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn update_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    CallerId(caller): CallerId,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> ItemResult<Json<Item>> {
    let item = service.update_item(caller, id, input).await?;
    Ok(Json(item))
}

/// Fetch one item with comments; booking summaries for the owner only
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID")
    ),
    responses(
        (status = 200, description = "Item view", body = ItemView),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    CallerId(caller): CallerId,
    Path(id): Path<i64>,
) -> ItemResult<Json<ItemView>> {
    let view = service.get_item(caller, id).await?;
    Ok(Json(view))
}

/// All items of the calling owner, enriched, ordered by id
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID")
    ),
    responses(
        (status = 200, description = "Owner's items", body = Vec<ItemView>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn list_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    CallerId(caller): CallerId,
) -> ItemResult<Json<Vec<ItemView>>> {
    let views = service.list_items(caller).await?;
    Ok(Json(views))
}

/// Search available items by name or description substring
#[utoipa::path(
    get,
    path = "/search",
    tag = TAG,
    params(SearchParams),
    responses(
        (status = 200, description = "Matching available items", body = Vec<Item>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn search_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    Query(params): Query<SearchParams>,
) -> ItemResult<Json<Vec<Item>>> {
    let items = service.search_items(&params.text).await?;
    Ok(Json(items))
}

/// Comment on an item after a completed booking
#[utoipa::path(
    post,
    path = "/{id}/comment",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Calling user ID")
    ),
    request_body = CreateComment,
    responses(
        (status = 200, description = "Comment created", body = CommentView),
        (status = 400, description = "No completed booking of this item", body = ErrorResponse),
        (status = 404, description = "Item or user not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn add_comment<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    CallerId(caller): CallerId,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<CreateComment>,
) -> ItemResult<Json<CommentView>> {
    let view = service.add_comment(caller, id, input).await?;
    Ok(Json(view))
}
