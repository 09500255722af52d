use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::ItemResult;
use crate::models::{BookingSummary, Comment, CreateComment, CreateItem, Item, UpdateItem};

/// Repository trait for Item and Comment persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Create a new item owned by `owner_id`
    async fn create(&self, owner_id: i64, input: CreateItem) -> ItemResult<Item>;

    /// Get an item by ID
    async fn find_by_id(&self, id: i64) -> ItemResult<Option<Item>>;

    /// Get several items at once, in no particular order
    async fn find_by_ids(&self, ids: Vec<i64>) -> ItemResult<Vec<Item>>;

    /// All items of an owner, ordered by ID
    async fn find_by_owner(&self, owner_id: i64) -> ItemResult<Vec<Item>>;

    /// Items answering any of the given requests
    async fn find_by_request_ids(&self, request_ids: Vec<i64>) -> ItemResult<Vec<Item>>;

    /// Partially update an existing item
    async fn update(&self, id: i64, input: UpdateItem) -> ItemResult<Item>;

    /// Case-insensitive substring search over name and description,
    /// restricted to available items. `text` is never blank here.
    async fn search(&self, text: &str) -> ItemResult<Vec<Item>>;

    /// Persist a comment with a server-side `created` timestamp
    async fn add_comment(
        &self,
        item_id: i64,
        author_id: i64,
        input: CreateComment,
    ) -> ItemResult<Comment>;

    /// Comments on any of the given items
    async fn comments_for_items(&self, item_ids: Vec<i64>) -> ItemResult<Vec<Comment>>;
}

/// Read access to booking data owned by the bookings domain.
///
/// Implemented by the bookings Postgres repository and injected into
/// [`crate::service::ItemService`], keeping the crate dependency one-way.
#[async_trait]
pub trait BookingDirectory: Send + Sync {
    /// Approved bookings of the given items, ascending by start
    async fn approved_for_items(&self, item_ids: Vec<i64>) -> ItemResult<Vec<BookingSummary>>;

    /// Whether `booker_id` has an approved booking of `item_id` that ended
    /// before `now`
    async fn completed_for_user(
        &self,
        booker_id: i64,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> ItemResult<bool>;
}
