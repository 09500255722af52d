use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A shareable item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier
    pub id: i64,
    /// Item name
    pub name: String,
    /// Item description
    pub description: String,
    /// Whether the item can currently be booked
    pub available: bool,
    /// Owner of the item
    pub owner_id: i64,
    /// Item request this item answers, if any
    pub request_id: Option<i64>,
}

/// DTO for listing a new item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
}

/// DTO for partially updating an item
///
/// Owner and request binding are immutable, so they are not here.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateItem {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub available: Option<bool>,
}

/// Compact view of an approved booking, used to enrich owner item views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    /// Booking identifier
    pub id: i64,
    /// Item this booking refers to
    pub item_id: i64,
    /// User who placed the booking
    pub booker_id: i64,
    /// Booking start
    pub start: DateTime<Utc>,
    /// Booking end
    pub end: DateTime<Utc>,
}

/// Item enriched with booking summaries and comments
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
    /// Most recent approved booking that has already started (owner only)
    pub last_booking: Option<BookingSummary>,
    /// Earliest approved booking still in the future (owner only)
    pub next_booking: Option<BookingSummary>,
    pub comments: Vec<CommentView>,
}

/// A comment left on an item after a completed booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub item_id: i64,
    pub author_id: i64,
    pub created: DateTime<Utc>,
}

/// DTO for posting a comment
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateComment {
    #[validate(length(min = 1))]
    pub text: String,
}

/// Comment as rendered in item views, with the author's display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: i64,
    pub text: String,
    pub author_name: String,
    pub created: DateTime<Utc>,
}

impl Item {
    /// Apply a partial update, leaving absent fields untouched
    pub fn apply_update(&mut self, update: UpdateItem) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(available) = update.available {
            self.available = available;
        }
    }
}

/// Among bookings that have already started, the one with the greatest start.
pub fn last_booking(bookings: &[BookingSummary], now: DateTime<Utc>) -> Option<BookingSummary> {
    bookings
        .iter()
        .filter(|b| b.start <= now)
        .max_by_key(|b| b.start)
        .cloned()
}

/// The earliest booking that starts strictly after `now`.
pub fn next_booking(bookings: &[BookingSummary], now: DateTime<Utc>) -> Option<BookingSummary> {
    bookings
        .iter()
        .filter(|b| b.start > now)
        .min_by_key(|b| b.start)
        .cloned()
}
