use chrono::{DateTime, Utc};
use domain_items::Item;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A "looking for" post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    /// Unique identifier
    pub id: i64,
    /// What the requestor is looking for
    pub description: String,
    /// User who posted the request
    pub requestor_id: i64,
    /// Server-side creation timestamp
    pub created: DateTime<Utc>,
}

/// DTO for posting a request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateItemRequest {
    #[validate(length(min = 1))]
    pub description: String,
}

/// Request enriched with the items listed in answer to it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequestView {
    pub id: i64,
    pub description: String,
    pub requestor_id: i64,
    pub created: DateTime<Utc>,
    pub items: Vec<Item>,
}

impl ItemRequestView {
    pub fn new(request: ItemRequest, items: Vec<Item>) -> Self {
        Self {
            id: request.id,
            description: request.description,
            requestor_id: request.requestor_id,
            created: request.created,
            items,
        }
    }
}
