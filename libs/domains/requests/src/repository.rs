use async_trait::async_trait;

use crate::error::RequestResult;
use crate::models::{CreateItemRequest, ItemRequest};

/// Repository trait for ItemRequest persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// Create a request with a server-side `created` timestamp
    async fn create(&self, requestor_id: i64, input: CreateItemRequest)
    -> RequestResult<ItemRequest>;

    /// Get a request by ID
    async fn find_by_id(&self, id: i64) -> RequestResult<Option<ItemRequest>>;

    /// All requests of a user, newest first
    async fn find_by_requestor(&self, requestor_id: i64) -> RequestResult<Vec<ItemRequest>>;

    /// Requests made by everybody except `requestor_id`, newest first,
    /// skipping `from` rows and returning at most `size`
    async fn find_others(
        &self,
        requestor_id: i64,
        from: u64,
        size: u64,
    ) -> RequestResult<Vec<ItemRequest>>;
}
