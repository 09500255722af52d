use async_trait::async_trait;

use crate::error::UserResult;
use crate::models::{CreateUser, UpdateUser, User};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    async fn create(&self, input: CreateUser) -> UserResult<User>;

    /// Get a user by ID
    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>>;

    /// Get several users at once, in no particular order
    async fn find_by_ids(&self, ids: Vec<i64>) -> UserResult<Vec<User>>;

    /// List all users ordered by ID
    async fn find_all(&self) -> UserResult<Vec<User>>;

    /// Partially update an existing user
    async fn update(&self, id: i64, input: UpdateUser) -> UserResult<User>;

    /// Delete a user by ID, returning whether a row was removed
    async fn delete(&self, id: i64) -> UserResult<bool>;

    /// Check whether a user exists
    async fn exists(&self, id: i64) -> UserResult<bool>;
}
