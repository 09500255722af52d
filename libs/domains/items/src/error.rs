use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item with id {0} not found")]
    NotFound(i64),

    #[error("User with id {0} not found")]
    UserNotFound(i64),

    /// Non-owners are told the item does not exist
    #[error("Item with id {0} not found")]
    NotOwner(i64),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

/// Convert ItemError to AppError for standardized error responses
impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(id) | ItemError::NotOwner(id) => {
                AppError::NotFound(format!("Item with id {} not found", id))
            }
            ItemError::UserNotFound(id) => {
                AppError::NotFound(format!("User with id {} not found", id))
            }
            ItemError::Validation(msg) => AppError::BadRequest(msg),
            ItemError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
