use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Booking with id {0} not found")]
    NotFound(i64),

    #[error("Item with id {0} not found")]
    ItemNotFound(i64),

    #[error("User with id {0} not found")]
    UserNotFound(i64),

    #[error("Unknown state: {0}")]
    UnknownState(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type BookingResult<T> = Result<T, BookingError>;

/// Convert BookingError to AppError for standardized error responses
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::NotFound(id) => {
                AppError::NotFound(format!("Booking with id {} not found", id))
            }
            BookingError::ItemNotFound(id) => {
                AppError::NotFound(format!("Item with id {} not found", id))
            }
            BookingError::UserNotFound(id) => {
                AppError::NotFound(format!("User with id {} not found", id))
            }
            BookingError::UnknownState(raw) => {
                AppError::BadRequest(format!("Unknown state: {}", raw))
            }
            BookingError::Validation(msg) => AppError::BadRequest(msg),
            BookingError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
