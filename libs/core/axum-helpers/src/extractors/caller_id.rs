//! Caller identity extractor backed by the `X-Sharer-User-Id` header.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::Response,
};

use crate::errors::{ErrorCode, error_response};

/// Header that carries the numeric id of the user making the request.
pub const USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// Extractor for the caller's user id.
///
/// Reads the [`USER_ID_HEADER`] header and parses it as `i64`. A missing
/// or malformed header is rejected with 400 before the handler runs.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::CallerId;
///
/// async fn list_own_items(CallerId(user_id): CallerId) -> String {
///     format!("Items of user {}", user_id)
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerId(pub i64);

impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts.headers.get(USER_ID_HEADER).ok_or_else(|| {
            error_response(
                StatusCode::BAD_REQUEST,
                format!("Missing required header {}", USER_ID_HEADER),
                ErrorCode::InvalidCallerId,
            )
        })?;

        let id = value
            .to_str()
            .ok()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .ok_or_else(|| {
                error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Header {} must be a valid integer id", USER_ID_HEADER),
                    ErrorCode::InvalidCallerId,
                )
            })?;

        Ok(CallerId(id))
    }
}
