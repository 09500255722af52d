//! Custom extractors for Axum handlers.
//!
//! Reusable extractors that reduce boilerplate and standardize
//! error handling across the API.

pub mod caller_id;
pub mod validated_json;

pub use caller_id::{CallerId, USER_ID_HEADER};
pub use validated_json::ValidatedJson;
