//! Item Requests Domain
//!
//! "Looking for" posts: a user describes an item they need, other users can
//! list items against the request. Request views carry the items created in
//! answer to them.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{RequestError, RequestResult};
pub use models::{CreateItemRequest, ItemRequest, ItemRequestView};
pub use postgres::PgRequestRepository;
pub use repository::RequestRepository;
pub use service::RequestService;
