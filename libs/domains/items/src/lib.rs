//! Items Domain
//!
//! Shareable items and their comments. An item belongs to an owner, may answer
//! an item request, and carries an availability flag that gates booking.
//!
//! The owner's item views are enriched with the last and next approved booking.
//! That data lives in the bookings domain, which implements the
//! [`BookingDirectory`] trait defined here and is injected into [`ItemService`].

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ItemError, ItemResult};
pub use models::{
    BookingSummary, Comment, CommentView, CreateComment, CreateItem, Item, ItemView, UpdateItem,
    last_booking, next_booking,
};
pub use postgres::PgItemRepository;
pub use repository::{BookingDirectory, ItemRepository};
pub use service::ItemService;
