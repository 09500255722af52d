//! Bookings Domain
//!
//! The booking lifecycle: a booker places a WAITING booking on an available
//! item, and the item's owner approves or rejects it. APPROVED and REJECTED
//! are terminal.
//!
//! Listings are state-filtered (ALL/CURRENT/PAST/FUTURE/WAITING/REJECTED),
//! ordered by start descending and paginated. The Postgres repository also
//! implements `domain_items::BookingDirectory`, which feeds the items domain
//! its last/next booking summaries and the comment gate.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{BookingError, BookingResult};
pub use models::{Booking, BookingStatus, BookingView, CreateBooking, Page, StateFilter};
pub use postgres::PgBookingRepository;
pub use repository::BookingRepository;
pub use service::BookingService;
