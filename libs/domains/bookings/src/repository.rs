use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::BookingResult;
use crate::models::{Booking, BookingStatus, CreateBooking, Page, StateFilter};

/// Repository trait for Booking persistence
///
/// `now` is passed into the listing queries so bucket boundaries are
/// deterministic under test.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new WAITING booking
    async fn create(&self, booker_id: i64, input: CreateBooking) -> BookingResult<Booking>;

    /// Get a booking by ID
    async fn find_by_id(&self, id: i64) -> BookingResult<Option<Booking>>;

    /// Atomically move a WAITING booking to `target`.
    ///
    /// Compare-and-set: `UPDATE .. SET status = target WHERE id = ? AND
    /// status = 'waiting'`. Returns the number of rows changed; zero means
    /// the booking was not waiting.
    async fn approve_if_waiting(&self, id: i64, target: BookingStatus) -> BookingResult<u64>;

    /// Bookings placed by a booker, filtered, ordered start DESC, paginated
    async fn find_for_booker(
        &self,
        booker_id: i64,
        state: StateFilter,
        page: Page,
        now: DateTime<Utc>,
    ) -> BookingResult<Vec<Booking>>;

    /// Bookings of the items an owner holds, filtered, ordered start DESC,
    /// paginated
    async fn find_for_owner(
        &self,
        owner_id: i64,
        state: StateFilter,
        page: Page,
        now: DateTime<Utc>,
    ) -> BookingResult<Vec<Booking>>;
}
