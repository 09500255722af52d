use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use domain_items::{Item, ItemRepository};
use domain_users::{User, UserRepository};

use crate::error::{BookingError, BookingResult};
use crate::models::{Booking, BookingStatus, BookingView, CreateBooking, Page, StateFilter};
use crate::repository::BookingRepository;

/// Service layer for Booking business logic
#[derive(Clone)]
pub struct BookingService<R: BookingRepository> {
    repository: Arc<R>,
    users: Arc<dyn UserRepository>,
    items: Arc<dyn ItemRepository>,
}

impl<R: BookingRepository> BookingService<R> {
    pub fn new(
        repository: R,
        users: Arc<dyn UserRepository>,
        items: Arc<dyn ItemRepository>,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            users,
            items,
        }
    }

    /// Place a booking on an available item.
    ///
    /// Checks run in a fixed order: booker exists, item exists, item is
    /// available, booker is not the owner, start is before end. Overlap with
    /// existing approved bookings is not checked.
    pub async fn create_booking(
        &self,
        caller: i64,
        input: CreateBooking,
    ) -> BookingResult<BookingView> {
        let booker = self
            .users
            .find_by_id(caller)
            .await
            .map_err(|e| BookingError::Internal(e.to_string()))?
            .ok_or(BookingError::UserNotFound(caller))?;

        let item = self
            .items
            .find_by_id(input.item_id)
            .await
            .map_err(|e| BookingError::Internal(e.to_string()))?
            .ok_or(BookingError::ItemNotFound(input.item_id))?;

        if !item.available {
            return Err(BookingError::Validation(format!(
                "Item {} is not available for booking",
                item.id
            )));
        }

        // Owners cannot book their own items; the item is hidden from them
        if item.owner_id == caller {
            return Err(BookingError::ItemNotFound(item.id));
        }

        if input.start >= input.end {
            return Err(BookingError::Validation(
                "Booking start must be before end".to_string(),
            ));
        }

        let booking = self.repository.create(caller, input).await?;
        Ok(BookingView::new(booking, booker, item))
    }

    /// Approve or reject a WAITING booking; only the item owner may do this.
    ///
    /// The status flip is a conditional UPDATE keyed on the WAITING status,
    /// so two concurrent decisions cannot both win.
    pub async fn approve_booking(
        &self,
        caller: i64,
        booking_id: i64,
        approved: bool,
    ) -> BookingResult<BookingView> {
        let mut booking = self.get_booking_or_not_found(booking_id).await?;
        let item = self.get_item_for(&booking).await?;

        if item.owner_id != caller {
            return Err(BookingError::NotFound(booking_id));
        }

        let target = if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };

        let rows = self.repository.approve_if_waiting(booking_id, target).await?;
        if rows == 0 {
            return Err(BookingError::Validation(format!(
                "Booking {} is not waiting for approval",
                booking_id
            )));
        }

        booking.status = target;
        let booker = self.get_booker_for(&booking).await?;
        Ok(BookingView::new(booking, booker, item))
    }

    /// Fetch one booking; visible only to its booker and the item owner
    pub async fn get_booking(&self, caller: i64, booking_id: i64) -> BookingResult<BookingView> {
        let booking = self.get_booking_or_not_found(booking_id).await?;
        let item = self.get_item_for(&booking).await?;

        if booking.booker_id != caller && item.owner_id != caller {
            return Err(BookingError::NotFound(booking_id));
        }

        let booker = self.get_booker_for(&booking).await?;
        Ok(BookingView::new(booking, booker, item))
    }

    /// The caller's bookings as booker, filtered and paginated
    pub async fn bookings_for_booker(
        &self,
        caller: i64,
        state: StateFilter,
        page: Page,
    ) -> BookingResult<Vec<BookingView>> {
        self.ensure_user_exists(caller).await?;

        let bookings = self
            .repository
            .find_for_booker(caller, state, page, Utc::now())
            .await?;
        self.hydrate(bookings).await
    }

    /// Bookings of the items the caller owns, filtered and paginated
    pub async fn bookings_for_owner(
        &self,
        caller: i64,
        state: StateFilter,
        page: Page,
    ) -> BookingResult<Vec<BookingView>> {
        self.ensure_user_exists(caller).await?;

        let bookings = self
            .repository
            .find_for_owner(caller, state, page, Utc::now())
            .await?;
        self.hydrate(bookings).await
    }

    async fn ensure_user_exists(&self, id: i64) -> BookingResult<()> {
        let exists = self
            .users
            .exists(id)
            .await
            .map_err(|e| BookingError::Internal(e.to_string()))?;
        if !exists {
            return Err(BookingError::UserNotFound(id));
        }
        Ok(())
    }

    async fn get_booking_or_not_found(&self, id: i64) -> BookingResult<Booking> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(BookingError::NotFound(id))
    }

    async fn get_item_for(&self, booking: &Booking) -> BookingResult<Item> {
        self.items
            .find_by_id(booking.item_id)
            .await
            .map_err(|e| BookingError::Internal(e.to_string()))?
            .ok_or(BookingError::ItemNotFound(booking.item_id))
    }

    async fn get_booker_for(&self, booking: &Booking) -> BookingResult<User> {
        self.users
            .find_by_id(booking.booker_id)
            .await
            .map_err(|e| BookingError::Internal(e.to_string()))?
            .ok_or(BookingError::UserNotFound(booking.booker_id))
    }

    /// Hydrate storage models into API views with one users query and one
    /// items query.
    async fn hydrate(&self, bookings: Vec<Booking>) -> BookingResult<Vec<BookingView>> {
        if bookings.is_empty() {
            return Ok(Vec::new());
        }

        let mut booker_ids: Vec<i64> = bookings.iter().map(|b| b.booker_id).collect();
        booker_ids.sort_unstable();
        booker_ids.dedup();

        let mut item_ids: Vec<i64> = bookings.iter().map(|b| b.item_id).collect();
        item_ids.sort_unstable();
        item_ids.dedup();

        let bookers: HashMap<i64, User> = self
            .users
            .find_by_ids(booker_ids)
            .await
            .map_err(|e| BookingError::Internal(e.to_string()))?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let items: HashMap<i64, Item> = self
            .items
            .find_by_ids(item_ids)
            .await
            .map_err(|e| BookingError::Internal(e.to_string()))?
            .into_iter()
            .map(|i| (i.id, i))
            .collect();

        let mut views = Vec::with_capacity(bookings.len());
        for booking in bookings {
            let booker = bookers
                .get(&booking.booker_id)
                .cloned()
                .ok_or_else(|| {
                    BookingError::Internal(format!("Booker {} missing", booking.booker_id))
                })?;
            let item = items
                .get(&booking.item_id)
                .cloned()
                .ok_or_else(|| {
                    BookingError::Internal(format!("Item {} missing", booking.item_id))
                })?;
            views.push(BookingView::new(booking, booker, item));
        }
        Ok(views)
    }
}
