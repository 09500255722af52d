use chrono::{DateTime, Utc};
use domain_items::Item;
use domain_users::User;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{BookingError, BookingResult};

/// Lifecycle state of a booking
///
/// WAITING is the only creatable status; APPROVED and REJECTED are terminal.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "booking_status")]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum BookingStatus {
    #[default]
    #[sea_orm(string_value = "waiting")]
    Waiting,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Listing filter over the booking lifecycle and timeline
///
/// Parsed case-insensitively from the `state` query parameter; anything
/// outside this set is rejected with `Unknown state: <raw>`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum StateFilter {
    #[default]
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl StateFilter {
    /// Parse an optional raw query value; absent means ALL.
    pub fn from_query(raw: Option<String>) -> BookingResult<Self> {
        match raw {
            None => Ok(StateFilter::All),
            Some(raw) => raw
                .parse()
                .map_err(|_| BookingError::UnknownState(raw)),
        }
    }
}

/// Offset/limit pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Page {
    /// Number of leading records to skip
    pub from: u64,
    /// Maximum number of records to return
    pub size: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self { from: 0, size: 10 }
    }
}

impl Page {
    /// Build a page from optional query params, defaulting to from=0, size=10.
    pub fn from_query(from: Option<u64>, size: Option<u64>) -> BookingResult<Self> {
        let page = Self {
            from: from.unwrap_or(0),
            size: size.unwrap_or(10),
        };

        if page.size == 0 {
            return Err(BookingError::Validation(
                "Page size must be at least 1".to_string(),
            ));
        }

        Ok(page)
    }
}

/// A booking as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub item_id: i64,
    pub booker_id: i64,
    pub status: BookingStatus,
}

/// DTO for placing a booking; the booker comes from the caller header
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub item_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Booking as rendered in API responses, hydrated with booker and item
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingView {
    pub id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub booker: User,
    pub item: Item,
}

impl BookingView {
    pub fn new(booking: Booking, booker: User, item: Item) -> Self {
        Self {
            id: booking.id,
            start: booking.start,
            end: booking.end,
            status: booking.status,
            booker,
            item,
        }
    }
}
