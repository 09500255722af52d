use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::BookingStatus;

/// Sea-ORM entity for the bookings table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub start_date: DateTimeWithTimeZone,
    pub end_date: DateTimeWithTimeZone,
    pub item_id: i64,
    pub booker_id: i64,
    pub status: BookingStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Booking {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            start: model.start_date.into(),
            end: model.end_date.into(),
            item_id: model.item_id,
            booker_id: model.booker_id,
            status: model.status,
        }
    }
}

impl Model {
    /// ActiveModel for a fresh WAITING booking
    pub fn active_model_for_create(
        booker_id: i64,
        input: crate::models::CreateBooking,
    ) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            start_date: Set(input.start.into()),
            end_date: Set(input.end.into()),
            item_id: Set(input.item_id),
            booker_id: Set(booker_id),
            status: Set(BookingStatus::Waiting),
        }
    }
}
