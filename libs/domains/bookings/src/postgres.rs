use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain_items::{BookingDirectory, BookingSummary, ItemError, ItemResult};
use sea_orm::sea_query::{Expr, ExprTrait, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::{
    entity,
    error::{BookingError, BookingResult},
    models::{Booking, BookingStatus, CreateBooking, Page, StateFilter},
    repository::BookingRepository,
};

/// PostgreSQL-backed implementation of BookingRepository.
///
/// Also implements `domain_items::BookingDirectory`, giving the items domain
/// read access to approved bookings without a crate cycle.
pub struct PgBookingRepository {
    db: DatabaseConnection,
}

impl PgBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Bucket semantics shared by the booker and owner listings.
///
/// WAITING includes only future entries; REJECTED has no time component.
fn state_condition(state: StateFilter, now: DateTime<Utc>) -> Condition {
    match state {
        StateFilter::All => Condition::all(),
        StateFilter::Current => Condition::all()
            .add(entity::Column::StartDate.lte(now))
            .add(entity::Column::EndDate.gte(now)),
        StateFilter::Past => Condition::all().add(entity::Column::EndDate.lt(now)),
        StateFilter::Future => Condition::all().add(entity::Column::StartDate.gt(now)),
        StateFilter::Waiting => Condition::all()
            .add(entity::Column::Status.eq(BookingStatus::Waiting))
            .add(entity::Column::StartDate.gt(now)),
        StateFilter::Rejected => {
            Condition::all().add(entity::Column::Status.eq(BookingStatus::Rejected))
        }
    }
}

fn page_query(
    base: Select<entity::Entity>,
    state: StateFilter,
    page: Page,
    now: DateTime<Utc>,
) -> Select<entity::Entity> {
    base.filter(state_condition(state, now))
        .order_by_desc(entity::Column::StartDate)
        .offset(page.from)
        .limit(page.size)
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create(&self, booker_id: i64, input: CreateBooking) -> BookingResult<Booking> {
        let active_model = entity::Model::active_model_for_create(booker_id, input);

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| BookingError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(
            booking_id = %model.id,
            item_id = %model.item_id,
            booker_id = %booker_id,
            "Created booking"
        );
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> BookingResult<Option<Booking>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| BookingError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn approve_if_waiting(&self, id: i64, target: BookingStatus) -> BookingResult<u64> {
        let result = entity::Entity::update_many()
            .col_expr(entity::Column::Status, Expr::value(target))
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::Status.eq(BookingStatus::Waiting))
            .exec(&self.db)
            .await
            .map_err(|e| BookingError::Internal(format!("Database error: {}", e)))?;

        if result.rows_affected > 0 {
            tracing::info!(booking_id = %id, status = %target, "Resolved booking");
        }
        Ok(result.rows_affected)
    }

    async fn find_for_booker(
        &self,
        booker_id: i64,
        state: StateFilter,
        page: Page,
        now: DateTime<Utc>,
    ) -> BookingResult<Vec<Booking>> {
        let base = entity::Entity::find().filter(entity::Column::BookerId.eq(booker_id));

        let models = page_query(base, state, page, now)
            .all(&self.db)
            .await
            .map_err(|e| BookingError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn find_for_owner(
        &self,
        owner_id: i64,
        state: StateFilter,
        page: Page,
        now: DateTime<Utc>,
    ) -> BookingResult<Vec<Booking>> {
        // Join through items: bookings whose item belongs to the owner
        let owned_items = Query::select()
            .column(domain_items::entity::item::Column::Id)
            .from(domain_items::entity::item::Entity)
            .and_where(Expr::col(domain_items::entity::item::Column::OwnerId).eq(owner_id))
            .to_owned();

        let base = entity::Entity::find().filter(entity::Column::ItemId.in_subquery(owned_items));

        let models = page_query(base, state, page, now)
            .all(&self.db)
            .await
            .map_err(|e| BookingError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}

#[async_trait]
impl BookingDirectory for PgBookingRepository {
    async fn approved_for_items(&self, item_ids: Vec<i64>) -> ItemResult<Vec<BookingSummary>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = entity::Entity::find()
            .filter(entity::Column::ItemId.is_in(item_ids))
            .filter(entity::Column::Status.eq(BookingStatus::Approved))
            .order_by_asc(entity::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(|e| ItemError::Internal(format!("Database error: {}", e)))?;

        Ok(models
            .into_iter()
            .map(|m| BookingSummary {
                id: m.id,
                item_id: m.item_id,
                booker_id: m.booker_id,
                start: m.start_date.into(),
                end: m.end_date.into(),
            })
            .collect())
    }

    async fn completed_for_user(
        &self,
        booker_id: i64,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> ItemResult<bool> {
        let count = entity::Entity::find()
            .filter(entity::Column::BookerId.eq(booker_id))
            .filter(entity::Column::ItemId.eq(item_id))
            .filter(entity::Column::Status.eq(BookingStatus::Approved))
            .filter(entity::Column::EndDate.lt(now))
            .count(&self.db)
            .await
            .map_err(|e| ItemError::Internal(format!("Database error: {}", e)))?;

        Ok(count > 0)
    }
}
