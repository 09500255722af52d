use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::{Condition, Expr, extension::postgres::PgExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    entity,
    error::{ItemError, ItemResult},
    models::{Comment, CreateComment, CreateItem, Item, UpdateItem},
    repository::ItemRepository,
};

/// PostgreSQL-backed implementation of ItemRepository
pub struct PgItemRepository {
    db: DatabaseConnection,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn create(&self, owner_id: i64, input: CreateItem) -> ItemResult<Item> {
        let active_model = entity::item::Model::active_model_for_create(owner_id, input);

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| ItemError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(item_id = %model.id, owner_id = %owner_id, "Created item");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        let model = entity::item::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ItemError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn find_by_ids(&self, ids: Vec<i64>) -> ItemResult<Vec<Item>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = entity::item::Entity::find()
            .filter(entity::item::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(|e| ItemError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_owner(&self, owner_id: i64) -> ItemResult<Vec<Item>> {
        let models = entity::item::Entity::find()
            .filter(entity::item::Column::OwnerId.eq(owner_id))
            .order_by_asc(entity::item::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ItemError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_request_ids(&self, request_ids: Vec<i64>) -> ItemResult<Vec<Item>> {
        if request_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = entity::item::Entity::find()
            .filter(entity::item::Column::RequestId.is_in(request_ids))
            .all(&self.db)
            .await
            .map_err(|e| ItemError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: i64, input: UpdateItem) -> ItemResult<Item> {
        let model = entity::item::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ItemError::Internal(format!("Database error: {}", e)))?
            .ok_or(ItemError::NotFound(id))?;

        let mut item: Item = model.into();
        item.apply_update(input);

        let active_model = entity::item::ActiveModel {
            id: Set(item.id),
            name: Set(item.name.clone()),
            description: Set(item.description.clone()),
            is_available: Set(item.available),
            owner_id: Set(item.owner_id),
            request_id: Set(item.request_id),
        };

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(|e| ItemError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(item_id = %id, "Updated item");
        Ok(updated.into())
    }

    async fn search(&self, text: &str) -> ItemResult<Vec<Item>> {
        let pattern = format!("%{}%", text);

        let models = entity::item::Entity::find()
            .filter(entity::item::Column::IsAvailable.eq(true))
            .filter(
                Condition::any()
                    .add(Expr::col(entity::item::Column::Name).ilike(pattern.clone()))
                    .add(Expr::col(entity::item::Column::Description).ilike(pattern)),
            )
            .order_by_asc(entity::item::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ItemError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn add_comment(
        &self,
        item_id: i64,
        author_id: i64,
        input: CreateComment,
    ) -> ItemResult<Comment> {
        let active_model = entity::comment::ActiveModel {
            id: NotSet,
            text: Set(input.text),
            item_id: Set(item_id),
            author_id: Set(author_id),
            created: Set(chrono::Utc::now().into()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| ItemError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(comment_id = %model.id, item_id = %item_id, "Created comment");
        Ok(model.into())
    }

    async fn comments_for_items(&self, item_ids: Vec<i64>) -> ItemResult<Vec<Comment>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = entity::comment::Entity::find()
            .filter(entity::comment::Column::ItemId.is_in(item_ids))
            .order_by_asc(entity::comment::Column::Created)
            .all(&self.db)
            .await
            .map_err(|e| ItemError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}
