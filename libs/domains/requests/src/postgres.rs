use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::{
    entity,
    error::{RequestError, RequestResult},
    models::{CreateItemRequest, ItemRequest},
    repository::RequestRepository,
};

/// PostgreSQL-backed implementation of RequestRepository
pub struct PgRequestRepository {
    db: DatabaseConnection,
}

impl PgRequestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RequestRepository for PgRequestRepository {
    async fn create(
        &self,
        requestor_id: i64,
        input: CreateItemRequest,
    ) -> RequestResult<ItemRequest> {
        let active_model = entity::Model::active_model_for_create(requestor_id, input);

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| RequestError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(request_id = %model.id, requestor_id = %requestor_id, "Created request");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> RequestResult<Option<ItemRequest>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RequestError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn find_by_requestor(&self, requestor_id: i64) -> RequestResult<Vec<ItemRequest>> {
        let models = entity::Entity::find()
            .filter(entity::Column::RequestorId.eq(requestor_id))
            .order_by_desc(entity::Column::Created)
            .all(&self.db)
            .await
            .map_err(|e| RequestError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn find_others(
        &self,
        requestor_id: i64,
        from: u64,
        size: u64,
    ) -> RequestResult<Vec<ItemRequest>> {
        let models = entity::Entity::find()
            .filter(entity::Column::RequestorId.ne(requestor_id))
            .order_by_desc(entity::Column::Created)
            .offset(from)
            .limit(size)
            .all(&self.db)
            .await
            .map_err(|e| RequestError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}
