use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM entity for the requests table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub description: String,
    pub requestor_id: i64,
    pub created: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::ItemRequest {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
            requestor_id: model.requestor_id,
            created: model.created.into(),
        }
    }
}

impl Model {
    pub fn active_model_for_create(
        requestor_id: i64,
        input: crate::models::CreateItemRequest,
    ) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            description: Set(input.description),
            requestor_id: Set(requestor_id),
            created: Set(chrono::Utc::now().into()),
        }
    }
}
