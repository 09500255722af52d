//! Sea-ORM entities for the items and comments tables

pub mod item {
    use sea_orm::ActiveValue::{NotSet, Set};
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "items")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub name: String,
        pub description: String,
        pub is_available: bool,
        pub owner_id: i64,
        pub request_id: Option<i64>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Item {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                name: model.name,
                description: model.description,
                available: model.is_available,
                owner_id: model.owner_id,
                request_id: model.request_id,
            }
        }
    }

    impl Model {
        pub fn active_model_for_create(
            owner_id: i64,
            input: crate::models::CreateItem,
        ) -> ActiveModel {
            ActiveModel {
                id: NotSet,
                name: Set(input.name),
                description: Set(input.description),
                is_available: Set(input.available),
                owner_id: Set(owner_id),
                request_id: Set(input.request_id),
            }
        }
    }
}

pub mod comment {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "comments")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub text: String,
        pub item_id: i64,
        pub author_id: i64,
        pub created: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Comment {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                text: model.text,
                item_id: model.item_id,
                author_id: model.author_id,
                created: model.created.into(),
            }
        }
    }
}
