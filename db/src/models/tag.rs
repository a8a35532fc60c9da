use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait};
use serde::Serialize;

/// A tag in the `tags` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::quiz_tag::Entity")]
    QuizTag,
}

impl Related<super::quiz_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuizTag.def()
    }
}

impl Related<super::quiz::Entity> for Entity {
    fn to() -> RelationDef {
        super::quiz_tag::Relation::Quiz.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::quiz_tag::Relation::Tag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: String,
}

impl NewTag {
    pub async fn insert<C: ConnectionTrait>(self, db: &C) -> Result<Model, DbErr> {
        ActiveModel {
            name: Set(self.name),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}
