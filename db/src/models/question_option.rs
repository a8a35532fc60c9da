use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait};
use serde::Serialize;

/// An answer option in the `options` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "options")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text")]
    pub option_text: String,
    pub is_correct: bool,
    pub question_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::question::Entity",
        from = "Column::QuestionId",
        to = "super::question::Column::Id",
        on_delete = "Cascade"
    )]
    Question,

    #[sea_orm(has_many = "super::response::Entity")]
    Response,
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl Related<super::response::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Response.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewQuestionOption {
    pub option_text: String,
    pub is_correct: bool,
    pub question_id: i64,
}

impl NewQuestionOption {
    pub async fn insert<C: ConnectionTrait>(self, db: &C) -> Result<Model, DbErr> {
        ActiveModel {
            option_text: Set(self.option_text),
            is_correct: Set(self.is_correct),
            question_id: Set(self.question_id),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}
