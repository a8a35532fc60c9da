use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait};
use serde::Serialize;

/// A quiz in the `quizzes` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "quizzes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub quiz_name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub course_id: Option<i64>,
    pub created_by: Option<i64>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    Creator,

    #[sea_orm(has_many = "super::question::Entity")]
    Question,

    #[sea_orm(has_many = "super::quiz_result::Entity")]
    QuizResult,

    #[sea_orm(has_many = "super::quiz_tag::Entity")]
    QuizTag,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl Related<super::quiz_result::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuizResult.def()
    }
}

impl Related<super::quiz_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuizTag.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::quiz_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::quiz_tag::Relation::Quiz.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Attribute values for a new quiz. The time window is stored as given.
#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub quiz_name: String,
    pub description: Option<String>,
    pub course_id: Option<i64>,
    pub created_by: Option<i64>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl NewQuiz {
    pub async fn insert<C: ConnectionTrait>(self, db: &C) -> Result<Model, DbErr> {
        ActiveModel {
            quiz_name: Set(self.quiz_name),
            description: Set(self.description),
            course_id: Set(self.course_id),
            created_by: Set(self.created_by),
            start_time: Set(self.start_time),
            end_time: Set(self.end_time),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}
