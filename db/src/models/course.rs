use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait};
use serde::Serialize;

/// A course in the `courses` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Creating user; cleared when that user row is deleted.
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    Creator,

    #[sea_orm(has_many = "super::quiz::Entity")]
    Quiz,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::quiz::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub course_name: String,
    pub description: Option<String>,
    pub created_by: Option<i64>,
}

impl NewCourse {
    /// Inserts the course, stamping `created_at` with the current time.
    pub async fn insert<C: ConnectionTrait>(self, db: &C) -> Result<Model, DbErr> {
        ActiveModel {
            course_name: Set(self.course_name),
            description: Set(self.description),
            created_by: Set(self.created_by),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quiz;
    use crate::models::quiz::NewQuiz;
    use crate::test_utils::setup_test_db;
    use chrono::Duration;
    use sea_orm::{PaginatorTrait, SqlErr};

    #[tokio::test]
    async fn test_course_without_creator() {
        let db = setup_test_db().await;

        let course = NewCourse {
            course_name: "Orphaned".into(),
            description: None,
            created_by: None,
        }
        .insert(&db)
        .await
        .unwrap();

        assert_eq!(course.created_by, None);
    }

    #[tokio::test]
    async fn test_unknown_creator_is_rejected() {
        let db = setup_test_db().await;

        let err = NewCourse {
            course_name: "Ghost".into(),
            description: None,
            created_by: Some(4242),
        }
        .insert(&db)
        .await
        .unwrap_err();

        assert!(matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))));
    }

    #[tokio::test]
    async fn test_delete_course_cascades_to_quizzes() {
        let db = setup_test_db().await;
        let course = NewCourse { course_name: "Algebra".into(), description: None, created_by: None }
            .insert(&db)
            .await
            .unwrap();
        let now = Utc::now();
        for name in ["Groups", "Rings"] {
            NewQuiz {
                quiz_name: name.into(),
                description: None,
                course_id: Some(course.id),
                created_by: None,
                start_time: now,
                end_time: now + Duration::minutes(30),
            }
            .insert(&db)
            .await
            .unwrap();
        }
        assert_eq!(Quiz::find().count(&db).await.unwrap(), 2);

        Entity::delete_by_id(course.id).exec(&db).await.unwrap();

        assert_eq!(Quiz::find().count(&db).await.unwrap(), 0);
    }
}
