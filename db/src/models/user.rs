use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{course, quiz};

/// A platform account in the `users` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique login name.
    #[sea_orm(unique)]
    pub username: String,
    /// Unique email address.
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Platform-wide role of a user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Display, EnumString,
    Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    #[sea_orm(string_value = "student")]
    Student,

    #[sea_orm(string_value = "teacher")]
    Teacher,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course::Entity")]
    Course,

    #[sea_orm(has_many = "super::quiz::Entity")]
    Quiz,

    #[sea_orm(has_many = "super::quiz_result::Entity")]
    QuizResult,

    #[sea_orm(has_many = "super::response::Entity")]
    Response,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::quiz::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl Related<super::quiz_result::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuizResult.def()
    }
}

impl Related<super::response::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Response.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Attribute values for a new user row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl NewUser {
    pub async fn insert<C: ConnectionTrait>(self, db: &C) -> Result<Model, DbErr> {
        ActiveModel {
            username: Set(self.username),
            email: Set(self.email),
            password: Set(self.password),
            role: Set(self.role),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}

impl Model {
    /// Deletes a user together with the courses and quizzes they created.
    ///
    /// Removing the user row alone only clears `created_by` on those rows.
    /// Everything hanging off the removed courses and quizzes, and the user's
    /// own results and responses, goes with them through the store cascades.
    ///
    /// Returns `false` if no user with `id` existed.
    pub async fn delete_cascading<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool, DbErr> {
        course::Entity::delete_many()
            .filter(course::Column::CreatedBy.eq(id))
            .exec(db)
            .await?;
        quiz::Entity::delete_many()
            .filter(quiz::Column::CreatedBy.eq(id))
            .exec(db)
            .await?;

        let res = Entity::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::course::NewCourse;
    use crate::models::question::{NewQuestion, QuestionType};
    use crate::models::question_option::NewQuestionOption;
    use crate::models::quiz::NewQuiz;
    use crate::models::quiz_result::NewQuizResult;
    use crate::models::response::NewResponse;
    use crate::models::{Course, Quiz, QuizResult, Response as ResponseEntity};
    use crate::test_utils::setup_test_db;
    use chrono::{Duration, Utc};
    use sea_orm::{PaginatorTrait, SqlErr};

    fn new_user(name: &str, role: Role) -> NewUser {
        NewUser {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            password: "hunter22".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_create_user_assigns_identity() {
        let db = setup_test_db().await;

        let a = new_user("alice", Role::Teacher).insert(&db).await.unwrap();
        let b = new_user("bob", Role::Student).insert(&db).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.role, Role::Teacher);
        let found = Entity::find_by_id(b.id).one(&db).await.unwrap().unwrap();
        assert_eq!(found.username, "bob");
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let db = setup_test_db().await;
        new_user("alice", Role::Student).insert(&db).await.unwrap();

        let mut dup = new_user("alice", Role::Student);
        dup.email = "other@example.com".to_string();
        let err = dup.insert(&db).await.unwrap_err();

        assert!(matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))));
    }

    #[test]
    fn test_role_round_trips_through_text() {
        assert_eq!(Role::Teacher.to_string(), "teacher");
        assert_eq!("Student".parse::<Role>().unwrap(), Role::Student);
    }

    #[tokio::test]
    async fn test_delete_cascading_removes_owned_rows() {
        let db = setup_test_db().await;
        let owner = new_user("owner", Role::Teacher).insert(&db).await.unwrap();
        let other = new_user("other", Role::Student).insert(&db).await.unwrap();

        let course = NewCourse {
            course_name: "Databases".into(),
            description: None,
            created_by: Some(owner.id),
        }
        .insert(&db)
        .await
        .unwrap();
        let now = Utc::now();
        let quiz = NewQuiz {
            quiz_name: "Joins".into(),
            description: None,
            course_id: Some(course.id),
            created_by: Some(owner.id),
            start_time: now,
            end_time: now + Duration::hours(1),
        }
        .insert(&db)
        .await
        .unwrap();
        let question = NewQuestion {
            question_text: "Which join keeps unmatched rows?".into(),
            question_type: QuestionType::MultipleChoice,
            quiz_id: quiz.id,
        }
        .insert(&db)
        .await
        .unwrap();
        let option = NewQuestionOption {
            option_text: "LEFT JOIN".into(),
            is_correct: true,
            question_id: question.id,
        }
        .insert(&db)
        .await
        .unwrap();
        NewQuizResult { user_id: owner.id, quiz_id: quiz.id, total_score: 80, passed: true }
            .insert(&db)
            .await
            .unwrap();
        NewResponse {
            user_id: other.id,
            question_id: question.id,
            option_id: Some(option.id),
            submitted_at: now,
        }
        .insert(&db)
        .await
        .unwrap();

        assert!(Model::delete_cascading(&db, owner.id).await.unwrap());

        assert_eq!(Course::find().count(&db).await.unwrap(), 0);
        assert_eq!(Quiz::find().count(&db).await.unwrap(), 0);
        assert_eq!(QuizResult::find().count(&db).await.unwrap(), 0);
        // other's response hung off the deleted quiz's question
        assert_eq!(ResponseEntity::find().count(&db).await.unwrap(), 0);
        assert!(Entity::find_by_id(other.id).one(&db).await.unwrap().is_some());
        assert!(!Model::delete_cascading(&db, owner.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_row_delete_nulls_creator_references() {
        let db = setup_test_db().await;
        let creator = new_user("creator", Role::Teacher).insert(&db).await.unwrap();
        let student = new_user("student", Role::Student).insert(&db).await.unwrap();

        let course = NewCourse {
            course_name: "Networks".into(),
            description: Some("TCP and friends".into()),
            created_by: Some(creator.id),
        }
        .insert(&db)
        .await
        .unwrap();
        let now = Utc::now();
        let quiz = NewQuiz {
            quiz_name: "Handshakes".into(),
            description: None,
            course_id: Some(course.id),
            created_by: Some(creator.id),
            start_time: now,
            end_time: now + Duration::hours(2),
        }
        .insert(&db)
        .await
        .unwrap();
        NewQuizResult { user_id: creator.id, quiz_id: quiz.id, total_score: 10, passed: false }
            .insert(&db)
            .await
            .unwrap();
        NewQuizResult { user_id: student.id, quiz_id: quiz.id, total_score: 90, passed: true }
            .insert(&db)
            .await
            .unwrap();

        Entity::delete_by_id(creator.id).exec(&db).await.unwrap();

        let course = Course::find_by_id(course.id).one(&db).await.unwrap().unwrap();
        assert_eq!(course.created_by, None);
        let quiz = Quiz::find_by_id(quiz.id).one(&db).await.unwrap().unwrap();
        assert_eq!(quiz.created_by, None);
        let results = QuizResult::find().all(&db).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].user_id, student.id);
    }
}
