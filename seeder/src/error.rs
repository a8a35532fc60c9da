use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::seed::Stage;

/// Every way a generation run can abort.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The store rejected a row on a unique or foreign-key constraint.
    #[error("{stage}: integrity violation: {message}")]
    IntegrityViolation { stage: Stage, message: String },

    /// A stage had to sample from a pool that earlier stages left empty.
    #[error("{stage}: cannot sample from an empty {pool} pool")]
    EmptyPool { stage: Stage, pool: &'static str },

    #[error("{stage}: no unused {field} after {attempts} attempts")]
    UniqueValuesExhausted {
        stage: Stage,
        field: &'static str,
        attempts: u32,
    },

    #[error("{stage}: database unreachable: {source}")]
    Connectivity {
        stage: Stage,
        #[source]
        source: DbErr,
    },

    #[error("{stage}: database error: {source}")]
    Database {
        stage: Stage,
        #[source]
        source: DbErr,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SeedError {
    /// Classifies a store error raised while running `stage`.
    pub fn from_db(stage: Stage, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message))
            | Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
                return SeedError::IntegrityViolation { stage, message };
            }
            _ => {}
        }

        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => SeedError::Connectivity { stage, source: err },
            other => SeedError::Database { stage, source: other },
        }
    }

    /// The stage that failed, if the error came from one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            SeedError::IntegrityViolation { stage, .. }
            | SeedError::EmptyPool { stage, .. }
            | SeedError::UniqueValuesExhausted { stage, .. }
            | SeedError::Connectivity { stage, .. }
            | SeedError::Database { stage, .. } => Some(*stage),
            SeedError::Config(_) => None,
        }
    }
}

/// Tags a store result with the stage it belongs to.
pub trait AtStage<T> {
    fn at(self, stage: Stage) -> Result<T, SeedError>;
}

impl<T> AtStage<T> for Result<T, DbErr> {
    fn at(self, stage: Stage) -> Result<T, SeedError> {
        self.map_err(|err| SeedError::from_db(stage, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use db::models::quiz::NewQuiz;
    use db::models::quiz_tag;
    use db::models::tag::NewTag;
    use db::test_utils::setup_test_db;
    use sea_orm::{ConnAcquireErr, RuntimeErr};

    #[test]
    fn connection_errors_are_connectivity() {
        let err = SeedError::from_db(Stage::Users, DbErr::ConnectionAcquire(ConnAcquireErr::Timeout));
        assert!(matches!(err, SeedError::Connectivity { stage: Stage::Users, .. }));

        let err = SeedError::from_db(
            Stage::Tags,
            DbErr::Conn(RuntimeErr::Internal("refused".into())),
        );
        assert!(matches!(err, SeedError::Connectivity { stage: Stage::Tags, .. }));
    }

    #[test]
    fn other_errors_keep_their_stage() {
        let err = SeedError::from_db(Stage::Options, DbErr::Custom("boom".into()));
        assert!(matches!(err, SeedError::Database { stage: Stage::Options, .. }));
        assert_eq!(err.stage(), Some(Stage::Options));
        assert!(err.to_string().starts_with("Options:"));
    }

    #[test]
    fn config_errors_have_no_stage() {
        assert_eq!(SeedError::Config("bad".into()).stage(), None);
    }

    #[tokio::test]
    async fn duplicate_tag_is_integrity_violation() {
        let db = setup_test_db().await;
        NewTag { name: "algebra".into() }.insert(&db).await.unwrap();

        let err = NewTag { name: "algebra".into() }
            .insert(&db)
            .await
            .at(Stage::Tags)
            .unwrap_err();

        match err {
            SeedError::IntegrityViolation { stage, message } => {
                assert_eq!(stage, Stage::Tags);
                assert!(message.contains("tags.name"), "{message}");
            }
            other => panic!("expected integrity violation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn link_to_missing_tag_is_integrity_violation() {
        let db = setup_test_db().await;
        let start = Utc::now();
        let quiz = NewQuiz {
            quiz_name: "Week 1".into(),
            description: None,
            course_id: None,
            created_by: None,
            start_time: start,
            end_time: start + Duration::hours(1),
        }
        .insert(&db)
        .await
        .unwrap();

        let err = quiz_tag::link_all(&db, [(quiz.id, 4242)])
            .await
            .at(Stage::QuizTags)
            .unwrap_err();

        assert!(matches!(err, SeedError::IntegrityViolation { stage: Stage::QuizTags, .. }));
    }

    #[tokio::test]
    async fn repeated_link_is_integrity_violation() {
        let db = setup_test_db().await;
        let start = Utc::now();
        let quiz = NewQuiz {
            quiz_name: "Week 2".into(),
            description: None,
            course_id: None,
            created_by: None,
            start_time: start,
            end_time: start + Duration::hours(1),
        }
        .insert(&db)
        .await
        .unwrap();
        let tag = NewTag { name: "sets".into() }.insert(&db).await.unwrap();

        let err = quiz_tag::link_all(&db, [(quiz.id, tag.id), (quiz.id, tag.id)])
            .await
            .at(Stage::QuizTags)
            .unwrap_err();

        assert!(matches!(err, SeedError::IntegrityViolation { stage: Stage::QuizTags, .. }));
    }
}
