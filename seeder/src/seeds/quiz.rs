use db::models::{course, quiz::{self, NewQuiz}, user};
use fake::Fake;
use fake::faker::company::en::CatchPhrase;
use fake::faker::lorem::en::Paragraph;
use rand::Rng;
use sea_orm::ConnectionTrait;

use crate::config::{GenerationConfig, QuizAllocation};
use crate::error::{AtStage, SeedError};
use crate::sampling::{pick, quiz_window};
use crate::seed::Stage;

const STAGE: Stage = Stage::Quizzes;

/// Creates quizzes according to the configured allocation. Every quiz gets a
/// random creator and an ordered time window inside the current year.
pub async fn seed<C, R>(
    db: &C,
    users: &[user::Model],
    courses: &[course::Model],
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<Vec<quiz::Model>, SeedError>
where
    C: ConnectionTrait,
    R: Rng,
{
    let mut quizzes = Vec::with_capacity(config.expected_quizzes());

    match config.quiz_allocation {
        QuizAllocation::PerCourse(per_course) => {
            if courses.is_empty() {
                return Err(SeedError::EmptyPool { stage: STAGE, pool: "courses" });
            }
            for course in courses {
                for _ in 0..per_course {
                    quizzes.push(create(db, course.id, users, rng).await?);
                }
            }
        }
        QuizAllocation::Global(total) => {
            for _ in 0..total {
                let course = pick(courses, rng, STAGE, "courses")?;
                quizzes.push(create(db, course.id, users, rng).await?);
            }
        }
    }

    Ok(quizzes)
}

async fn create<C, R>(
    db: &C,
    course_id: i64,
    users: &[user::Model],
    rng: &mut R,
) -> Result<quiz::Model, SeedError>
where
    C: ConnectionTrait,
    R: Rng,
{
    let creator = pick(users, rng, STAGE, "users")?;
    let (start_time, end_time) = quiz_window(rng);

    NewQuiz {
        quiz_name: CatchPhrase().fake_with_rng(rng),
        description: Some(Paragraph(1..3).fake_with_rng(rng)),
        course_id: Some(course_id),
        created_by: Some(creator.id),
        start_time,
        end_time,
    }
    .insert(db)
    .await
    .at(STAGE)
}
