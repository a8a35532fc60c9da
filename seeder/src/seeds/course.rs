use db::models::{course::{self, NewCourse}, user};
use fake::Fake;
use fake::faker::company::en::CatchPhrase;
use fake::faker::lorem::en::Paragraph;
use rand::Rng;
use sea_orm::ConnectionTrait;

use crate::config::GenerationConfig;
use crate::error::{AtStage, SeedError};
use crate::sampling::pick;
use crate::seed::Stage;

const STAGE: Stage = Stage::Courses;

/// Creates `num_courses` courses, each with a creator drawn from `users`
/// (with replacement).
pub async fn seed<C, R>(
    db: &C,
    users: &[user::Model],
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<Vec<course::Model>, SeedError>
where
    C: ConnectionTrait,
    R: Rng,
{
    let mut courses = Vec::with_capacity(config.num_courses);

    for _ in 0..config.num_courses {
        let creator = pick(users, rng, STAGE, "users")?;
        let course = NewCourse {
            course_name: CatchPhrase().fake_with_rng(rng),
            description: Some(Paragraph(1..3).fake_with_rng(rng)),
            created_by: Some(creator.id),
        }
        .insert(db)
        .await
        .at(STAGE)?;
        courses.push(course);
    }

    Ok(courses)
}
