use db::models::{quiz, quiz_tag, tag};
use rand::Rng;
use sea_orm::ConnectionTrait;

use crate::config::GenerationConfig;
use crate::error::{AtStage, SeedError};
use crate::sampling::pick_distinct;
use crate::seed::Stage;

const STAGE: Stage = Stage::QuizTags;

/// Links every quiz to a random number of distinct tags, written as one batch.
pub async fn seed<C, R>(
    db: &C,
    quizzes: &[quiz::Model],
    tags: &[tag::Model],
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<Vec<quiz_tag::Model>, SeedError>
where
    C: ConnectionTrait,
    R: Rng,
{
    let mut links = Vec::new();

    for quiz in quizzes {
        let count = rng.random_range(config.tags_per_quiz.clone());
        for tag in pick_distinct(tags, count, rng, STAGE, "tags")? {
            links.push(quiz_tag::Model { quiz_id: quiz.id, tag_id: tag.id });
        }
    }

    let written = quiz_tag::link_all(db, links.iter().map(|l| (l.quiz_id, l.tag_id)))
        .await
        .at(STAGE)?;
    log::debug!("{}: wrote {} link rows", STAGE, written);

    Ok(links)
}
