use db::models::quiz_result::{self, NewQuizResult};
use db::models::{quiz, user};
use rand::Rng;
use sea_orm::ConnectionTrait;

use crate::config::GenerationConfig;
use crate::error::{AtStage, SeedError};
use crate::sampling::{pick_distinct, subset_size};
use crate::seed::Stage;

const STAGE: Stage = Stage::Results;

/// Gives every user a result on a non-empty set of distinct quizzes.
pub async fn seed<C, R>(
    db: &C,
    users: &[user::Model],
    quizzes: &[quiz::Model],
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<Vec<quiz_result::Model>, SeedError>
where
    C: ConnectionTrait,
    R: Rng,
{
    let mut results = Vec::new();

    for user in users {
        let size = subset_size(config.subset_sizing, quizzes.len(), rng);
        for quiz in pick_distinct(quizzes, size, rng, STAGE, "quizzes")? {
            let result = NewQuizResult {
                user_id: user.id,
                quiz_id: quiz.id,
                total_score: rng.random_range(0..=100),
                passed: rng.random_bool(0.5),
            }
            .insert(db)
            .await
            .at(STAGE)?;
            results.push(result);
        }
    }

    Ok(results)
}
