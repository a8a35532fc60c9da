use db::models::question;
use db::models::question_option::{self, NewQuestionOption};
use fake::Fake;
use fake::faker::lorem::en::Sentence;
use rand::Rng;
use sea_orm::ConnectionTrait;

use crate::config::OPTIONS_PER_QUESTION;
use crate::error::{AtStage, SeedError};
use crate::seed::Stage;

const STAGE: Stage = Stage::Options;

/// Creates exactly [`OPTIONS_PER_QUESTION`] options per question.
///
/// Correctness is drawn independently per option, so a question may end up
/// with no correct option or with several.
pub async fn seed<C, R>(
    db: &C,
    questions: &[question::Model],
    rng: &mut R,
) -> Result<Vec<question_option::Model>, SeedError>
where
    C: ConnectionTrait,
    R: Rng,
{
    let mut options = Vec::with_capacity(questions.len() * OPTIONS_PER_QUESTION);

    for question in questions {
        for _ in 0..OPTIONS_PER_QUESTION {
            let option = NewQuestionOption {
                option_text: Sentence(2..6).fake_with_rng(rng),
                is_correct: rng.random_bool(0.5),
                question_id: question.id,
            }
            .insert(db)
            .await
            .at(STAGE)?;
            options.push(option);
        }
    }

    Ok(options)
}
