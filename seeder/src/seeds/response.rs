use db::models::response::{self, NewResponse};
use db::models::{question, question_option, user};
use rand::Rng;
use sea_orm::ConnectionTrait;
use std::collections::HashMap;

use crate::config::{GenerationConfig, ResponseOptions};
use crate::error::{AtStage, SeedError};
use crate::sampling::{pick, pick_distinct, subset_size, this_year};
use crate::seed::Stage;

const STAGE: Stage = Stage::Responses;

/// Gives every user a response on a non-empty set of distinct questions.
///
/// With [`ResponseOptions::AnyOption`] the chosen option comes from the whole
/// option pool and need not belong to the answered question.
pub async fn seed<C, R>(
    db: &C,
    users: &[user::Model],
    questions: &[question::Model],
    options: &[question_option::Model],
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<Vec<response::Model>, SeedError>
where
    C: ConnectionTrait,
    R: Rng,
{
    let mut by_question: HashMap<i64, Vec<&question_option::Model>> = HashMap::new();
    if config.response_options == ResponseOptions::OwnQuestion {
        for option in options {
            by_question.entry(option.question_id).or_default().push(option);
        }
    }

    let mut responses = Vec::new();

    for user in users {
        let size = subset_size(config.subset_sizing, questions.len(), rng);
        for question in pick_distinct(questions, size, rng, STAGE, "questions")? {
            let option_id = match config.response_options {
                ResponseOptions::AnyOption => pick(options, rng, STAGE, "options")?.id,
                ResponseOptions::OwnQuestion => {
                    let own = by_question
                        .get(&question.id)
                        .map(Vec::as_slice)
                        .unwrap_or_default();
                    pick(own, rng, STAGE, "question options")?.id
                }
            };

            let response = NewResponse {
                user_id: user.id,
                question_id: question.id,
                option_id: Some(option_id),
                submitted_at: this_year(rng),
            }
            .insert(db)
            .await
            .at(STAGE)?;
            responses.push(response);
        }
    }

    Ok(responses)
}
