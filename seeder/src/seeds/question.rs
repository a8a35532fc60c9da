use db::models::question::{self, NewQuestion, QuestionType};
use db::models::quiz;
use fake::Fake;
use fake::faker::lorem::en::Sentence;
use rand::Rng;
use sea_orm::ConnectionTrait;

use crate::config::GenerationConfig;
use crate::error::{AtStage, SeedError};
use crate::seed::Stage;

const STAGE: Stage = Stage::Questions;

/// Creates `questions_per_quiz` questions for every quiz.
pub async fn seed<C, R>(
    db: &C,
    quizzes: &[quiz::Model],
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<Vec<question::Model>, SeedError>
where
    C: ConnectionTrait,
    R: Rng,
{
    let mut questions = Vec::with_capacity(quizzes.len() * config.questions_per_quiz);

    for quiz in quizzes {
        for _ in 0..config.questions_per_quiz {
            let sentence: String = Sentence(4..10).fake_with_rng(rng);
            let question_type = if rng.random_bool(0.5) {
                QuestionType::MultipleChoice
            } else {
                QuestionType::TrueFalse
            };

            let question = NewQuestion {
                question_text: as_question(&sentence),
                question_type,
                quiz_id: quiz.id,
            }
            .insert(db)
            .await
            .at(STAGE)?;
            questions.push(question);
        }
    }

    Ok(questions)
}

fn as_question(sentence: &str) -> String {
    format!("{}?", sentence.trim_end_matches('.'))
}
