use db::models::{
    course, question, question_option, quiz, quiz_result, quiz_tag, response, tag, user,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sea_orm::{ConnectionTrait, TransactionTrait};
use std::fmt;
use std::time::{Duration, Instant};

use crate::config::GenerationConfig;
use crate::error::{AtStage, SeedError};
use crate::seed::{Stage, run_stage};
use crate::seeds;

/// Everything one run created, grouped per entity in creation order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub users: Vec<user::Model>,
    pub courses: Vec<course::Model>,
    pub quizzes: Vec<quiz::Model>,
    pub tags: Vec<tag::Model>,
    pub quiz_tags: Vec<quiz_tag::Model>,
    pub questions: Vec<question::Model>,
    pub options: Vec<question_option::Model>,
    pub results: Vec<quiz_result::Model>,
    pub responses: Vec<response::Model>,
}

/// Row counts per entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntityCounts {
    pub users: usize,
    pub courses: usize,
    pub quizzes: usize,
    pub tags: usize,
    pub quiz_tags: usize,
    pub questions: usize,
    pub options: usize,
    pub results: usize,
    pub responses: usize,
}

impl Dataset {
    pub fn counts(&self) -> EntityCounts {
        EntityCounts {
            users: self.users.len(),
            courses: self.courses.len(),
            quizzes: self.quizzes.len(),
            tags: self.tags.len(),
            quiz_tags: self.quiz_tags.len(),
            questions: self.questions.len(),
            options: self.options.len(),
            results: self.results.len(),
            responses: self.responses.len(),
        }
    }
}

impl fmt::Display for EntityCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "users={} courses={} quizzes={} tags={} quiz_tags={} questions={} options={} results={} responses={}",
            self.users,
            self.courses,
            self.quizzes,
            self.tags,
            self.quiz_tags,
            self.questions,
            self.options,
            self.results,
            self.responses
        )
    }
}

/// Outcome of a committed run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub dataset: Dataset,
    pub elapsed: Duration,
}

impl GenerationReport {
    pub fn counts(&self) -> EntityCounts {
        self.dataset.counts()
    }
}

/// Runs all nine stages against `db` without any transaction handling.
///
/// Each stage only sees the models returned by the stages before it. The
/// first failing stage aborts the pipeline; rows written by earlier stages
/// stay wherever `db` put them.
pub async fn generate<C, R>(
    db: &C,
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<Dataset, SeedError>
where
    C: ConnectionTrait,
    R: Rng,
{
    config.validate()?;
    let progress = config.show_progress;

    let users = run_stage(Stage::Users, progress, seeds::user::seed(db, config, rng)).await?;
    let courses = run_stage(
        Stage::Courses,
        progress,
        seeds::course::seed(db, &users, config, rng),
    )
    .await?;
    let quizzes = run_stage(
        Stage::Quizzes,
        progress,
        seeds::quiz::seed(db, &users, &courses, config, rng),
    )
    .await?;
    let tags = run_stage(Stage::Tags, progress, seeds::tag::seed(db, config, rng)).await?;
    let quiz_tags = run_stage(
        Stage::QuizTags,
        progress,
        seeds::quiz_tag::seed(db, &quizzes, &tags, config, rng),
    )
    .await?;
    let questions = run_stage(
        Stage::Questions,
        progress,
        seeds::question::seed(db, &quizzes, config, rng),
    )
    .await?;
    let options = run_stage(
        Stage::Options,
        progress,
        seeds::question_option::seed(db, &questions, rng),
    )
    .await?;
    let results = run_stage(
        Stage::Results,
        progress,
        seeds::quiz_result::seed(db, &users, &quizzes, config, rng),
    )
    .await?;
    let responses = run_stage(
        Stage::Responses,
        progress,
        seeds::response::seed(db, &users, &questions, &options, config, rng),
    )
    .await?;

    Ok(Dataset {
        users,
        courses,
        quizzes,
        tags,
        quiz_tags,
        questions,
        options,
        results,
        responses,
    })
}

/// Seeds the store in a single transaction with an RNG built from
/// `config.seed` (or the OS when unset).
pub async fn run_generation<D>(db: &D, config: &GenerationConfig) -> Result<GenerationReport, SeedError>
where
    D: TransactionTrait,
{
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    run_generation_with_rng(db, config, &mut rng).await
}

/// Seeds the store in a single transaction.
///
/// Either all nine stages commit together or, on the first error, the
/// transaction is rolled back and the store is left as it was.
pub async fn run_generation_with_rng<D, R>(
    db: &D,
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<GenerationReport, SeedError>
where
    D: TransactionTrait,
    R: Rng,
{
    let start = Instant::now();
    let txn = db.begin().await.at(Stage::Transaction)?;

    match generate(&txn, config, rng).await {
        Ok(dataset) => {
            txn.commit().await.at(Stage::Transaction)?;
            let report = GenerationReport {
                dataset,
                elapsed: start.elapsed(),
            };
            log::info!("generation committed in {:.2?}: {}", report.elapsed, report.counts());
            Ok(report)
        }
        Err(err) => {
            log::error!("generation aborted, rolling back: {}", err);
            if let Err(rollback_err) = txn.rollback().await {
                log::error!("rollback failed: {}", rollback_err);
            }
            Err(err)
        }
    }
}
