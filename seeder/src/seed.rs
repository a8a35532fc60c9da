use colored::*;
use std::fmt;
use std::future::Future;
use std::io::{self, Write};
use std::time::Instant;

use crate::error::SeedError;

const STATUS_COLUMN: usize = 80;

/// Generation stages, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Users,
    Courses,
    Quizzes,
    Tags,
    QuizTags,
    Questions,
    Options,
    Results,
    Responses,
    /// Opening or committing the surrounding transaction.
    Transaction,
}

impl Stage {
    pub const ORDER: [Stage; 9] = [
        Stage::Users,
        Stage::Courses,
        Stage::Quizzes,
        Stage::Tags,
        Stage::QuizTags,
        Stage::Questions,
        Stage::Options,
        Stage::Results,
        Stage::Responses,
    ];

    /// 1-based position in [`Stage::ORDER`]; `None` for [`Stage::Transaction`].
    pub fn step(self) -> Option<usize> {
        Stage::ORDER.iter().position(|s| *s == self).map(|i| i + 1)
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Users => "Users",
            Stage::Courses => "Courses",
            Stage::Quizzes => "Quizzes",
            Stage::Tags => "Tags",
            Stage::QuizTags => "QuizTags",
            Stage::Questions => "Questions",
            Stage::Options => "Options",
            Stage::Results => "Results",
            Stage::Responses => "Responses",
            Stage::Transaction => "Transaction",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Awaits one stage, logging its row count and, when `show_progress` is set,
/// printing a `Seeding <stage> ..... done (t)` status line.
pub async fn run_stage<M, F>(stage: Stage, show_progress: bool, task: F) -> Result<Vec<M>, SeedError>
where
    F: Future<Output = Result<Vec<M>, SeedError>>,
{
    if show_progress {
        let step = stage.step().map(|n| format!("[{}/{}] ", n, Stage::ORDER.len())).unwrap_or_default();
        let base_msg = format!("{}Seeding {}", step, stage.name().bold());
        let dots = ".".repeat(STATUS_COLUMN.saturating_sub(base_msg.len()));
        print!("{}{} ", base_msg, dots);
        io::stdout().flush().ok();
    }

    let start = Instant::now();
    let outcome = task.await;
    let elapsed = start.elapsed();

    match &outcome {
        Ok(rows) => {
            log::info!("{}: created {} rows in {:.2?}", stage, rows.len(), elapsed);
            if show_progress {
                let time_str = format!("({:.2?})", elapsed).dimmed();
                println!("{} {}", "done".green(), time_str);
            }
        }
        Err(err) => {
            log::error!("{}: {}", stage, err);
            if show_progress {
                println!("{}", "failed".red());
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_stage_passes_rows_and_errors_through() {
        let rows = run_stage(Stage::Tags, false, async { Ok(vec![1, 2, 3]) })
            .await
            .unwrap();
        assert_eq!(rows, vec![1, 2, 3]);

        let err = run_stage::<(), _>(Stage::Results, false, async {
            Err(SeedError::EmptyPool { stage: Stage::Results, pool: "quizzes" })
        })
        .await
        .unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Results));
    }

    #[test]
    fn steps_follow_run_order() {
        assert_eq!(Stage::Users.step(), Some(1));
        assert_eq!(Stage::QuizTags.step(), Some(5));
        assert_eq!(Stage::Responses.step(), Some(9));
        assert_eq!(Stage::Transaction.step(), None);
    }
}
