//! Knobs for a generation run.

use std::env;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::SeedError;

/// Every generated question gets exactly this many options.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// How quizzes are spread over courses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAllocation {
    /// This many quizzes for every course; no course is left without one.
    PerCourse(usize),
    /// This many quizzes in total, each on a course drawn with replacement.
    Global(usize),
}

/// How many quizzes (or questions) each user gets a result (or response) for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsetSizing {
    /// Uniform in `1..=max(1, pool / 2)`, drawn without replacement.
    UpToHalf,
    /// The whole pool.
    All,
}

/// Where a response's option is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOptions {
    /// Any option created in the run, possibly belonging to another question.
    AnyOption,
    /// Only options of the answered question.
    OwnQuestion,
}

impl FromStr for SubsetSizing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up_to_half" | "half" => Ok(SubsetSizing::UpToHalf),
            "all" => Ok(SubsetSizing::All),
            other => Err(format!("unknown subset sizing '{other}'")),
        }
    }
}

impl FromStr for ResponseOptions {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" | "any_option" => Ok(ResponseOptions::AnyOption),
            "own" | "own_question" => Ok(ResponseOptions::OwnQuestion),
            other => Err(format!("unknown response option policy '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub num_users: usize,
    pub num_courses: usize,
    pub quiz_allocation: QuizAllocation,
    pub num_tags: usize,
    /// Distinct tags linked to each quiz.
    pub tags_per_quiz: RangeInclusive<usize>,
    pub questions_per_quiz: usize,
    pub subset_sizing: SubsetSizing,
    pub response_options: ResponseOptions,
    /// Draws allowed per unique value (username, email, tag name) before giving up.
    pub max_unique_attempts: u32,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Print a status line per stage.
    pub show_progress: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            num_users: 10,
            num_courses: 5,
            quiz_allocation: QuizAllocation::PerCourse(2),
            num_tags: 5,
            tags_per_quiz: 1..=3,
            questions_per_quiz: 5,
            subset_sizing: SubsetSizing::UpToHalf,
            response_options: ResponseOptions::AnyOption,
            max_unique_attempts: 32,
            seed: None,
            show_progress: false,
        }
    }
}

impl GenerationConfig {
    pub fn options_per_question(&self) -> usize {
        OPTIONS_PER_QUESTION
    }

    /// Quizzes the run will create for `num_courses` courses.
    pub fn expected_quizzes(&self) -> usize {
        match self.quiz_allocation {
            QuizAllocation::PerCourse(k) => k * self.num_courses,
            QuizAllocation::Global(n) => n,
        }
    }

    pub fn validate(&self) -> Result<(), SeedError> {
        let (min, max) = (*self.tags_per_quiz.start(), *self.tags_per_quiz.end());
        if min == 0 {
            return Err(SeedError::Config("every quiz needs at least one tag".into()));
        }
        if min > max {
            return Err(SeedError::Config(format!("empty tags-per-quiz range {min}..={max}")));
        }
        match self.quiz_allocation {
            QuizAllocation::PerCourse(0) => {
                return Err(SeedError::Config("every course needs at least one quiz".into()));
            }
            QuizAllocation::Global(0) => {
                return Err(SeedError::Config("at least one quiz is required".into()));
            }
            _ => {}
        }
        if self.max_unique_attempts == 0 {
            return Err(SeedError::Config("max_unique_attempts must be positive".into()));
        }
        Ok(())
    }

    /// Defaults overridden by `SEED_*` environment variables (after `.env`).
    pub fn from_env() -> Result<Self, SeedError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SeedError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = parse_var(&lookup, "SEED_NUM_USERS")? {
            config.num_users = v;
        }
        if let Some(v) = parse_var(&lookup, "SEED_NUM_COURSES")? {
            config.num_courses = v;
        }
        if let Some(v) = parse_var(&lookup, "SEED_QUIZZES_PER_COURSE")? {
            config.quiz_allocation = QuizAllocation::PerCourse(v);
        }
        // a global count wins over a per-course one
        if let Some(v) = parse_var(&lookup, "SEED_NUM_QUIZZES")? {
            config.quiz_allocation = QuizAllocation::Global(v);
        }
        if let Some(v) = parse_var(&lookup, "SEED_NUM_TAGS")? {
            config.num_tags = v;
        }
        if let Some(v) = parse_var(&lookup, "SEED_QUESTIONS_PER_QUIZ")? {
            config.questions_per_quiz = v;
        }
        if let Some(v) = parse_var(&lookup, "SEED_SUBSET_SIZING")? {
            config.subset_sizing = v;
        }
        if let Some(v) = parse_var(&lookup, "SEED_RESPONSE_OPTIONS")? {
            config.response_options = v;
        }
        if let Some(v) = parse_var(&lookup, "SEED_MAX_UNIQUE_ATTEMPTS")? {
            config.max_unique_attempts = v;
        }
        config.seed = parse_var(&lookup, "SEED_RNG_SEED")?;

        config.validate()?;
        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, SeedError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| SeedError::Config(format!("{key}={raw}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = GenerationConfig::default();
        assert_eq!(config.num_users, 10);
        assert_eq!(config.num_courses, 5);
        assert_eq!(config.num_tags, 5);
        assert_eq!(config.questions_per_quiz, 5);
        assert_eq!(config.options_per_question(), 4);
        assert_eq!(config.tags_per_quiz, 1..=3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_overrides_are_applied() {
        let config = GenerationConfig::from_lookup(lookup(&[
            ("SEED_NUM_USERS", "3"),
            ("SEED_QUIZZES_PER_COURSE", "4"),
            ("SEED_SUBSET_SIZING", "all"),
            ("SEED_RESPONSE_OPTIONS", "own_question"),
            ("SEED_RNG_SEED", "99"),
        ]))
        .unwrap();

        assert_eq!(config.num_users, 3);
        assert_eq!(config.quiz_allocation, QuizAllocation::PerCourse(4));
        assert_eq!(config.expected_quizzes(), 20);
        assert_eq!(config.subset_sizing, SubsetSizing::All);
        assert_eq!(config.response_options, ResponseOptions::OwnQuestion);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn global_quiz_count_wins() {
        let config = GenerationConfig::from_lookup(lookup(&[
            ("SEED_QUIZZES_PER_COURSE", "4"),
            ("SEED_NUM_QUIZZES", "7"),
        ]))
        .unwrap();
        assert_eq!(config.quiz_allocation, QuizAllocation::Global(7));
        assert_eq!(config.expected_quizzes(), 7);
    }

    #[test]
    fn unparseable_values_are_config_errors() {
        let err = GenerationConfig::from_lookup(lookup(&[("SEED_NUM_TAGS", "many")])).unwrap_err();
        assert!(matches!(err, SeedError::Config(msg) if msg.contains("SEED_NUM_TAGS")));
    }

    #[test]
    fn zero_quizzes_are_rejected() {
        let config = GenerationConfig { quiz_allocation: QuizAllocation::PerCourse(0), ..Default::default() };
        assert!(matches!(config.validate(), Err(SeedError::Config(_))));

        let config = GenerationConfig { quiz_allocation: QuizAllocation::Global(0), ..Default::default() };
        assert!(config.validate().is_err());

        let err = GenerationConfig::from_lookup(lookup(&[("SEED_QUIZZES_PER_COURSE", "0")])).unwrap_err();
        assert!(matches!(err, SeedError::Config(_)));
    }

    #[test]
    fn tag_range_must_start_at_one_or_more() {
        let config = GenerationConfig { tags_per_quiz: 0..=3, ..Default::default() };
        assert!(config.validate().is_err());

        let config = GenerationConfig { tags_per_quiz: 3..=1, ..Default::default() };
        assert!(config.validate().is_err());
    }
}
