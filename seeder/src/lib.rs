//! Synthetic dataset generation for the quiz platform schema.
//!
//! Entities are created in dependency order (users, courses, quizzes, tags,
//! quiz/tag links, questions, options, results, responses). Each stage samples
//! only from what earlier stages returned, so no row can reference something
//! that does not exist yet.

pub mod config;
pub mod error;
pub mod generator;
pub mod sampling;
pub mod seed;
pub mod seeds;

pub use config::GenerationConfig;
pub use error::SeedError;
pub use generator::{Dataset, GenerationReport, generate, run_generation, run_generation_with_rng};
pub use seed::Stage;
