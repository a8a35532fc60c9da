//! Configuration and logging shared by the quizforge binaries.

pub mod config;
pub mod logger;
