pub mod m202610180001_create_users;
pub mod m202610180002_create_courses;
pub mod m202610180003_create_quizzes;
pub mod m202610180004_create_tags;
pub mod m202610180005_create_quiz_tags;
pub mod m202610180006_create_questions;
pub mod m202610180007_create_options;
pub mod m202610180008_create_results;
pub mod m202610180009_create_responses;
