//! One module per generation stage, in run order.

pub mod user;
pub mod course;
pub mod quiz;
pub mod tag;
pub mod quiz_tag;
pub mod question;
pub mod question_option;
pub mod quiz_result;
pub mod response;
