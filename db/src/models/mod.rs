pub mod course;
pub mod question;
pub mod question_option;
pub mod quiz;
pub mod quiz_result;
pub mod quiz_tag;
pub mod response;
pub mod tag;
pub mod user;

pub use course::Entity as Course;
pub use question::Entity as Question;
pub use question_option::Entity as QuestionOption;
pub use quiz::Entity as Quiz;
pub use quiz_result::Entity as QuizResult;
pub use quiz_tag::Entity as QuizTag;
pub use response::Entity as Response;
pub use tag::Entity as Tag;
pub use user::Entity as User;
