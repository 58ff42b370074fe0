pub mod attempt;
pub mod question;
pub mod question_set;
pub mod resume;
pub mod user;
