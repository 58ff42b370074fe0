// Exam and interview question sets: oracle generation, CRUD and regenerate.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod service;
