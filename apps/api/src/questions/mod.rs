// Interview question analysis: what a question evaluates and how to answer it.

pub mod analyzer;
pub mod handlers;
pub mod prompts;
