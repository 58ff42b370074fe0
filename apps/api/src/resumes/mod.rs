// Resume review against a job description.

pub mod handlers;
pub mod prompts;
pub mod reviewer;
