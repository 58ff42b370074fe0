// Attempt lifecycle: begin → (in progress) → finalize, one attempt per
// (user, question set). Scoring lives in `crate::scoring`.

pub mod handlers;
pub mod lifecycle;
