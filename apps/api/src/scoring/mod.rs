// Attempt scoring: submission checks, the deterministic exam scorer, and the
// reconciler that merges oracle feedback into interview answers.
// Nothing here touches storage.

pub mod exam;
pub mod interview;
pub mod prompts;
pub mod submission;

/// Percentage at or above which an attempt passes.
pub const PASS_PERCENTAGE: f64 = 70.0;
