use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::Oracle;
use crate::store::{AttemptStore, QuestionSetStore, UserStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Direct pool access for question analyses and resume reviews.
    pub db: PgPool,
    /// Generative oracle. Production: `LlmClient` (Gemini).
    pub oracle: Arc<dyn Oracle>,
    pub sets: Arc<dyn QuestionSetStore>,
    pub attempts: Arc<dyn AttemptStore>,
    pub users: Arc<dyn UserStore>,
    pub config: Config,
}
