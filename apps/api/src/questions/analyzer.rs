use chrono::Utc;
use serde::Deserialize;
use sqlx::types::Json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{generate_json, Oracle};
use crate::models::question::{IdealAnswer, QuestionAnalysis};
use crate::questions::prompts::build_question_analysis_prompt;

/// Oracle output for a single question.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResponse {
    #[serde(rename = "type")]
    pub question_type: String,
    pub difficulty: String,
    pub explanation: String,
    pub expected_length: String,
    pub ideal_answer: IdealAnswer,
}

/// Asks the oracle to analyze `question` and builds the record to store.
/// Blank questions are rejected before the oracle is called.
pub async fn analyze_question(
    oracle: &dyn Oracle,
    user_id: Uuid,
    question: &str,
) -> Result<QuestionAnalysis, AppError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AppError::Validation("Question cannot be empty".to_string()));
    }

    let prompt = build_question_analysis_prompt(question);
    let analysis: AnalysisResponse = generate_json(oracle, &prompt).await.map_err(|e| {
        warn!("Question analysis failed: {e}");
        AppError::Llm(format!("Question analysis failed: {e}"))
    })?;
    info!(
        "Analyzed question as {} / {}",
        analysis.question_type, analysis.difficulty
    );

    Ok(QuestionAnalysis {
        id: Uuid::new_v4(),
        user_id,
        question: question.to_string(),
        question_type: analysis.question_type,
        difficulty: analysis.difficulty,
        explanation: analysis.explanation,
        expected_length: analysis.expected_length,
        ideal_answer: Json(analysis.ideal_answer),
        pinned: false,
        created_at: Utc::now(),
    })
}
