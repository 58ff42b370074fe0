//! Interview Feedback Reconciler — merges the candidate's answers with the
//! oracle's per-question feedback into a scored outcome.
//!
//! Score convention: every per-question score is on a 0–100 scale, the
//! aggregate is their mean on the same scale, and the attempt passes at
//! `PASS_PERCENTAGE`. A feedback list that does not line up one-to-one with
//! the answers, or a score outside the scale, is an oracle failure.

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{generate_json, Oracle};
use crate::models::attempt::{InterviewAnswer, InterviewOutcome};
use crate::scoring::prompts::build_interview_feedback_prompt;
use crate::scoring::submission::InterviewResponse;
use crate::scoring::PASS_PERCENTAGE;

/// Upper bound of a per-question score.
pub const MAX_QUESTION_SCORE: f64 = 100.0;

/// One per-question item of the oracle's feedback.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackItem {
    pub feedback: String,
    pub score: f64,
    pub suggestion: String,
}

/// The oracle's full feedback response, decoded strictly: every field required.
#[derive(Debug, Clone, Deserialize)]
pub struct OracleFeedback {
    pub feedbacks: Vec<FeedbackItem>,
    pub analysis: String,
    pub strengths: Vec<String>,
    pub areas_to_improve: Vec<String>,
}

/// Asks the oracle for feedback on the aligned responses.
pub async fn request_feedback(
    oracle: &dyn Oracle,
    responses: &[InterviewResponse],
) -> Result<OracleFeedback, AppError> {
    let prompt = build_interview_feedback_prompt(responses);
    info!("Requesting interview feedback for {} answers", responses.len());
    generate_json::<OracleFeedback>(oracle, &prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Interview feedback generation failed: {e}")))
}

/// Zips answers with feedback by position and computes the aggregate.
pub fn reconcile(
    responses: &[InterviewResponse],
    feedback: OracleFeedback,
) -> Result<InterviewOutcome, AppError> {
    if responses.is_empty() {
        return Err(AppError::Validation(
            "Responses array cannot be empty".to_string(),
        ));
    }
    if feedback.feedbacks.len() != responses.len() {
        warn!(
            "Oracle returned {} feedback items for {} answers",
            feedback.feedbacks.len(),
            responses.len()
        );
        return Err(AppError::Llm(format!(
            "Oracle returned {} feedback items for {} answers",
            feedback.feedbacks.len(),
            responses.len()
        )));
    }

    let mut answers = Vec::with_capacity(responses.len());
    for (i, (response, item)) in responses.iter().zip(feedback.feedbacks).enumerate() {
        if !item.score.is_finite() || !(0.0..=MAX_QUESTION_SCORE).contains(&item.score) {
            return Err(AppError::Llm(format!(
                "Oracle score {} for question {} is outside 0-{}",
                item.score,
                i + 1,
                MAX_QUESTION_SCORE
            )));
        }
        answers.push(InterviewAnswer {
            question: response.question.clone(),
            user_response: response.answer.clone(),
            feedback: item.feedback,
            score: item.score,
            suggestion: item.suggestion,
        });
    }

    let average = answers.iter().map(|a| a.score).sum::<f64>() / answers.len() as f64;
    let percentage = average / MAX_QUESTION_SCORE * 100.0;

    Ok(InterviewOutcome {
        answers,
        score: average,
        passed: percentage >= PASS_PERCENTAGE,
        analysis: feedback.analysis,
        strengths: feedback.strengths,
        areas_to_improve: feedback.areas_to_improve,
    })
}
