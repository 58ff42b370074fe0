//! Resume review: PDF text extraction, oracle analysis and range checks on
//! the returned scores.

use chrono::Utc;
use serde::Deserialize;
use sqlx::types::Json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{generate_json, Oracle};
use crate::models::resume::{ResumeMetrics, ResumeReview};
use crate::resumes::prompts::build_resume_review_prompt;

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewResponse {
    pub title: String,
    pub overall_score: i64,
    pub analysis_summary: String,
    pub improvement_suggestions: String,
    pub metrics: ResumeMetrics,
}

impl ReviewResponse {
    fn check_ranges(&self) -> Result<(), String> {
        if !(1..=100).contains(&self.overall_score) {
            return Err(format!("overall_score {} outside 1-100", self.overall_score));
        }
        if !(1..=100).contains(&self.metrics.ats_match_score) {
            return Err(format!(
                "ats_match_score {} outside 1-100",
                self.metrics.ats_match_score
            ));
        }
        if !(1..=10).contains(&self.metrics.clarity_score) {
            return Err(format!(
                "clarity_score {} outside 1-10",
                self.metrics.clarity_score
            ));
        }
        if self.metrics.grammar_issues < 0 {
            return Err("grammar_issues is negative".to_string());
        }
        Ok(())
    }
}

fn unreadable_pdf() -> AppError {
    AppError::Validation("Could not read text from the uploaded PDF".to_string())
}

/// Extracts the text layer of a PDF. CPU-bound; runs on the blocking pool.
pub async fn extract_pdf_text(bytes: Vec<u8>) -> Result<String, AppError> {
    let extracted = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
    })
    .await;
    // The parser can panic on malformed input; that is still a bad upload.
    let text = match extracted {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("PDF extraction failed: {e}");
            return Err(unreadable_pdf());
        }
        Err(e) if e.is_panic() => {
            warn!("PDF extraction panicked on upload");
            return Err(unreadable_pdf());
        }
        Err(e) => {
            return Err(AppError::Internal(anyhow::anyhow!(
                "PDF extraction task failed: {e}"
            )))
        }
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(AppError::Validation(
            "The uploaded PDF contains no extractable text".to_string(),
        ));
    }
    Ok(text)
}

/// Reviews already-extracted resume text against a job description.
pub async fn review_resume(
    oracle: &dyn Oracle,
    user_id: Uuid,
    file_name: &str,
    resume_text: &str,
    job_description: &str,
) -> Result<ResumeReview, AppError> {
    let job_description = job_description.trim();
    if job_description.is_empty() {
        return Err(AppError::Validation(
            "Job description cannot be empty".to_string(),
        ));
    }

    let prompt = build_resume_review_prompt(job_description, resume_text);
    let review: ReviewResponse = generate_json(oracle, &prompt).await.map_err(|e| {
        warn!("Resume review failed: {e}");
        AppError::Llm(format!("Resume review failed: {e}"))
    })?;
    review
        .check_ranges()
        .map_err(|e| AppError::Llm(format!("Resume review out of range: {e}")))?;

    info!(
        "Reviewed resume '{file_name}' for user {user_id}: overall {}",
        review.overall_score
    );

    Ok(ResumeReview {
        id: Uuid::new_v4(),
        user_id,
        file_name: file_name.to_string(),
        title: review.title,
        // Range-checked to 1..=100 above.
        overall_score: review.overall_score as i32,
        analysis_summary: review.analysis_summary,
        improvement_suggestions: review.improvement_suggestions,
        metrics: Json(review.metrics),
        created_at: Utc::now(),
    })
}
