//! Question-set generation through the oracle.
//!
//! The oracle's JSON is decoded and then checked structurally before anything
//! is stored: a question set with a broken answer key must never be persisted,
//! because the exam scorer trusts the stored key.

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{generate_json, LlmError, Oracle};
use crate::models::question_set::{ExamQuestion, InterviewQuestion};
use crate::question_sets::prompts::{build_exam_prompt, build_interview_prompt};

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedExam {
    pub title: String,
    pub questions: Vec<ExamQuestion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedInterview {
    pub title: String,
    pub questions: Vec<InterviewQuestion>,
}

impl GeneratedExam {
    fn validate(&self) -> Result<(), LlmError> {
        if self.title.trim().is_empty() {
            return Err(LlmError::Malformed("exam title is empty".to_string()));
        }
        if self.questions.is_empty() {
            return Err(LlmError::Malformed("exam has no questions".to_string()));
        }
        for question in &self.questions {
            question.validate().map_err(LlmError::Malformed)?;
        }
        Ok(())
    }
}

impl GeneratedInterview {
    fn validate(&self) -> Result<(), LlmError> {
        if self.title.trim().is_empty() {
            return Err(LlmError::Malformed("interview title is empty".to_string()));
        }
        if self.questions.is_empty() {
            return Err(LlmError::Malformed("interview has no questions".to_string()));
        }
        if let Some(q) = self.questions.iter().find(|q| q.question.trim().is_empty()) {
            return Err(LlmError::Malformed(format!(
                "interview question of type '{}' has no text",
                q.category
            )));
        }
        Ok(())
    }
}

pub async fn generate_exam(
    oracle: &dyn Oracle,
    subject: &str,
    difficulty: &str,
    exam_type: &str,
) -> Result<GeneratedExam, AppError> {
    let prompt = build_exam_prompt(subject, difficulty, exam_type);
    info!("Generating {difficulty} {exam_type} exam on '{subject}'");

    let generated = generate_json::<GeneratedExam>(oracle, &prompt)
        .await
        .and_then(|exam| exam.validate().map(|_| exam))
        .map_err(|e| {
            warn!("Exam generation failed: {e}");
            AppError::Llm(format!("Exam generation failed: {e}"))
        })?;

    info!(
        "Generated exam '{}' with {} questions",
        generated.title,
        generated.questions.len()
    );
    Ok(generated)
}

pub async fn generate_interview(
    oracle: &dyn Oracle,
    job_role: &str,
    job_level: &str,
    topics: &[String],
) -> Result<GeneratedInterview, AppError> {
    let prompt = build_interview_prompt(job_role, job_level, topics);
    info!("Generating interview for {job_level} {job_role}");

    let generated = generate_json::<GeneratedInterview>(oracle, &prompt)
        .await
        .and_then(|interview| interview.validate().map(|_| interview))
        .map_err(|e| {
            warn!("Interview generation failed: {e}");
            AppError::Llm(format!("Interview generation failed: {e}"))
        })?;

    info!(
        "Generated interview '{}' with {} questions",
        generated.title,
        generated.questions.len()
    );
    Ok(generated)
}
