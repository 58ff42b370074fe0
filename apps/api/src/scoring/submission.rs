//! Submission Normalizer — checks raw submissions against the shape of their
//! question set before anything is scored or sent to the oracle.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::question_set::{ExamQuestion, InterviewQuestion};

/// Body of an exam submit request.
#[derive(Debug, Clone, Deserialize)]
pub struct ExamSubmission {
    /// One option index per question, in question order.
    pub responses: Vec<i64>,
    /// Elapsed time in seconds.
    pub time: i64,
}

/// One element of an interview feedback request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewResponse {
    pub question: String,
    pub answer: String,
}

/// Checks that need no question set: non-empty and a sane elapsed time.
pub fn check_exam_submission(submission: &ExamSubmission) -> Result<(), AppError> {
    if submission.responses.is_empty() {
        return Err(AppError::Validation(
            "Responses array cannot be empty".to_string(),
        ));
    }
    if submission.time < 0 {
        return Err(AppError::Validation(
            "Elapsed time cannot be negative".to_string(),
        ));
    }
    Ok(())
}

/// Aligns a submission with its exam: one response per question, each a valid
/// option index for its question.
pub fn align_exam_submission(
    submission: &ExamSubmission,
    questions: &[ExamQuestion],
) -> Result<(), AppError> {
    check_exam_submission(submission)?;
    if submission.responses.len() != questions.len() {
        return Err(AppError::Validation(format!(
            "Expected {} responses, got {}",
            questions.len(),
            submission.responses.len()
        )));
    }
    for (i, (response, question)) in submission.responses.iter().zip(questions).enumerate() {
        if *response < 0 || *response as usize >= question.options.len() {
            return Err(AppError::Validation(format!(
                "Response {} for question {} is not one of its {} options",
                response,
                i + 1,
                question.options.len()
            )));
        }
    }
    Ok(())
}

pub fn check_interview_responses(responses: &[InterviewResponse]) -> Result<(), AppError> {
    if responses.is_empty() {
        return Err(AppError::Validation(
            "Responses array cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Aligns interview responses with the interview's questions by position.
///
/// The question text is taken from the stored interview, not from the request,
/// so the finalized attempt records what was actually asked. Answers are
/// trimmed; an empty answer is kept and scored as unanswered by the oracle.
pub fn align_interview_responses(
    responses: &[InterviewResponse],
    questions: &[InterviewQuestion],
) -> Result<Vec<InterviewResponse>, AppError> {
    check_interview_responses(responses)?;
    if responses.len() != questions.len() {
        return Err(AppError::Validation(format!(
            "Expected {} responses, got {}",
            questions.len(),
            responses.len()
        )));
    }
    Ok(questions
        .iter()
        .zip(responses)
        .map(|(question, response)| InterviewResponse {
            question: question.question.clone(),
            answer: response.answer.trim().to_string(),
        })
        .collect())
}
