//! Exam Scorer — pure function from answer key + responses to a scored result.

use crate::errors::AppError;
use crate::models::attempt::ExamAnswer;
use crate::models::question_set::ExamQuestion;
use crate::scoring::PASS_PERCENTAGE;

#[derive(Debug, Clone, PartialEq)]
pub struct ExamScore {
    pub answers: Vec<ExamAnswer>,
    pub correct_count: usize,
    /// 0.0–10.0, rounded half-up to one decimal.
    pub score_out_of_10: f64,
    pub percentage: f64,
    pub passed: bool,
}

/// Scores `responses` against the exam's answer key, position by position.
///
/// Each answer copies the question text, key and explanation as they are now,
/// so later edits to the exam do not change a scored attempt.
pub fn score_exam(questions: &[ExamQuestion], responses: &[i64]) -> Result<ExamScore, AppError> {
    if responses.is_empty() {
        return Err(AppError::Validation(
            "Responses array cannot be empty".to_string(),
        ));
    }
    if responses.len() != questions.len() {
        return Err(AppError::Validation(format!(
            "Expected {} responses, got {}",
            questions.len(),
            responses.len()
        )));
    }

    let answers: Vec<ExamAnswer> = questions
        .iter()
        .zip(responses)
        .map(|(question, &answer)| ExamAnswer {
            question: question.question.clone(),
            answer,
            correct: question.correct,
            explanation: question.explanation.clone(),
        })
        .collect();

    let correct_count = answers.iter().filter(|a| a.answer == a.correct).count();
    let total = answers.len();
    let percentage = correct_count as f64 * 100.0 / total as f64;

    Ok(ExamScore {
        answers,
        correct_count,
        score_out_of_10: round_to_tenth(correct_count, total),
        percentage,
        passed: percentage >= PASS_PERCENTAGE,
    })
}

/// `correct / total * 10` rounded half-up to one decimal place.
/// Computed in tenths so exact halves are not lost to float error.
fn round_to_tenth(correct: usize, total: usize) -> f64 {
    let tenths = correct as f64 * 100.0 / total as f64;
    tenths.round() / 10.0
}
