//! Axum route handlers for exam and interview attempts.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::attempts::lifecycle::AttemptLifecycle;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::attempt::{ExamAttempt, InterviewAttempt};
use crate::scoring::submission::{ExamSubmission, InterviewResponse};
use crate::state::AppState;

fn lifecycle(state: &AppState) -> AttemptLifecycle<'_> {
    AttemptLifecycle::new(
        state.sets.as_ref(),
        state.attempts.as_ref(),
        state.oracle.as_ref(),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Exam attempts
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/exams/:id/attempt
pub async fn handle_begin_exam_attempt(
    State(state): State<AppState>,
    user: AuthUser,
    Path(exam_id): Path<Uuid>,
) -> Result<(StatusCode, Json<ExamAttempt>), AppError> {
    let attempt = lifecycle(&state).begin_exam(user.user_id, exam_id).await?;
    Ok((StatusCode::CREATED, Json(attempt)))
}

/// GET /api/v1/exams/:id/attempt
pub async fn handle_get_exam_attempt(
    State(state): State<AppState>,
    user: AuthUser,
    Path(exam_id): Path<Uuid>,
) -> Result<Json<ExamAttempt>, AppError> {
    let attempt = lifecycle(&state)
        .get_exam_attempt(user.user_id, exam_id)
        .await?;
    Ok(Json(attempt))
}

/// PATCH /api/v1/exams/:id/attempt/submit
///
/// Body: `{"responses": [option index per question], "time": seconds}`.
pub async fn handle_submit_exam_attempt(
    State(state): State<AppState>,
    user: AuthUser,
    Path(exam_id): Path<Uuid>,
    Json(submission): Json<ExamSubmission>,
) -> Result<Json<ExamAttempt>, AppError> {
    let attempt = lifecycle(&state)
        .submit_exam(user.user_id, exam_id, submission)
        .await?;
    Ok(Json(attempt))
}

// ────────────────────────────────────────────────────────────────────────────
// Interview attempts
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interviews/:id/attempt
pub async fn handle_begin_interview_attempt(
    State(state): State<AppState>,
    user: AuthUser,
    Path(interview_id): Path<Uuid>,
) -> Result<(StatusCode, Json<InterviewAttempt>), AppError> {
    let attempt = lifecycle(&state)
        .begin_interview(user.user_id, interview_id)
        .await?;
    Ok((StatusCode::CREATED, Json(attempt)))
}

/// GET /api/v1/interviews/:id/attempt
pub async fn handle_get_interview_attempt(
    State(state): State<AppState>,
    user: AuthUser,
    Path(interview_id): Path<Uuid>,
) -> Result<Json<InterviewAttempt>, AppError> {
    let attempt = lifecycle(&state)
        .get_interview_attempt(user.user_id, interview_id)
        .await?;
    Ok(Json(attempt))
}

/// PATCH /api/v1/interviews/:id/attempt/feedback
///
/// Body: `[{"question": "...", "answer": "..."}]`, one entry per question.
pub async fn handle_interview_feedback(
    State(state): State<AppState>,
    user: AuthUser,
    Path(interview_id): Path<Uuid>,
    Json(responses): Json<Vec<InterviewResponse>>,
) -> Result<Json<InterviewAttempt>, AppError> {
    let attempt = lifecycle(&state)
        .submit_interview_feedback(user.user_id, interview_id, responses)
        .await?;
    Ok(Json(attempt))
}
