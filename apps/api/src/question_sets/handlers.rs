//! Axum route handlers for exams and interviews.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::question_set::{
    Exam, ExamSummary, Interview, InterviewSummary, PublicExam, QuestionSetPatch,
};
use crate::question_sets::service::{CreateExamRequest, CreateInterviewRequest, QuestionSetService};
use crate::state::AppState;

fn service(state: &AppState) -> QuestionSetService<'_> {
    QuestionSetService::new(
        state.sets.as_ref(),
        state.attempts.as_ref(),
        state.oracle.as_ref(),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Exams
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/exams
pub async fn handle_list_exams(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ExamSummary>>, AppError> {
    Ok(Json(service(&state).list_exams(user.user_id).await?))
}

/// GET /api/v1/exams/:id
///
/// The answer key is not part of the response.
pub async fn handle_get_exam(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PublicExam>, AppError> {
    Ok(Json(service(&state).get_exam(user.user_id, id).await?))
}

/// POST /api/v1/exams
pub async fn handle_create_exam(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateExamRequest>,
) -> Result<(StatusCode, Json<PublicExam>), AppError> {
    let exam: Exam = service(&state).create_exam(user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(PublicExam::from(&exam))))
}

/// PATCH /api/v1/exams/:id
pub async fn handle_update_exam(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<QuestionSetPatch>,
) -> Result<Json<ExamSummary>, AppError> {
    Ok(Json(
        service(&state).update_exam(user.user_id, id, patch).await?,
    ))
}

/// PATCH /api/v1/exams/:id/regenerate
pub async fn handle_regenerate_exam(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PublicExam>, AppError> {
    Ok(Json(service(&state).regenerate_exam(user.user_id, id).await?))
}

/// DELETE /api/v1/exams/:id
pub async fn handle_delete_exam(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    service(&state).delete_exam(user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Interviews
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/interviews
pub async fn handle_list_interviews(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<InterviewSummary>>, AppError> {
    Ok(Json(service(&state).list_interviews(user.user_id).await?))
}

/// GET /api/v1/interviews/:id
pub async fn handle_get_interview(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Interview>, AppError> {
    Ok(Json(service(&state).get_interview(user.user_id, id).await?))
}

/// POST /api/v1/interviews
pub async fn handle_create_interview(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateInterviewRequest>,
) -> Result<(StatusCode, Json<Interview>), AppError> {
    let interview = service(&state)
        .create_interview(user.user_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(interview)))
}

/// PATCH /api/v1/interviews/:id
pub async fn handle_update_interview(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<QuestionSetPatch>,
) -> Result<Json<InterviewSummary>, AppError> {
    Ok(Json(
        service(&state)
            .update_interview(user.user_id, id, patch)
            .await?,
    ))
}

/// PATCH /api/v1/interviews/:id/regenerate
pub async fn handle_regenerate_interview(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Interview>, AppError> {
    Ok(Json(
        service(&state)
            .regenerate_interview(user.user_id, id)
            .await?,
    ))
}

/// DELETE /api/v1/interviews/:id
pub async fn handle_delete_interview(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    service(&state).delete_interview(user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
