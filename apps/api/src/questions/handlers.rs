//! Axum route handlers for question analyses.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{ensure_owner, AuthUser};
use crate::errors::AppError;
use crate::models::question::{QuestionAnalysis, QuestionAnalysisSummary};
use crate::questions::analyzer::analyze_question;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct PinRequest {
    pub pinned: bool,
}

async fn owned_analysis(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> Result<QuestionAnalysis, AppError> {
    let analysis: Option<QuestionAnalysis> =
        sqlx::query_as("SELECT * FROM question_analyses WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await?;
    let analysis =
        analysis.ok_or_else(|| AppError::NotFound(format!("Question {id} not found")))?;
    ensure_owner(analysis.user_id, user_id, "Question")?;
    Ok(analysis)
}

/// POST /api/v1/questions
pub async fn handle_create_question(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<QuestionAnalysis>), AppError> {
    let analysis = analyze_question(state.oracle.as_ref(), user.user_id, &request.question).await?;

    sqlx::query(
        r#"
        INSERT INTO question_analyses
            (id, user_id, question, question_type, difficulty, explanation,
             expected_length, ideal_answer, pinned, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(analysis.id)
    .bind(analysis.user_id)
    .bind(&analysis.question)
    .bind(&analysis.question_type)
    .bind(&analysis.difficulty)
    .bind(&analysis.explanation)
    .bind(&analysis.expected_length)
    .bind(&analysis.ideal_answer)
    .bind(analysis.pinned)
    .bind(analysis.created_at)
    .execute(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(analysis)))
}

/// GET /api/v1/questions
pub async fn handle_list_questions(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<QuestionAnalysisSummary>>, AppError> {
    let rows: Vec<QuestionAnalysisSummary> = sqlx::query_as(
        r#"
        SELECT id, question, question_type, difficulty, pinned
        FROM question_analyses
        WHERE user_id = $1
        ORDER BY pinned DESC, created_at DESC
        "#,
    )
    .bind(user.user_id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(rows))
}

/// GET /api/v1/questions/:id
pub async fn handle_get_question(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<QuestionAnalysis>, AppError> {
    Ok(Json(owned_analysis(&state.db, user.user_id, id).await?))
}

/// PATCH /api/v1/questions/:id
pub async fn handle_pin_question(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<PinRequest>,
) -> Result<Json<QuestionAnalysis>, AppError> {
    owned_analysis(&state.db, user.user_id, id).await?;
    let updated: QuestionAnalysis =
        sqlx::query_as("UPDATE question_analyses SET pinned = $1 WHERE id = $2 RETURNING *")
            .bind(request.pinned)
            .bind(id)
            .fetch_one(&state.db)
            .await?;
    Ok(Json(updated))
}

/// DELETE /api/v1/questions/:id
pub async fn handle_delete_question(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    owned_analysis(&state.db, user.user_id, id).await?;
    sqlx::query("DELETE FROM question_analyses WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
