//! Axum route handlers for resume reviews.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::auth::{ensure_owner, AuthUser};
use crate::errors::AppError;
use crate::models::resume::{ResumeReview, ResumeReviewSummary};
use crate::resumes::reviewer::{extract_pdf_text, review_resume};
use crate::state::AppState;

/// Multipart body of a review request.
#[derive(Debug, Default)]
struct ResumeUpload {
    file_name: Option<String>,
    pdf: Option<Vec<u8>>,
    job_description: Option<String>,
}

async fn read_upload(mut multipart: Multipart) -> Result<ResumeUpload, AppError> {
    let mut upload = ResumeUpload::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read resume: {e}")))?;
                upload.file_name = Some(file_name);
                upload.pdf = Some(data.to_vec());
            }
            Some("job_description") => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Could not read job description: {e}"))
                })?;
                upload.job_description = Some(text);
            }
            other => debug!("Ignoring multipart field {other:?}"),
        }
    }
    Ok(upload)
}

async fn owned_review(db: &PgPool, user_id: Uuid, id: Uuid) -> Result<ResumeReview, AppError> {
    let review: Option<ResumeReview> = sqlx::query_as("SELECT * FROM resume_reviews WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await?;
    let review = review.ok_or_else(|| AppError::NotFound(format!("Resume review {id} not found")))?;
    ensure_owner(review.user_id, user_id, "Resume review")?;
    Ok(review)
}

/// POST /api/v1/resumes
///
/// Multipart fields: `resume` (PDF file) and `job_description` (text).
pub async fn handle_create_resume_review(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ResumeReview>), AppError> {
    let upload = read_upload(multipart).await?;

    let job_description = upload
        .job_description
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Job description cannot be empty".to_string()))?;
    let (file_name, pdf) = match (upload.file_name, upload.pdf) {
        (Some(name), Some(pdf)) => (name, pdf),
        _ => return Err(AppError::Validation("A resume file is required".to_string())),
    };
    if !file_name.to_lowercase().ends_with(".pdf") {
        return Err(AppError::Validation("Resume must be a PDF file".to_string()));
    }

    let resume_text = extract_pdf_text(pdf).await?;
    let review = review_resume(
        state.oracle.as_ref(),
        user.user_id,
        &file_name,
        &resume_text,
        &job_description,
    )
    .await?;

    sqlx::query(
        r#"
        INSERT INTO resume_reviews
            (id, user_id, file_name, title, overall_score, analysis_summary,
             improvement_suggestions, metrics, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(review.id)
    .bind(review.user_id)
    .bind(&review.file_name)
    .bind(&review.title)
    .bind(review.overall_score)
    .bind(&review.analysis_summary)
    .bind(&review.improvement_suggestions)
    .bind(&review.metrics)
    .bind(review.created_at)
    .execute(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(review)))
}

/// GET /api/v1/resumes
pub async fn handle_list_resume_reviews(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ResumeReviewSummary>>, AppError> {
    let rows: Vec<ResumeReviewSummary> = sqlx::query_as(
        r#"
        SELECT id, file_name, title, overall_score, created_at
        FROM resume_reviews
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user.user_id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(rows))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeReview>, AppError> {
    Ok(Json(owned_review(&state.db, user.user_id, id).await?))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    owned_review(&state.db, user.user_id, id).await?;
    sqlx::query("DELETE FROM resume_reviews WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
