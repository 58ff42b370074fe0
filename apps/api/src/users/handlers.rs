//! Axum route handlers for the caller's own profile.

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::user::{User, UserPatch};
use crate::state::AppState;

const MAX_IMAGE_URL_LEN: usize = 2048;

/// Trims the editable fields and rejects patches that would change nothing
/// or blank the display name.
fn check_user_patch(patch: UserPatch) -> Result<UserPatch, AppError> {
    if patch.is_empty() {
        return Err(AppError::Validation("Nothing to update".to_string()));
    }
    let full_name = patch.full_name.map(|n| n.trim().to_string());
    if full_name.as_deref() == Some("") {
        return Err(AppError::Validation("Name cannot be empty".to_string()));
    }
    let image_url = patch.image_url.map(|u| u.trim().to_string());
    if image_url
        .as_deref()
        .is_some_and(|u| u.len() > MAX_IMAGE_URL_LEN)
    {
        return Err(AppError::Validation("Image URL is too long".to_string()));
    }
    Ok(UserPatch {
        full_name,
        image_url,
    })
}

/// GET /api/v1/user
///
/// `NotFound` until the first profile update.
pub async fn handle_get_user(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<User>, AppError> {
    state
        .users
        .find_user(user.user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("User profile not found".to_string()))
}

/// PATCH /api/v1/user/update
pub async fn handle_update_user(
    State(state): State<AppState>,
    user: AuthUser,
    Json(patch): Json<UserPatch>,
) -> Result<Json<User>, AppError> {
    let patch = check_user_patch(patch)?;
    let profile = state
        .users
        .upsert_user_profile(user.user_id, &patch)
        .await?;
    Ok(Json(profile))
}

/// DELETE /api/v1/user/delete
///
/// Removes the caller's sets, attempts, analyses, reviews and profile.
/// Repeating it is harmless.
pub async fn handle_delete_user(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<StatusCode, AppError> {
    let had_profile = state.users.delete_user(user.user_id).await?;
    info!(user_id = %user.user_id, had_profile, "Deleted user account");
    Ok(StatusCode::NO_CONTENT)
}
