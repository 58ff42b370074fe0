//! Authenticator boundary: resolves a bearer token to a user id before any
//! handler runs. Token issuance lives outside this service.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub exp: usize,
}

/// The authenticated caller. Trusted as already verified by the time a
/// handler sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// Verifies an HS256 token and extracts the user id from `sub`.
pub fn verify_token(token: &str, secret: &str) -> Result<AuthUser, AppError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| {
        debug!("Rejected bearer token: {e}");
        AppError::Unauthorized
    })?;

    let user_id = Uuid::parse_str(&data.claims.sub).map_err(|_| AppError::Unauthorized)?;
    Ok(AuthUser { user_id })
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;
        verify_token(token.trim(), &state.config.jwt_secret)
    }
}

/// Fails with `Forbidden` unless `caller` owns the resource.
pub fn ensure_owner(owner_id: Uuid, caller: Uuid, what: &str) -> Result<(), AppError> {
    if owner_id != caller {
        return Err(AppError::Forbidden(format!("{what} does not belong to you")));
    }
    Ok(())
}

#[cfg(test)]
pub fn issue_test_token(user_id: Uuid, secret: &str) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let claims = Claims {
        sub: user_id.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("token encodes")
}
