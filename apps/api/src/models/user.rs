use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Same id as the token's `sub`.
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable profile fields. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub full_name: Option<String>,
    pub image_url: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.image_url.is_none()
    }
}
