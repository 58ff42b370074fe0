use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdealAnswer {
    pub structure: String,
    pub key_points: Vec<String>,
    pub example: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuestionAnalysis {
    pub id: Uuid,
    pub user_id: Uuid,
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub difficulty: String,
    pub explanation: String,
    pub expected_length: String,
    pub ideal_answer: Json<IdealAnswer>,
    pub pinned: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuestionAnalysisSummary {
    pub id: Uuid,
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub difficulty: String,
    pub pinned: bool,
}
