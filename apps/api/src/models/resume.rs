use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeMetrics {
    /// 1–100
    pub ats_match_score: i64,
    /// 1–10
    pub clarity_score: i64,
    pub grammar_issues: i64,
    pub soft_vs_hard_skill_balance: String,
    pub resume_length_feedback: String,
    pub filler_word_usage: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeReview {
    pub id: Uuid,
    pub user_id: Uuid,
    pub file_name: String,
    pub title: String,
    pub overall_score: i32,
    pub analysis_summary: String,
    pub improvement_suggestions: String,
    pub metrics: Json<ResumeMetrics>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeReviewSummary {
    pub id: Uuid,
    pub file_name: String,
    pub title: String,
    pub overall_score: i32,
    pub created_at: DateTime<Utc>,
}
