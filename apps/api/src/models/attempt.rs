use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// One scored exam answer. Question text, key and explanation are copied from
/// the exam at finalize time so the attempt stays self-contained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamAnswer {
    pub question: String,
    pub answer: i64,
    pub correct: i64,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewAnswer {
    pub question: String,
    pub user_response: String,
    pub feedback: String,
    pub score: f64,
    pub suggestion: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptState {
    InProgress,
    Finalized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ExamAttempt {
    pub id: Uuid,
    pub user_id: Uuid,
    pub exam_id: Uuid,
    pub answers: Json<Vec<ExamAnswer>>,
    pub score: f64,
    pub passed: bool,
    #[serde(rename = "time")]
    pub time_seconds: i64,
    pub created_at: DateTime<Utc>,
    pub finalized_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct InterviewAttempt {
    pub id: Uuid,
    pub user_id: Uuid,
    pub interview_id: Uuid,
    pub answers: Json<Vec<InterviewAnswer>>,
    pub score: f64,
    pub passed: bool,
    pub analysis: String,
    pub strengths: Vec<String>,
    pub areas_to_improve: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub finalized_at: Option<DateTime<Utc>>,
}

impl ExamAttempt {
    /// A fresh, empty attempt: no answers yet.
    pub fn begin(user_id: Uuid, exam_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            exam_id,
            answers: Json(Vec::new()),
            score: 0.0,
            passed: false,
            time_seconds: 0,
            created_at: Utc::now(),
            finalized_at: None,
        }
    }

    pub fn state(&self) -> AttemptState {
        state_of(self.finalized_at)
    }
}

impl InterviewAttempt {
    pub fn begin(user_id: Uuid, interview_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            interview_id,
            answers: Json(Vec::new()),
            score: 0.0,
            passed: false,
            analysis: String::new(),
            strengths: Vec::new(),
            areas_to_improve: Vec::new(),
            created_at: Utc::now(),
            finalized_at: None,
        }
    }

    pub fn state(&self) -> AttemptState {
        state_of(self.finalized_at)
    }
}

fn state_of(finalized_at: Option<DateTime<Utc>>) -> AttemptState {
    match finalized_at {
        Some(_) => AttemptState::Finalized,
        None => AttemptState::InProgress,
    }
}

/// The fields an exam attempt finalize writes, together, in one update.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamOutcome {
    pub answers: Vec<ExamAnswer>,
    pub score: f64,
    pub passed: bool,
    pub time_seconds: i64,
}

/// The fields an interview attempt finalize writes, together, in one update.
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewOutcome {
    pub answers: Vec<InterviewAnswer>,
    pub score: f64,
    pub passed: bool,
    pub analysis: String,
    pub strengths: Vec<String>,
    pub areas_to_improve: Vec<String>,
}
