use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// A multiple-choice or true/false question with its answer key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// 0-based index into `options`.
    pub correct: i64,
    pub explanation: String,
}

impl ExamQuestion {
    /// Structural check applied to every generated question before it is stored.
    pub fn validate(&self) -> Result<(), String> {
        if self.question.trim().is_empty() {
            return Err("question text is empty".to_string());
        }
        if self.options.len() < 2 {
            return Err(format!(
                "question '{}' has {} options, expected at least 2",
                self.question,
                self.options.len()
            ));
        }
        if self.correct < 0 || self.correct as usize >= self.options.len() {
            return Err(format!(
                "question '{}' has correct index {} outside 0..{}",
                self.question,
                self.correct,
                self.options.len()
            ));
        }
        Ok(())
    }
}

/// An open-ended interview question. No answer key: scored by the oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub question: String,
    pub hint: String,
    /// Category tag such as "Behavioral" or "Technical".
    #[serde(rename = "type")]
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Exam {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub subject: String,
    pub difficulty: String,
    pub exam_type: String,
    pub questions: Json<Vec<ExamQuestion>>,
    pub taken: bool,
    pub pinned: bool,
    pub passed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Interview {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub job_role: String,
    pub job_level: String,
    pub topics: Vec<String>,
    pub questions: Json<Vec<InterviewQuestion>>,
    pub taken: bool,
    pub pinned: bool,
    pub passed: bool,
    pub created_at: DateTime<Utc>,
}

/// List projection: everything except the questions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExamSummary {
    pub id: Uuid,
    pub title: String,
    pub subject: String,
    pub difficulty: String,
    pub exam_type: String,
    pub taken: bool,
    pub pinned: bool,
    pub passed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewSummary {
    pub id: Uuid,
    pub title: String,
    pub job_role: String,
    pub job_level: String,
    pub topics: Vec<String>,
    pub taken: bool,
    pub pinned: bool,
    pub passed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Exam> for ExamSummary {
    fn from(exam: &Exam) -> Self {
        Self {
            id: exam.id,
            title: exam.title.clone(),
            subject: exam.subject.clone(),
            difficulty: exam.difficulty.clone(),
            exam_type: exam.exam_type.clone(),
            taken: exam.taken,
            pinned: exam.pinned,
            passed: exam.passed,
            created_at: exam.created_at,
        }
    }
}

impl From<&Interview> for InterviewSummary {
    fn from(interview: &Interview) -> Self {
        Self {
            id: interview.id,
            title: interview.title.clone(),
            job_role: interview.job_role.clone(),
            job_level: interview.job_level.clone(),
            topics: interview.topics.clone(),
            taken: interview.taken,
            pinned: interview.pinned,
            passed: interview.passed,
            created_at: interview.created_at,
        }
    }
}

/// Exam question as shown while the exam is being taken.
#[derive(Debug, Clone, Serialize)]
pub struct PublicExamQuestion {
    pub question: String,
    pub options: Vec<String>,
}

/// Exam with its answer key stripped.
#[derive(Debug, Clone, Serialize)]
pub struct PublicExam {
    #[serde(flatten)]
    pub summary: ExamSummary,
    pub questions: Vec<PublicExamQuestion>,
}

impl From<&Exam> for PublicExam {
    fn from(exam: &Exam) -> Self {
        Self {
            summary: ExamSummary::from(exam),
            questions: exam
                .questions
                .iter()
                .map(|q| PublicExamQuestion {
                    question: q.question.clone(),
                    options: q.options.clone(),
                })
                .collect(),
        }
    }
}

/// Partial update of a question set's mutable fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionSetPatch {
    pub title: Option<String>,
    pub taken: Option<bool>,
    pub pinned: Option<bool>,
    pub passed: Option<bool>,
}

impl QuestionSetPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.taken.is_none() && self.pinned.is_none() && self.passed.is_none()
    }
}
