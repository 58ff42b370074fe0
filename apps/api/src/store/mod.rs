//! Document Store boundary for question sets, attempts and user profiles.
//!
//! The attempt lifecycle and question-set services only see these traits.
//! `PgStore` is the production backend; tests use the in-memory `MemoryStore`.
//! `AppState` carries both as `Arc<dyn ...>`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::attempt::{ExamAttempt, ExamOutcome, InterviewAttempt, InterviewOutcome};
use crate::models::question_set::{
    Exam, ExamQuestion, ExamSummary, Interview, InterviewQuestion, InterviewSummary,
    QuestionSetPatch,
};
use crate::models::user::{User, UserPatch};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

#[async_trait]
pub trait QuestionSetStore: Send + Sync {
    async fn insert_exam(&self, exam: &Exam) -> Result<(), AppError>;
    async fn find_exam(&self, id: Uuid) -> Result<Option<Exam>, AppError>;
    async fn list_exams(&self, user_id: Uuid) -> Result<Vec<ExamSummary>, AppError>;
    /// Writes only the patched flag/title fields. Returns the updated exam.
    async fn update_exam_fields(
        &self,
        id: Uuid,
        patch: &QuestionSetPatch,
    ) -> Result<Option<Exam>, AppError>;
    async fn replace_exam_questions(
        &self,
        id: Uuid,
        title: &str,
        questions: &[ExamQuestion],
    ) -> Result<Option<Exam>, AppError>;
    /// Deletes the exam and its attempts. Returns false if nothing was deleted.
    async fn delete_exam(&self, id: Uuid) -> Result<bool, AppError>;

    async fn insert_interview(&self, interview: &Interview) -> Result<(), AppError>;
    async fn find_interview(&self, id: Uuid) -> Result<Option<Interview>, AppError>;
    async fn list_interviews(&self, user_id: Uuid) -> Result<Vec<InterviewSummary>, AppError>;
    async fn update_interview_fields(
        &self,
        id: Uuid,
        patch: &QuestionSetPatch,
    ) -> Result<Option<Interview>, AppError>;
    async fn replace_interview_questions(
        &self,
        id: Uuid,
        title: &str,
        questions: &[InterviewQuestion],
    ) -> Result<Option<Interview>, AppError>;
    async fn delete_interview(&self, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait AttemptStore: Send + Sync {
    async fn find_exam_attempt(&self, exam_id: Uuid) -> Result<Option<ExamAttempt>, AppError>;
    /// Inserts unless an attempt already exists for (user, exam).
    /// Returns false when the uniqueness constraint rejected the row.
    async fn insert_exam_attempt(&self, attempt: &ExamAttempt) -> Result<bool, AppError>;
    /// Compare-and-set finalize: writes answers, score, passed and time together,
    /// only if the attempt is still in progress. `None` if nothing was updated.
    async fn finalize_exam_attempt(
        &self,
        id: Uuid,
        outcome: &ExamOutcome,
    ) -> Result<Option<ExamAttempt>, AppError>;

    async fn find_interview_attempt(
        &self,
        interview_id: Uuid,
    ) -> Result<Option<InterviewAttempt>, AppError>;
    async fn insert_interview_attempt(&self, attempt: &InterviewAttempt)
        -> Result<bool, AppError>;
    async fn finalize_interview_attempt(
        &self,
        id: Uuid,
        outcome: &InterviewOutcome,
    ) -> Result<Option<InterviewAttempt>, AppError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AppError>;
    /// Creates the profile on first write, otherwise patches it.
    async fn upsert_user_profile(&self, id: Uuid, patch: &UserPatch) -> Result<User, AppError>;
    /// Deletes the profile and everything the user owns: question sets (and
    /// their attempts), the user's own attempts, question analyses and resume
    /// reviews. Returns whether a profile row existed.
    async fn delete_user(&self, id: Uuid) -> Result<bool, AppError>;
}
