//! Question-set operations on behalf of an authenticated user.
//!
//! Every operation on an existing set loads it first and checks ownership
//! before touching the oracle or writing anything.

use chrono::Utc;
use serde::Deserialize;
use sqlx::types::Json;
use tracing::info;
use uuid::Uuid;

use crate::auth::ensure_owner;
use crate::errors::AppError;
use crate::llm_client::Oracle;
use crate::models::question_set::{
    Exam, ExamSummary, Interview, InterviewSummary, PublicExam, QuestionSetPatch,
};
use crate::question_sets::generator::{generate_exam, generate_interview};
use crate::models::attempt::AttemptState;
use crate::store::{AttemptStore, QuestionSetStore};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateExamRequest {
    pub subject: String,
    pub difficulty: String,
    #[serde(alias = "type")]
    pub exam_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInterviewRequest {
    pub job_role: String,
    pub job_level: String,
    pub topics: Vec<String>,
}

impl CreateExamRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.subject.trim().is_empty()
            || self.difficulty.trim().is_empty()
            || self.exam_type.trim().is_empty()
        {
            return Err(AppError::Validation(
                "Missing either subject, difficulty or exam type".to_string(),
            ));
        }
        Ok(())
    }
}

impl CreateInterviewRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.job_role.trim().is_empty() || self.job_level.trim().is_empty() {
            return Err(AppError::Validation(
                "Missing either job role or job level".to_string(),
            ));
        }
        if self.topics.iter().all(|t| t.trim().is_empty()) {
            return Err(AppError::Validation(
                "At least one interview topic is required".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_patch(patch: &QuestionSetPatch) -> Result<(), AppError> {
    if patch.is_empty() {
        return Err(AppError::Validation("Nothing to update".to_string()));
    }
    if matches!(&patch.title, Some(t) if t.trim().is_empty()) {
        return Err(AppError::Validation("Title cannot be empty".to_string()));
    }
    Ok(())
}

pub struct QuestionSetService<'a> {
    sets: &'a dyn QuestionSetStore,
    attempts: &'a dyn AttemptStore,
    oracle: &'a dyn Oracle,
}

impl<'a> QuestionSetService<'a> {
    pub fn new(
        sets: &'a dyn QuestionSetStore,
        attempts: &'a dyn AttemptStore,
        oracle: &'a dyn Oracle,
    ) -> Self {
        Self {
            sets,
            attempts,
            oracle,
        }
    }

    // ── Exams ───────────────────────────────────────────────────────────────

    pub async fn create_exam(
        &self,
        user_id: Uuid,
        request: CreateExamRequest,
    ) -> Result<Exam, AppError> {
        request.validate()?;
        let generated = generate_exam(
            self.oracle,
            request.subject.trim(),
            request.difficulty.trim(),
            request.exam_type.trim(),
        )
        .await?;

        let exam = Exam {
            id: Uuid::new_v4(),
            user_id,
            title: generated.title,
            subject: request.subject.trim().to_string(),
            difficulty: request.difficulty.trim().to_string(),
            exam_type: request.exam_type.trim().to_string(),
            questions: Json(generated.questions),
            taken: false,
            pinned: false,
            passed: false,
            created_at: Utc::now(),
        };
        self.sets.insert_exam(&exam).await?;
        info!("Created exam {} for user {user_id}", exam.id);
        Ok(exam)
    }

    pub async fn list_exams(&self, user_id: Uuid) -> Result<Vec<ExamSummary>, AppError> {
        self.sets.list_exams(user_id).await
    }

    pub async fn get_exam(&self, user_id: Uuid, exam_id: Uuid) -> Result<PublicExam, AppError> {
        let exam = self.owned_exam(user_id, exam_id).await?;
        Ok(PublicExam::from(&exam))
    }

    pub async fn update_exam(
        &self,
        user_id: Uuid,
        exam_id: Uuid,
        patch: QuestionSetPatch,
    ) -> Result<ExamSummary, AppError> {
        check_patch(&patch)?;
        self.owned_exam(user_id, exam_id).await?;
        let exam = self
            .sets
            .update_exam_fields(exam_id, &patch)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Exam {exam_id} not found")))?;
        Ok(ExamSummary::from(&exam))
    }

    /// Re-runs generation with the stored parameters and replaces the title
    /// and questions. Finalized attempts keep their own copy of the answers;
    /// an attempt still in progress blocks regeneration with `Conflict`.
    pub async fn regenerate_exam(
        &self,
        user_id: Uuid,
        exam_id: Uuid,
    ) -> Result<PublicExam, AppError> {
        let exam = self.owned_exam(user_id, exam_id).await?;
        let attempt_state = self
            .attempts
            .find_exam_attempt(exam_id)
            .await?
            .map(|a| a.state());
        if attempt_state == Some(AttemptState::InProgress) {
            return Err(AppError::Conflict(format!(
                "Exam {exam_id} has an attempt in progress"
            )));
        }
        let generated =
            generate_exam(self.oracle, &exam.subject, &exam.difficulty, &exam.exam_type).await?;
        let exam = self
            .sets
            .replace_exam_questions(exam_id, &generated.title, &generated.questions)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Exam {exam_id} not found")))?;
        info!("Regenerated exam {exam_id}");
        Ok(PublicExam::from(&exam))
    }

    pub async fn delete_exam(&self, user_id: Uuid, exam_id: Uuid) -> Result<(), AppError> {
        self.owned_exam(user_id, exam_id).await?;
        if !self.sets.delete_exam(exam_id).await? {
            return Err(AppError::NotFound(format!("Exam {exam_id} not found")));
        }
        info!("Deleted exam {exam_id}");
        Ok(())
    }

    async fn owned_exam(&self, user_id: Uuid, exam_id: Uuid) -> Result<Exam, AppError> {
        let exam = self
            .sets
            .find_exam(exam_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Exam {exam_id} not found")))?;
        ensure_owner(exam.user_id, user_id, "Exam")?;
        Ok(exam)
    }

    // ── Interviews ──────────────────────────────────────────────────────────

    pub async fn create_interview(
        &self,
        user_id: Uuid,
        request: CreateInterviewRequest,
    ) -> Result<Interview, AppError> {
        request.validate()?;
        let topics: Vec<String> = request
            .topics
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        let generated = generate_interview(
            self.oracle,
            request.job_role.trim(),
            request.job_level.trim(),
            &topics,
        )
        .await?;

        let interview = Interview {
            id: Uuid::new_v4(),
            user_id,
            title: generated.title,
            job_role: request.job_role.trim().to_string(),
            job_level: request.job_level.trim().to_string(),
            topics,
            questions: Json(generated.questions),
            taken: false,
            pinned: false,
            passed: false,
            created_at: Utc::now(),
        };
        self.sets.insert_interview(&interview).await?;
        info!("Created interview {} for user {user_id}", interview.id);
        Ok(interview)
    }

    pub async fn list_interviews(&self, user_id: Uuid) -> Result<Vec<InterviewSummary>, AppError> {
        self.sets.list_interviews(user_id).await
    }

    pub async fn get_interview(
        &self,
        user_id: Uuid,
        interview_id: Uuid,
    ) -> Result<Interview, AppError> {
        self.owned_interview(user_id, interview_id).await
    }

    pub async fn update_interview(
        &self,
        user_id: Uuid,
        interview_id: Uuid,
        patch: QuestionSetPatch,
    ) -> Result<InterviewSummary, AppError> {
        check_patch(&patch)?;
        self.owned_interview(user_id, interview_id).await?;
        let interview = self
            .sets
            .update_interview_fields(interview_id, &patch)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Interview {interview_id} not found")))?;
        Ok(InterviewSummary::from(&interview))
    }

    pub async fn regenerate_interview(
        &self,
        user_id: Uuid,
        interview_id: Uuid,
    ) -> Result<Interview, AppError> {
        let interview = self.owned_interview(user_id, interview_id).await?;
        let attempt_state = self
            .attempts
            .find_interview_attempt(interview_id)
            .await?
            .map(|a| a.state());
        if attempt_state == Some(AttemptState::InProgress) {
            return Err(AppError::Conflict(format!(
                "Interview {interview_id} has an attempt in progress"
            )));
        }
        let generated = generate_interview(
            self.oracle,
            &interview.job_role,
            &interview.job_level,
            &interview.topics,
        )
        .await?;
        let interview = self
            .sets
            .replace_interview_questions(interview_id, &generated.title, &generated.questions)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Interview {interview_id} not found")))?;
        info!("Regenerated interview {interview_id}");
        Ok(interview)
    }

    pub async fn delete_interview(&self, user_id: Uuid, interview_id: Uuid) -> Result<(), AppError> {
        self.owned_interview(user_id, interview_id).await?;
        if !self.sets.delete_interview(interview_id).await? {
            return Err(AppError::NotFound(format!(
                "Interview {interview_id} not found"
            )));
        }
        info!("Deleted interview {interview_id}");
        Ok(())
    }

    async fn owned_interview(
        &self,
        user_id: Uuid,
        interview_id: Uuid,
    ) -> Result<Interview, AppError> {
        let interview = self
            .sets
            .find_interview(interview_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Interview {interview_id} not found")))?;
        ensure_owner(interview.user_id, user_id, "Interview")?;
        Ok(interview)
    }
}
