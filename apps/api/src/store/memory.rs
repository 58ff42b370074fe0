//! In-memory store for tests. Counts every write so tests can assert that a
//! rejected request left storage untouched.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use super::{AttemptStore, QuestionSetStore, UserStore};
use crate::errors::AppError;
use crate::models::attempt::{ExamAttempt, ExamOutcome, InterviewAttempt, InterviewOutcome};
use crate::models::question_set::{
    Exam, ExamQuestion, ExamSummary, Interview, InterviewQuestion, InterviewSummary,
    QuestionSetPatch,
};
use crate::models::user::{User, UserPatch};

#[derive(Default)]
pub struct MemoryStore {
    exams: Mutex<HashMap<Uuid, Exam>>,
    interviews: Mutex<HashMap<Uuid, Interview>>,
    exam_attempts: Mutex<HashMap<Uuid, ExamAttempt>>,
    interview_attempts: Mutex<HashMap<Uuid, InterviewAttempt>>,
    users: Mutex<HashMap<Uuid, User>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Makes every subsequent write fail with a database error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn exam_attempt_count(&self) -> usize {
        self.exam_attempts.lock().expect("lock").len()
    }

    fn write(&self) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn apply_patch(
    patch: &QuestionSetPatch,
    title: &mut String,
    taken: &mut bool,
    pinned: &mut bool,
    passed: &mut bool,
) {
    if let Some(t) = &patch.title {
        *title = t.clone();
    }
    if let Some(v) = patch.taken {
        *taken = v;
    }
    if let Some(v) = patch.pinned {
        *pinned = v;
    }
    if let Some(v) = patch.passed {
        *passed = v;
    }
}

#[async_trait]
impl QuestionSetStore for MemoryStore {
    async fn insert_exam(&self, exam: &Exam) -> Result<(), AppError> {
        self.write()?;
        self.exams.lock().expect("lock").insert(exam.id, exam.clone());
        Ok(())
    }

    async fn find_exam(&self, id: Uuid) -> Result<Option<Exam>, AppError> {
        Ok(self.exams.lock().expect("lock").get(&id).cloned())
    }

    async fn list_exams(&self, user_id: Uuid) -> Result<Vec<ExamSummary>, AppError> {
        Ok(self
            .exams
            .lock()
            .expect("lock")
            .values()
            .filter(|e| e.user_id == user_id)
            .map(ExamSummary::from)
            .collect())
    }

    async fn update_exam_fields(
        &self,
        id: Uuid,
        patch: &QuestionSetPatch,
    ) -> Result<Option<Exam>, AppError> {
        self.write()?;
        let mut exams = self.exams.lock().expect("lock");
        Ok(exams.get_mut(&id).map(|e| {
            apply_patch(patch, &mut e.title, &mut e.taken, &mut e.pinned, &mut e.passed);
            e.clone()
        }))
    }

    async fn replace_exam_questions(
        &self,
        id: Uuid,
        title: &str,
        questions: &[ExamQuestion],
    ) -> Result<Option<Exam>, AppError> {
        self.write()?;
        let mut exams = self.exams.lock().expect("lock");
        Ok(exams.get_mut(&id).map(|e| {
            e.title = title.to_string();
            e.questions = Json(questions.to_vec());
            e.clone()
        }))
    }

    async fn delete_exam(&self, id: Uuid) -> Result<bool, AppError> {
        self.write()?;
        let removed = self.exams.lock().expect("lock").remove(&id).is_some();
        self.exam_attempts
            .lock()
            .expect("lock")
            .retain(|_, a| a.exam_id != id);
        Ok(removed)
    }

    async fn insert_interview(&self, interview: &Interview) -> Result<(), AppError> {
        self.write()?;
        self.interviews
            .lock()
            .expect("lock")
            .insert(interview.id, interview.clone());
        Ok(())
    }

    async fn find_interview(&self, id: Uuid) -> Result<Option<Interview>, AppError> {
        Ok(self.interviews.lock().expect("lock").get(&id).cloned())
    }

    async fn list_interviews(&self, user_id: Uuid) -> Result<Vec<InterviewSummary>, AppError> {
        Ok(self
            .interviews
            .lock()
            .expect("lock")
            .values()
            .filter(|i| i.user_id == user_id)
            .map(InterviewSummary::from)
            .collect())
    }

    async fn update_interview_fields(
        &self,
        id: Uuid,
        patch: &QuestionSetPatch,
    ) -> Result<Option<Interview>, AppError> {
        self.write()?;
        let mut interviews = self.interviews.lock().expect("lock");
        Ok(interviews.get_mut(&id).map(|i| {
            apply_patch(patch, &mut i.title, &mut i.taken, &mut i.pinned, &mut i.passed);
            i.clone()
        }))
    }

    async fn replace_interview_questions(
        &self,
        id: Uuid,
        title: &str,
        questions: &[InterviewQuestion],
    ) -> Result<Option<Interview>, AppError> {
        self.write()?;
        let mut interviews = self.interviews.lock().expect("lock");
        Ok(interviews.get_mut(&id).map(|i| {
            i.title = title.to_string();
            i.questions = Json(questions.to_vec());
            i.clone()
        }))
    }

    async fn delete_interview(&self, id: Uuid) -> Result<bool, AppError> {
        self.write()?;
        let removed = self.interviews.lock().expect("lock").remove(&id).is_some();
        self.interview_attempts
            .lock()
            .expect("lock")
            .retain(|_, a| a.interview_id != id);
        Ok(removed)
    }
}

#[async_trait]
impl AttemptStore for MemoryStore {
    async fn find_exam_attempt(&self, exam_id: Uuid) -> Result<Option<ExamAttempt>, AppError> {
        Ok(self
            .exam_attempts
            .lock()
            .expect("lock")
            .values()
            .find(|a| a.exam_id == exam_id)
            .cloned())
    }

    async fn insert_exam_attempt(&self, attempt: &ExamAttempt) -> Result<bool, AppError> {
        self.write()?;
        let mut attempts = self.exam_attempts.lock().expect("lock");
        if attempts
            .values()
            .any(|a| a.user_id == attempt.user_id && a.exam_id == attempt.exam_id)
        {
            return Ok(false);
        }
        attempts.insert(attempt.id, attempt.clone());
        Ok(true)
    }

    async fn finalize_exam_attempt(
        &self,
        id: Uuid,
        outcome: &ExamOutcome,
    ) -> Result<Option<ExamAttempt>, AppError> {
        self.write()?;
        let mut attempts = self.exam_attempts.lock().expect("lock");
        Ok(attempts
            .get_mut(&id)
            .filter(|a| a.finalized_at.is_none())
            .map(|a| {
                a.answers = Json(outcome.answers.clone());
                a.score = outcome.score;
                a.passed = outcome.passed;
                a.time_seconds = outcome.time_seconds;
                a.finalized_at = Some(Utc::now());
                a.clone()
            }))
    }

    async fn find_interview_attempt(
        &self,
        interview_id: Uuid,
    ) -> Result<Option<InterviewAttempt>, AppError> {
        Ok(self
            .interview_attempts
            .lock()
            .expect("lock")
            .values()
            .find(|a| a.interview_id == interview_id)
            .cloned())
    }

    async fn insert_interview_attempt(
        &self,
        attempt: &InterviewAttempt,
    ) -> Result<bool, AppError> {
        self.write()?;
        let mut attempts = self.interview_attempts.lock().expect("lock");
        if attempts
            .values()
            .any(|a| a.user_id == attempt.user_id && a.interview_id == attempt.interview_id)
        {
            return Ok(false);
        }
        attempts.insert(attempt.id, attempt.clone());
        Ok(true)
    }

    async fn finalize_interview_attempt(
        &self,
        id: Uuid,
        outcome: &InterviewOutcome,
    ) -> Result<Option<InterviewAttempt>, AppError> {
        self.write()?;
        let mut attempts = self.interview_attempts.lock().expect("lock");
        Ok(attempts
            .get_mut(&id)
            .filter(|a| a.finalized_at.is_none())
            .map(|a| {
                a.answers = Json(outcome.answers.clone());
                a.score = outcome.score;
                a.passed = outcome.passed;
                a.analysis = outcome.analysis.clone();
                a.strengths = outcome.strengths.clone();
                a.areas_to_improve = outcome.areas_to_improve.clone();
                a.finalized_at = Some(Utc::now());
                a.clone()
            }))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().expect("lock").get(&id).cloned())
    }

    async fn upsert_user_profile(&self, id: Uuid, patch: &UserPatch) -> Result<User, AppError> {
        self.write()?;
        let now = Utc::now();
        let mut users = self.users.lock().expect("lock");
        let user = users.entry(id).or_insert_with(|| User {
            id,
            email: None,
            full_name: String::new(),
            image_url: String::new(),
            created_at: now,
            updated_at: now,
        });
        if let Some(name) = &patch.full_name {
            user.full_name = name.clone();
        }
        if let Some(url) = &patch.image_url {
            user.image_url = url.clone();
        }
        user.updated_at = now;
        Ok(user.clone())
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, AppError> {
        self.write()?;
        let mut exams = self.exams.lock().expect("lock");
        let mut interviews = self.interviews.lock().expect("lock");
        let exam_ids: Vec<Uuid> = exams
            .values()
            .filter(|e| e.user_id == id)
            .map(|e| e.id)
            .collect();
        let interview_ids: Vec<Uuid> = interviews
            .values()
            .filter(|i| i.user_id == id)
            .map(|i| i.id)
            .collect();
        exams.retain(|_, e| e.user_id != id);
        interviews.retain(|_, i| i.user_id != id);
        self.exam_attempts
            .lock()
            .expect("lock")
            .retain(|_, a| a.user_id != id && !exam_ids.contains(&a.exam_id));
        self.interview_attempts
            .lock()
            .expect("lock")
            .retain(|_, a| a.user_id != id && !interview_ids.contains(&a.interview_id));
        Ok(self.users.lock().expect("lock").remove(&id).is_some())
    }
}
