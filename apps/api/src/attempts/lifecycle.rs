//! Attempt Lifecycle Manager.
//!
//! States per (user, question set): not started → in progress (row exists,
//! no answers) → finalized (answers, score and passed written together).
//!
//! Every entry point checks ownership of the question set and the attempt
//! before scoring or calling the oracle. Finalize is a compare-and-set on the
//! store, so a second submit fails with `Conflict` instead of re-scoring.

use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::ensure_owner;
use crate::errors::AppError;
use crate::llm_client::Oracle;
use crate::models::attempt::{
    AttemptState, ExamAttempt, ExamOutcome, InterviewAttempt, InterviewOutcome,
};
use crate::models::question_set::{Exam, Interview};
use crate::scoring::exam::score_exam;
use crate::scoring::interview::{reconcile, request_feedback};
use crate::scoring::submission::{
    align_exam_submission, align_interview_responses, check_exam_submission,
    check_interview_responses, ExamSubmission, InterviewResponse,
};
use crate::store::{AttemptStore, QuestionSetStore};

pub struct AttemptLifecycle<'a> {
    sets: &'a dyn QuestionSetStore,
    attempts: &'a dyn AttemptStore,
    oracle: &'a dyn Oracle,
}

impl<'a> AttemptLifecycle<'a> {
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

    /// Starts the caller's attempt on an exam they own.
    ///
    /// A foreign exam is `Forbidden`, like every other ownership mismatch;
    /// `Conflict` only means an attempt already exists.
    pub async fn begin_exam(&self, user_id: Uuid, exam_id: Uuid) -> Result<ExamAttempt, AppError> {
        self.owned_exam(user_id, exam_id).await?;

        if self.attempts.find_exam_attempt(exam_id).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "An attempt for exam {exam_id} already exists"
            )));
        }

        let attempt = ExamAttempt::begin(user_id, exam_id);
        if !self.attempts.insert_exam_attempt(&attempt).await? {
            warn!("Concurrent begin lost the race for exam {exam_id}, user {user_id}");
            return Err(AppError::Conflict(format!(
                "An attempt for exam {exam_id} already exists"
            )));
        }

        info!("Began exam attempt {} for user {user_id}", attempt.id);
        Ok(attempt)
    }

    pub async fn get_exam_attempt(
        &self,
        user_id: Uuid,
        exam_id: Uuid,
    ) -> Result<ExamAttempt, AppError> {
        let attempt = self
            .attempts
            .find_exam_attempt(exam_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No attempt found for exam {exam_id}")))?;
        ensure_owner(attempt.user_id, user_id, "Exam attempt")?;
        Ok(attempt)
    }

    pub async fn submit_exam(
        &self,
        user_id: Uuid,
        exam_id: Uuid,
        submission: ExamSubmission,
    ) -> Result<ExamAttempt, AppError> {
        check_exam_submission(&submission)?;

        let exam = self.owned_exam(user_id, exam_id).await?;
        let attempt = self.get_exam_attempt(user_id, exam_id).await?;
        if attempt.state() == AttemptState::Finalized {
            return Err(AppError::Conflict(format!(
                "Exam attempt {} has already been submitted",
                attempt.id
            )));
        }

        align_exam_submission(&submission, &exam.questions)?;
        let score = score_exam(&exam.questions, &submission.responses)?;

        let outcome = ExamOutcome {
            answers: score.answers,
            score: score.score_out_of_10,
            passed: score.passed,
            time_seconds: submission.time,
        };
        let finalized = self
            .attempts
            .finalize_exam_attempt(attempt.id, &outcome)
            .await?
            .ok_or_else(|| {
                AppError::Conflict(format!(
                    "Exam attempt {} has already been submitted",
                    attempt.id
                ))
            })?;

        info!(
            "Finalized exam attempt {}: {}/{} correct ({:.0}%), score {}, passed={}",
            finalized.id,
            score.correct_count,
            exam.questions.len(),
            score.percentage,
            finalized.score,
            finalized.passed
        );
        Ok(finalized)
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

    /// Interview counterpart of `begin_exam`: foreign interview is
    /// `Forbidden`, an existing attempt is `Conflict`.
    pub async fn begin_interview(
        &self,
        user_id: Uuid,
        interview_id: Uuid,
    ) -> Result<InterviewAttempt, AppError> {
        self.owned_interview(user_id, interview_id).await?;

        if self
            .attempts
            .find_interview_attempt(interview_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "An attempt for interview {interview_id} already exists"
            )));
        }

        let attempt = InterviewAttempt::begin(user_id, interview_id);
        if !self.attempts.insert_interview_attempt(&attempt).await? {
            warn!("Concurrent begin lost the race for interview {interview_id}, user {user_id}");
            return Err(AppError::Conflict(format!(
                "An attempt for interview {interview_id} already exists"
            )));
        }

        info!("Began interview attempt {} for user {user_id}", attempt.id);
        Ok(attempt)
    }

    pub async fn get_interview_attempt(
        &self,
        user_id: Uuid,
        interview_id: Uuid,
    ) -> Result<InterviewAttempt, AppError> {
        let attempt = self
            .attempts
            .find_interview_attempt(interview_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No attempt found for interview {interview_id}"))
            })?;
        ensure_owner(attempt.user_id, user_id, "Interview attempt")?;
        Ok(attempt)
    }

    /// Validates, asks the oracle for feedback, reconciles and finalizes.
    /// The oracle is only called once every local check has passed.
    pub async fn submit_interview_feedback(
        &self,
        user_id: Uuid,
        interview_id: Uuid,
        responses: Vec<InterviewResponse>,
    ) -> Result<InterviewAttempt, AppError> {
        check_interview_responses(&responses)?;

        let interview = self.owned_interview(user_id, interview_id).await?;
        let attempt = self.get_interview_attempt(user_id, interview_id).await?;
        if attempt.state() == AttemptState::Finalized {
            return Err(AppError::Conflict(format!(
                "Interview attempt {} already has feedback",
                attempt.id
            )));
        }

        let aligned = align_interview_responses(&responses, &interview.questions)?;
        let feedback = request_feedback(self.oracle, &aligned).await?;
        let outcome: InterviewOutcome = reconcile(&aligned, feedback)?;

        let finalized = self
            .attempts
            .finalize_interview_attempt(attempt.id, &outcome)
            .await?
            .ok_or_else(|| {
                AppError::Conflict(format!(
                    "Interview attempt {} already has feedback",
                    attempt.id
                ))
            })?;

        info!(
            "Finalized interview attempt {}: average {:.1}, passed={}",
            finalized.id, finalized.score, finalized.passed
        );
        Ok(finalized)
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

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sqlx::types::Json;

    use super::*;
    use crate::llm_client::mock::MockOracle;
    use crate::models::question_set::{ExamQuestion, InterviewQuestion, QuestionSetPatch};
    use crate::store::memory::MemoryStore;

    fn exam_for(user_id: Uuid, keys: &[i64]) -> Exam {
        Exam {
            id: Uuid::new_v4(),
            user_id,
            title: "Rust fundamentals".to_string(),
            subject: "rust".to_string(),
            difficulty: "easy".to_string(),
            exam_type: "multiple choice".to_string(),
            questions: Json(
                keys.iter()
                    .enumerate()
                    .map(|(i, &correct)| ExamQuestion {
                        question: format!("Question {i}"),
                        options: (0..4).map(|o| format!("opt {o}")).collect(),
                        correct,
                        explanation: format!("Explanation {i}"),
                    })
                    .collect(),
            ),
            taken: false,
            pinned: false,
            passed: false,
            created_at: Utc::now(),
        }
    }

    fn interview_for(user_id: Uuid, n: usize) -> Interview {
        Interview {
            id: Uuid::new_v4(),
            user_id,
            title: "Backend engineer".to_string(),
            job_role: "Backend engineer".to_string(),
            job_level: "Senior".to_string(),
            topics: vec!["rust".to_string()],
            questions: Json(
                (0..n)
                    .map(|i| InterviewQuestion {
                        question: format!("Interview question {i}"),
                        hint: "Think aloud".to_string(),
                        category: "Technical".to_string(),
                    })
                    .collect(),
            ),
            taken: false,
            pinned: false,
            passed: false,
            created_at: Utc::now(),
        }
    }

    fn responses(n: usize) -> Vec<InterviewResponse> {
        (0..n)
            .map(|i| InterviewResponse {
                question: format!("Interview question {i}"),
                answer: format!("My answer {i}"),
            })
            .collect()
    }

    const FEEDBACK_80_60_70: &str = r#"{
        "feedbacks": [
            {"feedback": "Strong.", "score": 80, "suggestion": "Quantify impact."},
            {"feedback": "Thin.", "score": 60, "suggestion": "Go deeper."},
            {"feedback": "Fine.", "score": 70, "suggestion": "Add an example."}
        ],
        "analysis": "Communicates clearly with some gaps.",
        "strengths": ["Clarity"],
        "areas_to_improve": ["Depth"]
    }"#;

    #[tokio::test]
    async fn test_exam_begin_submit_get() {
        let store = MemoryStore::new();
        let oracle = MockOracle::new();
        let user = Uuid::new_v4();
        let exam = exam_for(user, &[0, 1, 2]);
        store.insert_exam(&exam).await.unwrap();
        let lifecycle = AttemptLifecycle::new(&store, &store, &oracle);

        let begun = lifecycle.begin_exam(user, exam.id).await.unwrap();
        assert_eq!(begun.state(), AttemptState::InProgress);
        assert!(begun.answers.is_empty());

        let submission = ExamSubmission {
            responses: vec![0, 1, 3],
            time: 120,
        };
        let finalized = lifecycle.submit_exam(user, exam.id, submission).await.unwrap();
        assert_eq!(finalized.id, begun.id);
        assert_eq!(finalized.state(), AttemptState::Finalized);
        assert_eq!(finalized.score, 6.7);
        assert!(!finalized.passed);
        assert_eq!(finalized.time_seconds, 120);
        assert_eq!(finalized.answers.len(), 3);
        assert_eq!(finalized.user_id, user);
        assert_eq!(finalized.exam_id, exam.id);

        let fetched = lifecycle.get_exam_attempt(user, exam.id).await.unwrap();
        assert_eq!(fetched, finalized);
        assert_eq!(oracle.calls(), 0);
    }

    #[tokio::test]
    async fn test_repeated_reads_are_identical() {
        let store = MemoryStore::new();
        let oracle = MockOracle::new();
        let user = Uuid::new_v4();
        let exam = exam_for(user, &[0]);
        store.insert_exam(&exam).await.unwrap();
        let lifecycle = AttemptLifecycle::new(&store, &store, &oracle);
        lifecycle.begin_exam(user, exam.id).await.unwrap();

        let first = lifecycle.get_exam_attempt(user, exam.id).await.unwrap();
        let second = lifecycle.get_exam_attempt(user, exam.id).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_second_begin_conflicts() {
        let store = MemoryStore::new();
        let oracle = MockOracle::new();
        let user = Uuid::new_v4();
        let exam = exam_for(user, &[0]);
        store.insert_exam(&exam).await.unwrap();
        let lifecycle = AttemptLifecycle::new(&store, &store, &oracle);

        lifecycle.begin_exam(user, exam.id).await.unwrap();
        let err = lifecycle.begin_exam(user, exam.id).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.exam_attempt_count(), 1);
    }

    #[tokio::test]
    async fn test_begin_on_foreign_exam_is_forbidden() {
        let store = MemoryStore::new();
        let oracle = MockOracle::new();
        let exam = exam_for(Uuid::new_v4(), &[0]);
        store.insert_exam(&exam).await.unwrap();
        let writes_before = store.writes();
        let lifecycle = AttemptLifecycle::new(&store, &store, &oracle);

        let err = lifecycle.begin_exam(Uuid::new_v4(), exam.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(store.writes(), writes_before);
    }

    #[tokio::test]
    async fn test_begin_on_missing_exam_is_not_found() {
        let store = MemoryStore::new();
        let oracle = MockOracle::new();
        let lifecycle = AttemptLifecycle::new(&store, &store, &oracle);
        let err = lifecycle
            .begin_exam(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_submit_without_begin_is_not_found() {
        let store = MemoryStore::new();
        let oracle = MockOracle::new();
        let user = Uuid::new_v4();
        let exam = exam_for(user, &[0]);
        store.insert_exam(&exam).await.unwrap();
        let lifecycle = AttemptLifecycle::new(&store, &store, &oracle);

        let submission = ExamSubmission {
            responses: vec![0],
            time: 1,
        };
        let err = lifecycle.submit_exam(user, exam.id, submission).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_resubmit_conflicts_and_keeps_first_result() {
        let store = MemoryStore::new();
        let oracle = MockOracle::new();
        let user = Uuid::new_v4();
        let exam = exam_for(user, &[0, 0]);
        store.insert_exam(&exam).await.unwrap();
        let lifecycle = AttemptLifecycle::new(&store, &store, &oracle);
        lifecycle.begin_exam(user, exam.id).await.unwrap();

        let first = lifecycle
            .submit_exam(
                user,
                exam.id,
                ExamSubmission {
                    responses: vec![0, 0],
                    time: 10,
                },
            )
            .await
            .unwrap();
        let err = lifecycle
            .submit_exam(
                user,
                exam.id,
                ExamSubmission {
                    responses: vec![1, 1],
                    time: 20,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let stored = lifecycle.get_exam_attempt(user, exam.id).await.unwrap();
        assert_eq!(stored, first);
        assert_eq!(stored.score, 10.0);
    }

    #[tokio::test]
    async fn test_submission_length_mismatch_writes_nothing() {
        let store = MemoryStore::new();
        let oracle = MockOracle::new();
        let user = Uuid::new_v4();
        let exam = exam_for(user, &[0, 0, 0]);
        store.insert_exam(&exam).await.unwrap();
        let lifecycle = AttemptLifecycle::new(&store, &store, &oracle);
        lifecycle.begin_exam(user, exam.id).await.unwrap();
        let writes_before = store.writes();

        let err = lifecycle
            .submit_exam(
                user,
                exam.id,
                ExamSubmission {
                    responses: vec![0, 0],
                    time: 10,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.writes(), writes_before);
        let attempt = lifecycle.get_exam_attempt(user, exam.id).await.unwrap();
        assert_eq!(attempt.state(), AttemptState::InProgress);
    }

    #[tokio::test]
    async fn test_empty_submission_rejected_before_lookup() {
        let store = MemoryStore::new();
        let oracle = MockOracle::new();
        let lifecycle = AttemptLifecycle::new(&store, &store, &oracle);
        let err = lifecycle
            .submit_exam(
                Uuid::new_v4(),
                Uuid::new_v4(),
                ExamSubmission {
                    responses: vec![],
                    time: 0,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_storage_failure_leaves_attempt_in_progress() {
        let store = MemoryStore::new();
        let oracle = MockOracle::new();
        let user = Uuid::new_v4();
        let exam = exam_for(user, &[0]);
        store.insert_exam(&exam).await.unwrap();
        let lifecycle = AttemptLifecycle::new(&store, &store, &oracle);
        lifecycle.begin_exam(user, exam.id).await.unwrap();

        store.fail_writes(true);
        let err = lifecycle
            .submit_exam(
                user,
                exam.id,
                ExamSubmission {
                    responses: vec![0],
                    time: 3,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Database(_)));

        store.fail_writes(false);
        let attempt = lifecycle.get_exam_attempt(user, exam.id).await.unwrap();
        assert_eq!(attempt.state(), AttemptState::InProgress);
        assert!(attempt.answers.is_empty());
    }

    #[tokio::test]
    async fn test_answers_survive_later_exam_edits() {
        let store = MemoryStore::new();
        let oracle = MockOracle::new();
        let user = Uuid::new_v4();
        let exam = exam_for(user, &[2, 1]);
        store.insert_exam(&exam).await.unwrap();
        let lifecycle = AttemptLifecycle::new(&store, &store, &oracle);
        lifecycle.begin_exam(user, exam.id).await.unwrap();
        lifecycle
            .submit_exam(
                user,
                exam.id,
                ExamSubmission {
                    responses: vec![2, 0],
                    time: 30,
                },
            )
            .await
            .unwrap();

        let replacement = vec![ExamQuestion {
            question: "Rewritten".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
            correct: 0,
            explanation: "New explanation".to_string(),
        }];
        store
            .replace_exam_questions(exam.id, "Regenerated", &replacement)
            .await
            .unwrap();
        store
            .update_exam_fields(
                exam.id,
                &QuestionSetPatch {
                    title: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let attempt = lifecycle.get_exam_attempt(user, exam.id).await.unwrap();
        assert_eq!(attempt.answers[0].question, "Question 0");
        assert_eq!(attempt.answers[0].correct, 2);
        assert_eq!(attempt.answers[0].explanation, "Explanation 0");
        assert_eq!(attempt.answers[1].correct, 1);
        assert_eq!(attempt.answers[1].explanation, "Explanation 1");
    }

    #[tokio::test]
    async fn test_interview_feedback_finalizes() {
        let store = MemoryStore::new();
        let oracle = MockOracle::new().respond(FEEDBACK_80_60_70);
        let user = Uuid::new_v4();
        let interview = interview_for(user, 3);
        store.insert_interview(&interview).await.unwrap();
        let lifecycle = AttemptLifecycle::new(&store, &store, &oracle);
        lifecycle.begin_interview(user, interview.id).await.unwrap();

        let attempt = lifecycle
            .submit_interview_feedback(user, interview.id, responses(3))
            .await
            .unwrap();
        assert_eq!(attempt.score, 70.0);
        assert!(attempt.passed);
        assert_eq!(attempt.answers.len(), 3);
        assert_eq!(attempt.answers[1].feedback, "Thin.");
        assert_eq!(attempt.answers[1].user_response, "My answer 1");
        assert_eq!(attempt.analysis, "Communicates clearly with some gaps.");
        assert_eq!(attempt.state(), AttemptState::Finalized);
        assert_eq!(oracle.calls(), 1);
    }

    #[tokio::test]
    async fn test_foreign_interview_feedback_is_forbidden_without_side_effects() {
        let store = MemoryStore::new();
        let oracle = MockOracle::new().respond(FEEDBACK_80_60_70);
        let owner = Uuid::new_v4();
        let interview = interview_for(owner, 3);
        store.insert_interview(&interview).await.unwrap();
        let lifecycle = AttemptLifecycle::new(&store, &store, &oracle);
        lifecycle.begin_interview(owner, interview.id).await.unwrap();
        let writes_before = store.writes();

        let intruder = Uuid::new_v4();
        let err = lifecycle
            .submit_interview_feedback(intruder, interview.id, responses(3))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(oracle.calls(), 0);
        assert_eq!(store.writes(), writes_before);
    }

    #[tokio::test]
    async fn test_foreign_exam_submit_is_forbidden_without_side_effects() {
        let store = MemoryStore::new();
        let oracle = MockOracle::new();
        let owner = Uuid::new_v4();
        let exam = exam_for(owner, &[0]);
        store.insert_exam(&exam).await.unwrap();
        let lifecycle = AttemptLifecycle::new(&store, &store, &oracle);
        lifecycle.begin_exam(owner, exam.id).await.unwrap();
        let writes_before = store.writes();

        let err = lifecycle
            .submit_exam(
                Uuid::new_v4(),
                exam.id,
                ExamSubmission {
                    responses: vec![0],
                    time: 5,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(store.writes(), writes_before);
        assert_eq!(oracle.calls(), 0);
    }

    #[tokio::test]
    async fn test_foreign_attempt_read_is_forbidden() {
        let store = MemoryStore::new();
        let oracle = MockOracle::new();
        let owner = Uuid::new_v4();
        let interview = interview_for(owner, 1);
        store.insert_interview(&interview).await.unwrap();
        let lifecycle = AttemptLifecycle::new(&store, &store, &oracle);
        lifecycle.begin_interview(owner, interview.id).await.unwrap();

        let err = lifecycle
            .get_interview_attempt(Uuid::new_v4(), interview.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_interview_count_mismatch_skips_oracle() {
        let store = MemoryStore::new();
        let oracle = MockOracle::new().respond(FEEDBACK_80_60_70);
        let user = Uuid::new_v4();
        let interview = interview_for(user, 3);
        store.insert_interview(&interview).await.unwrap();
        let lifecycle = AttemptLifecycle::new(&store, &store, &oracle);
        lifecycle.begin_interview(user, interview.id).await.unwrap();

        let err = lifecycle
            .submit_interview_feedback(user, interview.id, responses(2))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(oracle.calls(), 0);
    }

    #[tokio::test]
    async fn test_oracle_failure_surfaces_and_leaves_attempt_unscored() {
        let store = MemoryStore::new();
        let oracle = MockOracle::new().fail("quota exceeded");
        let user = Uuid::new_v4();
        let interview = interview_for(user, 2);
        store.insert_interview(&interview).await.unwrap();
        let lifecycle = AttemptLifecycle::new(&store, &store, &oracle);
        lifecycle.begin_interview(user, interview.id).await.unwrap();
        let writes_before = store.writes();

        let err = lifecycle
            .submit_interview_feedback(user, interview.id, responses(2))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
        assert_eq!(store.writes(), writes_before);

        let attempt = lifecycle
            .get_interview_attempt(user, interview.id)
            .await
            .unwrap();
        assert_eq!(attempt.state(), AttemptState::InProgress);
        assert_eq!(attempt.score, 0.0);
        assert!(!attempt.passed);
    }

    #[tokio::test]
    async fn test_misaligned_oracle_feedback_is_rejected() {
        let store = MemoryStore::new();
        // Three feedback items for a two-question interview.
        let oracle = MockOracle::new().respond(FEEDBACK_80_60_70);
        let user = Uuid::new_v4();
        let interview = interview_for(user, 2);
        store.insert_interview(&interview).await.unwrap();
        let lifecycle = AttemptLifecycle::new(&store, &store, &oracle);
        lifecycle.begin_interview(user, interview.id).await.unwrap();

        let err = lifecycle
            .submit_interview_feedback(user, interview.id, responses(2))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[tokio::test]
    async fn test_second_feedback_request_conflicts_before_oracle_call() {
        let store = MemoryStore::new();
        let oracle = MockOracle::new()
            .respond(FEEDBACK_80_60_70)
            .respond(FEEDBACK_80_60_70);
        let user = Uuid::new_v4();
        let interview = interview_for(user, 3);
        store.insert_interview(&interview).await.unwrap();
        let lifecycle = AttemptLifecycle::new(&store, &store, &oracle);
        lifecycle.begin_interview(user, interview.id).await.unwrap();
        lifecycle
            .submit_interview_feedback(user, interview.id, responses(3))
            .await
            .unwrap();

        let err = lifecycle
            .submit_interview_feedback(user, interview.id, responses(3))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(oracle.calls(), 1);
    }
}
