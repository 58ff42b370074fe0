use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::{AttemptStore, QuestionSetStore, UserStore};
use crate::errors::AppError;
use crate::models::attempt::{ExamAttempt, ExamOutcome, InterviewAttempt, InterviewOutcome};
use crate::models::question_set::{
    Exam, ExamQuestion, ExamSummary, Interview, InterviewQuestion, InterviewSummary,
    QuestionSetPatch,
};
use crate::models::user::{User, UserPatch};

/// Postgres-backed store. Questions and answers live in JSONB columns.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionSetStore for PgStore {
    async fn insert_exam(&self, exam: &Exam) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO exams
                (id, user_id, title, subject, difficulty, exam_type, questions,
                 taken, pinned, passed, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(exam.id)
        .bind(exam.user_id)
        .bind(&exam.title)
        .bind(&exam.subject)
        .bind(&exam.difficulty)
        .bind(&exam.exam_type)
        .bind(&exam.questions)
        .bind(exam.taken)
        .bind(exam.pinned)
        .bind(exam.passed)
        .bind(exam.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_exam(&self, id: Uuid) -> Result<Option<Exam>, AppError> {
        Ok(
            sqlx::query_as::<_, Exam>("SELECT * FROM exams WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list_exams(&self, user_id: Uuid) -> Result<Vec<ExamSummary>, AppError> {
        Ok(sqlx::query_as::<_, ExamSummary>(
            r#"
            SELECT id, title, subject, difficulty, exam_type, taken, pinned, passed, created_at
            FROM exams
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn update_exam_fields(
        &self,
        id: Uuid,
        patch: &QuestionSetPatch,
    ) -> Result<Option<Exam>, AppError> {
        Ok(sqlx::query_as::<_, Exam>(
            r#"
            UPDATE exams SET
                title  = COALESCE($2, title),
                taken  = COALESCE($3, taken),
                pinned = COALESCE($4, pinned),
                passed = COALESCE($5, passed)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.title.as_deref())
        .bind(patch.taken)
        .bind(patch.pinned)
        .bind(patch.passed)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn replace_exam_questions(
        &self,
        id: Uuid,
        title: &str,
        questions: &[ExamQuestion],
    ) -> Result<Option<Exam>, AppError> {
        Ok(sqlx::query_as::<_, Exam>(
            "UPDATE exams SET title = $2, questions = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(title)
        .bind(Json(questions))
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_exam(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM exams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_interview(&self, interview: &Interview) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO interviews
                (id, user_id, title, job_role, job_level, topics, questions,
                 taken, pinned, passed, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(interview.id)
        .bind(interview.user_id)
        .bind(&interview.title)
        .bind(&interview.job_role)
        .bind(&interview.job_level)
        .bind(&interview.topics)
        .bind(&interview.questions)
        .bind(interview.taken)
        .bind(interview.pinned)
        .bind(interview.passed)
        .bind(interview.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_interview(&self, id: Uuid) -> Result<Option<Interview>, AppError> {
        Ok(
            sqlx::query_as::<_, Interview>("SELECT * FROM interviews WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list_interviews(&self, user_id: Uuid) -> Result<Vec<InterviewSummary>, AppError> {
        Ok(sqlx::query_as::<_, InterviewSummary>(
            r#"
            SELECT id, title, job_role, job_level, topics, taken, pinned, passed, created_at
            FROM interviews
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn update_interview_fields(
        &self,
        id: Uuid,
        patch: &QuestionSetPatch,
    ) -> Result<Option<Interview>, AppError> {
        Ok(sqlx::query_as::<_, Interview>(
            r#"
            UPDATE interviews SET
                title  = COALESCE($2, title),
                taken  = COALESCE($3, taken),
                pinned = COALESCE($4, pinned),
                passed = COALESCE($5, passed)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.title.as_deref())
        .bind(patch.taken)
        .bind(patch.pinned)
        .bind(patch.passed)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn replace_interview_questions(
        &self,
        id: Uuid,
        title: &str,
        questions: &[InterviewQuestion],
    ) -> Result<Option<Interview>, AppError> {
        Ok(sqlx::query_as::<_, Interview>(
            "UPDATE interviews SET title = $2, questions = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(title)
        .bind(Json(questions))
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_interview(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM interviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl AttemptStore for PgStore {
    async fn find_exam_attempt(&self, exam_id: Uuid) -> Result<Option<ExamAttempt>, AppError> {
        Ok(sqlx::query_as::<_, ExamAttempt>(
            "SELECT * FROM exam_attempts WHERE exam_id = $1 ORDER BY created_at LIMIT 1",
        )
        .bind(exam_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn insert_exam_attempt(&self, attempt: &ExamAttempt) -> Result<bool, AppError> {
        // The (user_id, exam_id) unique constraint arbitrates concurrent begins.
        let result = sqlx::query(
            r#"
            INSERT INTO exam_attempts
                (id, user_id, exam_id, answers, score, passed, time_seconds, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id, exam_id) DO NOTHING
            "#,
        )
        .bind(attempt.id)
        .bind(attempt.user_id)
        .bind(attempt.exam_id)
        .bind(&attempt.answers)
        .bind(attempt.score)
        .bind(attempt.passed)
        .bind(attempt.time_seconds)
        .bind(attempt.created_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn finalize_exam_attempt(
        &self,
        id: Uuid,
        outcome: &ExamOutcome,
    ) -> Result<Option<ExamAttempt>, AppError> {
        Ok(sqlx::query_as::<_, ExamAttempt>(
            r#"
            UPDATE exam_attempts SET
                answers      = $2,
                score        = $3,
                passed       = $4,
                time_seconds = $5,
                finalized_at = NOW()
            WHERE id = $1 AND finalized_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(Json(&outcome.answers))
        .bind(outcome.score)
        .bind(outcome.passed)
        .bind(outcome.time_seconds)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_interview_attempt(
        &self,
        interview_id: Uuid,
    ) -> Result<Option<InterviewAttempt>, AppError> {
        Ok(sqlx::query_as::<_, InterviewAttempt>(
            "SELECT * FROM interview_attempts WHERE interview_id = $1 ORDER BY created_at LIMIT 1",
        )
        .bind(interview_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn insert_interview_attempt(
        &self,
        attempt: &InterviewAttempt,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO interview_attempts
                (id, user_id, interview_id, answers, score, passed,
                 analysis, strengths, areas_to_improve, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (user_id, interview_id) DO NOTHING
            "#,
        )
        .bind(attempt.id)
        .bind(attempt.user_id)
        .bind(attempt.interview_id)
        .bind(&attempt.answers)
        .bind(attempt.score)
        .bind(attempt.passed)
        .bind(&attempt.analysis)
        .bind(&attempt.strengths)
        .bind(&attempt.areas_to_improve)
        .bind(attempt.created_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn finalize_interview_attempt(
        &self,
        id: Uuid,
        outcome: &InterviewOutcome,
    ) -> Result<Option<InterviewAttempt>, AppError> {
        Ok(sqlx::query_as::<_, InterviewAttempt>(
            r#"
            UPDATE interview_attempts SET
                answers          = $2,
                score            = $3,
                passed           = $4,
                analysis         = $5,
                strengths        = $6,
                areas_to_improve = $7,
                finalized_at     = NOW()
            WHERE id = $1 AND finalized_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(Json(&outcome.answers))
        .bind(outcome.score)
        .bind(outcome.passed)
        .bind(&outcome.analysis)
        .bind(&outcome.strengths)
        .bind(&outcome.areas_to_improve)
        .fetch_optional(&self.pool)
        .await?)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn upsert_user_profile(&self, id: Uuid, patch: &UserPatch) -> Result<User, AppError> {
        Ok(sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, full_name, image_url)
            VALUES ($1, COALESCE($2, ''), COALESCE($3, ''))
            ON CONFLICT (id) DO UPDATE SET
                full_name  = COALESCE($2, users.full_name),
                image_url  = COALESCE($3, users.image_url),
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.full_name.as_deref())
        .bind(patch.image_url.as_deref())
        .fetch_one(&self.pool)
        .await?)
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        // Set deletes cascade to every attempt on those sets.
        for statement in [
            "DELETE FROM exam_attempts WHERE user_id = $1",
            "DELETE FROM interview_attempts WHERE user_id = $1",
            "DELETE FROM exams WHERE user_id = $1",
            "DELETE FROM interviews WHERE user_id = $1",
            "DELETE FROM question_analyses WHERE user_id = $1",
            "DELETE FROM resume_reviews WHERE user_id = $1",
        ] {
            sqlx::query(statement).bind(id).execute(&mut *tx).await?;
        }
        let profile = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(profile.rows_affected() > 0)
    }
}
