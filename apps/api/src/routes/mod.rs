pub mod health;

use axum::{
    routing::{delete, get, patch},
    Router,
};

use crate::attempts::handlers as attempts;
use crate::question_sets::handlers as sets;
use crate::questions::handlers as questions;
use crate::resumes::handlers as resumes;
use crate::state::AppState;
use crate::users::handlers as users;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile
        .route("/api/v1/user", get(users::handle_get_user))
        .route("/api/v1/user/update", patch(users::handle_update_user))
        .route("/api/v1/user/delete", delete(users::handle_delete_user))
        // Exams
        .route(
            "/api/v1/exams",
            get(sets::handle_list_exams).post(sets::handle_create_exam),
        )
        .route(
            "/api/v1/exams/:id",
            get(sets::handle_get_exam)
                .patch(sets::handle_update_exam)
                .delete(sets::handle_delete_exam),
        )
        .route(
            "/api/v1/exams/:id/regenerate",
            patch(sets::handle_regenerate_exam),
        )
        .route(
            "/api/v1/exams/:id/attempt",
            get(attempts::handle_get_exam_attempt).post(attempts::handle_begin_exam_attempt),
        )
        .route(
            "/api/v1/exams/:id/attempt/submit",
            patch(attempts::handle_submit_exam_attempt),
        )
        // Interviews
        .route(
            "/api/v1/interviews",
            get(sets::handle_list_interviews).post(sets::handle_create_interview),
        )
        .route(
            "/api/v1/interviews/:id",
            get(sets::handle_get_interview)
                .patch(sets::handle_update_interview)
                .delete(sets::handle_delete_interview),
        )
        .route(
            "/api/v1/interviews/:id/regenerate",
            patch(sets::handle_regenerate_interview),
        )
        .route(
            "/api/v1/interviews/:id/attempt",
            get(attempts::handle_get_interview_attempt)
                .post(attempts::handle_begin_interview_attempt),
        )
        .route(
            "/api/v1/interviews/:id/attempt/feedback",
            patch(attempts::handle_interview_feedback),
        )
        // Question analyses
        .route(
            "/api/v1/questions",
            get(questions::handle_list_questions).post(questions::handle_create_question),
        )
        .route(
            "/api/v1/questions/:id",
            get(questions::handle_get_question)
                .patch(questions::handle_pin_question)
                .delete(questions::handle_delete_question),
        )
        // Resume reviews
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list_resume_reviews).post(resumes::handle_create_resume_review),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume_review).delete(resumes::handle_delete_resume_review),
        )
        .with_state(state)
}
