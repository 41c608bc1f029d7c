//! Route definitions for the question bank.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::questions;
use crate::state::AppState;

/// Routes mounted at `/api/questions`.
///
/// ```text
/// GET    /              -> list_questions
/// POST   /              -> create_question
/// PUT    /reorder       -> reorder_questions
/// GET    /{id}          -> get_question
/// PUT    /{id}          -> update_question
/// DELETE /{id}          -> delete_question
/// POST   /{id}/check    -> check_answer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(questions::list_questions).post(questions::create_question),
        )
        .route("/reorder", put(questions::reorder_questions))
        .route(
            "/{id}",
            get(questions::get_question)
                .put(questions::update_question)
                .delete(questions::delete_question),
        )
        .route("/{id}/check", post(questions::check_answer))
}
