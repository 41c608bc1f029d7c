//! Handlers for the question bank.
//!
//! CRUD goes straight through the [`QuestionStore`] held in [`AppState`];
//! validation happens in [`QuestionDraft`] before anything is written.
//!
//! [`QuestionStore`]: quizbank_db::store::QuestionStore

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use quizbank_core::error::CoreError;
use quizbank_core::grading::{self, Submission};
use quizbank_core::question::{QuestionDraft, QuestionPayload};
use quizbank_core::types::{parse_id, DbId};
use quizbank_db::models::question::Question;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::{DeleteResponse, MessageResponse};
use crate::state::AppState;

/// An id as the client sends it: a number, or the string form found in `_id`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IdInput {
    Number(DbId),
    Text(String),
}

impl IdInput {
    fn resolve(&self) -> Option<DbId> {
        match self {
            IdInput::Number(id) => Some(*id),
            IdInput::Text(raw) => parse_id(raw),
        }
    }
}

/// Request body for PUT /api/questions/reorder.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    /// Question ids in their new display order.
    pub ordered_ids: Vec<IdInput>,
}

impl ReorderRequest {
    /// Ids that cannot name a stored question are dropped, like unknown ids.
    fn ids(&self) -> Vec<DbId> {
        self.ordered_ids.iter().filter_map(IdInput::resolve).collect()
    }
}

fn not_found(raw: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Question",
        id: raw.to_string(),
    })
}

/// Resolve a path id, treating anything non-numeric as a missing question.
fn path_id(raw: &str) -> AppResult<DbId> {
    parse_id(raw).ok_or_else(|| not_found(raw))
}

async fn find_question(state: &AppState, raw: &str) -> AppResult<Question> {
    let id = path_id(raw)?;
    state.store.get(id).await?.ok_or_else(|| not_found(raw))
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/questions
///
/// All questions in display order.
pub async fn list_questions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let questions = state.store.list().await?;
    Ok(Json(questions))
}

/// GET /api/questions/{id}
pub async fn get_question(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let question = find_question(&state, &raw_id).await?;
    Ok(Json(question))
}

/// POST /api/questions
///
/// Normalize and store a new question. Returns 201 with the stored record.
pub async fn create_question(
    State(state): State<AppState>,
    Json(payload): Json<QuestionPayload>,
) -> AppResult<impl IntoResponse> {
    let order = payload.order;
    let draft = QuestionDraft::from_payload(payload)?;
    let question = state.store.create(draft, order).await?;

    tracing::info!(
        question_id = question.id,
        question_type = %question.question_type,
        category = %question.category,
        "Question created",
    );

    Ok((StatusCode::CREATED, Json(question)))
}

/// PUT /api/questions/{id}
///
/// Partial update. `id`, `createdAt` and `order` in the body are ignored.
pub async fn update_question(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(payload): Json<QuestionPayload>,
) -> AppResult<impl IntoResponse> {
    let id = path_id(&raw_id)?;
    let question = state
        .store
        .update(id, payload)
        .await?
        .ok_or_else(|| not_found(&raw_id))?;

    tracing::info!(question_id = id, "Question updated");

    Ok(Json(question))
}

/// DELETE /api/questions/{id}
///
/// Always 200; a missing or non-numeric id is reported through
/// `deleted: false`.
pub async fn delete_question(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let deleted = match parse_id(&raw_id) {
        Some(id) => state.store.delete(id).await?,
        None => false,
    };

    let message = if deleted {
        tracing::info!(question_id = %raw_id, "Question deleted");
        "Question deleted"
    } else {
        tracing::debug!(question_id = %raw_id, "Delete of missing question ignored");
        "Question not found, nothing deleted"
    };

    Ok(Json(DeleteResponse {
        message: message.to_string(),
        deleted,
    }))
}

// ---------------------------------------------------------------------------
// Reorder
// ---------------------------------------------------------------------------

/// PUT /api/questions/reorder
///
/// Each listed id takes its position as its new rank. Omitted questions keep
/// their rank. On failure nothing is reported as saved, so the client can
/// re-fetch the list.
pub async fn reorder_questions(
    State(state): State<AppState>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let ordered_ids = input.ids();
    state.store.reorder(&ordered_ids).await?;

    tracing::info!(count = ordered_ids.len(), "Questions reordered");

    Ok(Json(MessageResponse::new("Order updated")))
}

// ---------------------------------------------------------------------------
// Answer checking
// ---------------------------------------------------------------------------

/// POST /api/questions/{id}/check
///
/// Grade a submission against the stored answer. Nothing is persisted.
pub async fn check_answer(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(submission): Json<Submission>,
) -> AppResult<impl IntoResponse> {
    let question = find_question(&state, &raw_id).await?;
    let report = grading::grade(question.question_type, &question.options, &submission)?;

    tracing::debug!(
        question_id = question.id,
        correct = report.correct,
        score = report.score,
        "Answer checked",
    );

    Ok(Json(report))
}
