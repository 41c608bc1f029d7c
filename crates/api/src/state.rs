use std::sync::Arc;

use quizbank_db::store::QuestionStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the store is behind an `Arc`. Configuration is consumed
/// while the router is built and is not needed per request.
#[derive(Clone)]
pub struct AppState {
    /// Question store chosen at startup (PostgreSQL or in-memory).
    pub store: Arc<dyn QuestionStore>,
}
