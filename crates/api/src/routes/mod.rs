pub mod health;
pub mod questions;

use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /questions                    list, create
/// /questions/reorder            reorder (PUT)
/// /questions/{id}               get, update, delete
/// /questions/{id}/check         check an answer (POST)
/// ```
///
/// Anything else under `/api` answers with a JSON 404.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/questions", questions::router())
        .fallback(handlers::api_not_found)
}
