//! Request handlers.
//!
//! Handlers delegate to the question store held in [`AppState`] and map
//! errors via [`AppError`].
//!
//! [`AppState`]: crate::state::AppState

pub mod questions;

use axum::extract::OriginalUri;

use crate::error::AppError;

/// Fallback for `/api/*` paths with no route: JSON 404 instead of the SPA page.
pub async fn api_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}
