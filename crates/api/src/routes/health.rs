use axum::extract::State;
use axum::{routing::get, Json, Router};
use quizbank_db::store::StoreBackend;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Which question store this process is using.
    pub backend: StoreBackend,
    /// Whether the database is reachable. Always `false` on the memory backend.
    pub db_healthy: bool,
}

/// GET /health -- returns service and store health.
///
/// `degraded` means the selected store stopped answering. Check `backend`
/// to tell a durable deployment from the in-memory fallback.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let backend = state.store.backend();
    let store_healthy = state.store.health_check().await;
    let db_healthy = backend == StoreBackend::Postgres && store_healthy;

    let status = if store_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        backend,
        db_healthy,
    })
}

/// Mount health check routes (root level, not under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
