#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use quizbank_api::config::ServerConfig;
use quizbank_api::router::build_app_router;
use quizbank_api::state::AppState;
use quizbank_db::store::{MemoryQuestionStore, QuestionStore};

/// Build a test `ServerConfig` with safe defaults.
///
/// No database URL, so nothing ever touches PostgreSQL. The static directory
/// does not exist unless a test provides one.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        db_connect_timeout_ms: 2000,
        db_max_connections: 1,
        static_dir: PathBuf::from("/nonexistent/quizbank-static"),
        seed_sample_questions: false,
    }
}

/// Full application router over `store`, with the production middleware stack.
///
/// The router is `Clone` and clones share the store, so one test can send
/// several requests against the same data.
pub fn build_app_with(store: Arc<dyn QuestionStore>, config: ServerConfig) -> Router {
    let state = AppState { store };
    build_app_router(state, &config)
}

/// Router over an empty in-memory store.
pub fn build_test_app() -> Router {
    build_app_with(Arc::new(MemoryQuestionStore::new()), test_config())
}

/// Router over the seeded in-memory store.
pub fn build_seeded_app() -> Router {
    build_app_with(Arc::new(MemoryQuestionStore::seeded()), test_config())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, json: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&json).unwrap()))
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, json)).await
}

pub async fn put_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, json)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
