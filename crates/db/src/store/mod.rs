//! Question store: one interface, two interchangeable backends.
//!
//! The backend is chosen once, at startup, by [`connect_store`]:
//!
//! - [`PgQuestionStore`] when `DATABASE_URL` is set and the database answers
//!   within the connect timeout;
//! - [`MemoryQuestionStore`] otherwise. The in-memory store is a separate,
//!   non-persistent dataset for the rest of the process, never a cache of
//!   the database.
//!
//! Both backends return records in display order (ascending rank, newest
//! first within a rank) and apply reorders as a whole or not at all.

mod memory;
mod postgres;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use quizbank_core::error::CoreError;
use quizbank_core::question::{QuestionDraft, QuestionPayload};
use quizbank_core::types::DbId;
use serde::Serialize;

use crate::models::question::Question;

pub use memory::MemoryQuestionStore;
pub use postgres::PgQuestionStore;

/// Which backend a store instance talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Memory => "memory",
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CRUD and reorder over the question collection.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    fn backend(&self) -> StoreBackend;

    /// Whether the backing storage currently answers.
    async fn health_check(&self) -> bool;

    /// Every question, sorted by rank ascending then creation time descending.
    async fn list(&self) -> Result<Vec<Question>, CoreError>;

    async fn get(&self, id: DbId) -> Result<Option<Question>, CoreError>;

    /// Insert a normalized question. `order` defaults to the collection size.
    async fn create(&self, draft: QuestionDraft, order: Option<i32>)
        -> Result<Question, CoreError>;

    /// Merge `payload` onto the stored question and re-normalize.
    ///
    /// Returns `Ok(None)` if no question has this id. Rank and creation time
    /// are never changed here.
    async fn update(
        &self,
        id: DbId,
        payload: QuestionPayload,
    ) -> Result<Option<Question>, CoreError>;

    /// Remove a question. Returns whether it existed.
    async fn delete(&self, id: DbId) -> Result<bool, CoreError>;

    /// Give each listed id its position as rank. Unlisted questions keep
    /// their rank; unknown ids are ignored.
    async fn reorder(&self, ordered_ids: &[DbId]) -> Result<(), CoreError>;
}

/// Startup settings for backend selection.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub database_url: Option<String>,
    pub connect_timeout: Duration,
    pub max_connections: u32,
    /// Seed the in-memory store with the sample question set.
    pub seed_sample_questions: bool,
}

/// Try the database once and pick the backend for this process.
///
/// Never fails: an unreachable database downgrades to the in-memory store
/// with a single warning.
pub async fn connect_store(settings: &StoreSettings) -> Arc<dyn QuestionStore> {
    let Some(database_url) = settings.database_url.as_deref() else {
        tracing::info!("DATABASE_URL not set, serving questions from memory");
        return Arc::new(memory_store(settings));
    };

    match PgQuestionStore::connect(database_url, settings).await {
        Ok(store) => {
            tracing::info!("Connected to PostgreSQL question store");
            Arc::new(store)
        }
        Err(err) => {
            tracing::warn!(
                error = %err,
                timeout_ms = settings.connect_timeout.as_millis() as u64,
                "Database unavailable, falling back to in-memory question store; \
                 changes will not persist",
            );
            Arc::new(memory_store(settings))
        }
    }
}

fn memory_store(settings: &StoreSettings) -> MemoryQuestionStore {
    if settings.seed_sample_questions {
        MemoryQuestionStore::seeded()
    } else {
        MemoryQuestionStore::new()
    }
}
