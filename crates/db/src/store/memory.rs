use async_trait::async_trait;
use chrono::Utc;
use quizbank_core::error::CoreError;
use quizbank_core::ordering::{plan_reorder, sort_for_display};
use quizbank_core::question::{QuestionDraft, QuestionPayload, StoredOptions};
use quizbank_core::types::DbId;
use sqlx::types::Json;
use tokio::sync::RwLock;

use super::{QuestionStore, StoreBackend};
use crate::models::question::{Question, QuestionRow};
use crate::seed;

/// Process-local backend. Lost on restart.
///
/// Every operation runs under one lock acquisition, so a reorder is applied
/// entirely or not at all as far as other requests can observe.
pub struct MemoryQuestionStore {
    inner: RwLock<MemoryInner>,
}

struct MemoryInner {
    rows: Vec<QuestionRow>,
    /// Next id to hand out. Only ever increases, so ids are never reused.
    next_id: DbId,
}

impl MemoryQuestionStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    /// A store holding the sample question set.
    pub fn seeded() -> Self {
        Self::with_rows(seed::sample_questions())
    }

    /// A store holding `rows` as-is (legacy option shapes included).
    pub fn with_rows(rows: Vec<QuestionRow>) -> Self {
        let next_id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self {
            inner: RwLock::new(MemoryInner { rows, next_id }),
        }
    }
}

impl Default for MemoryQuestionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuestionStore for MemoryQuestionStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Memory
    }

    async fn health_check(&self) -> bool {
        true
    }

    async fn list(&self) -> Result<Vec<Question>, CoreError> {
        let mut rows = self.inner.read().await.rows.clone();
        sort_for_display(&mut rows);
        rows.into_iter().map(QuestionRow::into_question).collect()
    }

    async fn get(&self, id: DbId) -> Result<Option<Question>, CoreError> {
        let inner = self.inner.read().await;
        inner
            .rows
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .map(QuestionRow::into_question)
            .transpose()
    }

    async fn create(
        &self,
        draft: QuestionDraft,
        order: Option<i32>,
    ) -> Result<Question, CoreError> {
        let mut inner = self.inner.write().await;

        let id = inner.next_id;
        inner.next_id += 1;
        let sort_order =
            order.unwrap_or_else(|| i32::try_from(inner.rows.len()).unwrap_or(i32::MAX));

        let row = QuestionRow {
            id,
            question_type: draft.question_type.as_str().to_string(),
            prompt: draft.prompt,
            options: Json(StoredOptions::Structured(draft.options)),
            correct_answer: None,
            rationale: draft.rationale,
            category: draft.category,
            sort_order,
            created_at: Utc::now(),
        };
        inner.rows.push(row.clone());

        row.into_question()
    }

    async fn update(
        &self,
        id: DbId,
        payload: QuestionPayload,
    ) -> Result<Option<Question>, CoreError> {
        let mut inner = self.inner.write().await;
        let Some(row) = inner.rows.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        let draft = QuestionDraft::merge(&row.draft()?, payload)?;
        row.apply(draft);

        row.clone().into_question().map(Some)
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.rows.len();
        inner.rows.retain(|r| r.id != id);
        Ok(inner.rows.len() < before)
    }

    async fn reorder(&self, ordered_ids: &[DbId]) -> Result<(), CoreError> {
        let plan = plan_reorder(ordered_ids);
        let mut inner = self.inner.write().await;

        for (id, rank) in plan {
            if let Some(row) = inner.rows.iter_mut().find(|r| r.id == id) {
                row.sort_order = rank;
            }
        }
        Ok(())
    }
}
