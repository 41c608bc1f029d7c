use async_trait::async_trait;
use quizbank_core::error::CoreError;
use quizbank_core::ordering::plan_reorder;
use quizbank_core::question::{QuestionDraft, QuestionPayload};
use quizbank_core::types::DbId;

use super::{QuestionStore, StoreBackend, StoreSettings};
use crate::models::question::{Question, QuestionRow};
use crate::repositories::QuestionRepo;
use crate::DbPool;

/// Durable backend. Single-row writes rely on PostgreSQL row atomicity;
/// reorders are one `UPDATE ... FROM UNNEST` statement.
pub struct PgQuestionStore {
    pool: DbPool,
}

impl PgQuestionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Connect, verify and migrate, all within `settings.connect_timeout`.
    pub async fn connect(database_url: &str, settings: &StoreSettings) -> Result<Self, sqlx::Error> {
        let attempt = async {
            let pool = crate::create_pool(
                database_url,
                settings.max_connections,
                settings.connect_timeout,
            )
            .await?;
            crate::health_check(&pool).await?;
            crate::run_migrations(&pool)
                .await
                .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;
            Ok::<_, sqlx::Error>(pool)
        };

        let pool = tokio::time::timeout(settings.connect_timeout, attempt)
            .await
            .map_err(|_| sqlx::Error::PoolTimedOut)??;

        Ok(Self::new(pool))
    }
}

fn unavailable(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Question store query failed");
    CoreError::StoreUnavailable(err.to_string())
}

fn into_questions(rows: Vec<QuestionRow>) -> Result<Vec<Question>, CoreError> {
    rows.into_iter().map(QuestionRow::into_question).collect()
}

#[async_trait]
impl QuestionStore for PgQuestionStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Postgres
    }

    async fn health_check(&self) -> bool {
        crate::health_check(&self.pool).await.is_ok()
    }

    async fn list(&self) -> Result<Vec<Question>, CoreError> {
        let rows = QuestionRepo::list(&self.pool).await.map_err(unavailable)?;
        into_questions(rows)
    }

    async fn get(&self, id: DbId) -> Result<Option<Question>, CoreError> {
        QuestionRepo::find_by_id(&self.pool, id)
            .await
            .map_err(unavailable)?
            .map(QuestionRow::into_question)
            .transpose()
    }

    async fn create(
        &self,
        draft: QuestionDraft,
        order: Option<i32>,
    ) -> Result<Question, CoreError> {
        QuestionRepo::create(&self.pool, &draft, order)
            .await
            .map_err(unavailable)?
            .into_question()
    }

    async fn update(
        &self,
        id: DbId,
        payload: QuestionPayload,
    ) -> Result<Option<Question>, CoreError> {
        let mut tx = self.pool.begin().await.map_err(unavailable)?;

        let Some(row) = QuestionRepo::find_for_update(&mut *tx, id)
            .await
            .map_err(unavailable)?
        else {
            return Ok(None);
        };

        // Validation failures drop `tx`, which rolls back and releases the lock.
        let draft = QuestionDraft::merge(&row.draft()?, payload)?;
        let updated = QuestionRepo::update(&mut *tx, id, &draft)
            .await
            .map_err(unavailable)?;

        tx.commit().await.map_err(unavailable)?;
        updated.into_question().map(Some)
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        QuestionRepo::delete(&self.pool, id)
            .await
            .map_err(unavailable)
    }

    async fn reorder(&self, ordered_ids: &[DbId]) -> Result<(), CoreError> {
        let plan = plan_reorder(ordered_ids);
        if plan.is_empty() {
            return Ok(());
        }

        let updated = QuestionRepo::apply_ranks(&self.pool, &plan)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "Reorder batch failed");
                CoreError::ReorderFailed(err.to_string())
            })?;

        tracing::debug!(requested = plan.len(), updated, "Reorder applied");
        Ok(())
    }
}
