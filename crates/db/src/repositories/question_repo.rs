//! Repository for the `questions` table.

use quizbank_core::question::QuestionDraft;
use quizbank_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};

use crate::models::question::QuestionRow;

/// Column list for `questions` queries.
const COLUMNS: &str = "\
    id, question_type, prompt, options, correct_answer, rationale, \
    category, sort_order, created_at";

/// Provides CRUD and reorder operations for questions.
pub struct QuestionRepo;

impl QuestionRepo {
    /// List every question in display order.
    pub async fn list(pool: &PgPool) -> Result<Vec<QuestionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM questions \
             ORDER BY sort_order ASC, created_at DESC"
        );
        sqlx::query_as::<_, QuestionRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a question by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<QuestionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE id = $1");
        sqlx::query_as::<_, QuestionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a question and lock its row until the surrounding transaction ends.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<QuestionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, QuestionRow>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Insert a question.
    ///
    /// Without an explicit `order` the new row is ranked after every existing
    /// one (rank = current row count).
    pub async fn create(
        pool: &PgPool,
        draft: &QuestionDraft,
        order: Option<i32>,
    ) -> Result<QuestionRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO questions \
                 (question_type, prompt, options, rationale, category, sort_order) \
             VALUES ($1, $2, $3, $4, $5, \
                 COALESCE($6, (SELECT COUNT(*)::INTEGER FROM questions))) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuestionRow>(&query)
            .bind(draft.question_type.as_str())
            .bind(&draft.prompt)
            .bind(Json(&draft.options))
            .bind(&draft.rationale)
            .bind(&draft.category)
            .bind(order)
            .fetch_one(pool)
            .await
    }

    /// Overwrite the content columns of a question.
    ///
    /// `sort_order` and `created_at` are left alone; `correct_answer` is
    /// cleared because the options are rewritten in object form.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        draft: &QuestionDraft,
    ) -> Result<QuestionRow, sqlx::Error> {
        let query = format!(
            "UPDATE questions SET \
                 question_type = $2, \
                 prompt = $3, \
                 options = $4, \
                 correct_answer = NULL, \
                 rationale = $5, \
                 category = $6, \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuestionRow>(&query)
            .bind(id)
            .bind(draft.question_type.as_str())
            .bind(&draft.prompt)
            .bind(Json(&draft.options))
            .bind(&draft.rationale)
            .bind(&draft.category)
            .fetch_one(conn)
            .await
    }

    /// Delete a question by ID.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply `(id, rank)` assignments in a single statement.
    ///
    /// Ids without a matching row are skipped. Returns the number of rows
    /// updated.
    pub async fn apply_ranks(pool: &PgPool, plan: &[(DbId, i32)]) -> Result<u64, sqlx::Error> {
        let (ids, ranks): (Vec<DbId>, Vec<i32>) = plan.iter().copied().unzip();

        let result = sqlx::query(
            "UPDATE questions AS q SET \
                 sort_order = v.sort_order, \
                 updated_at = now() \
             FROM UNNEST($1::BIGINT[], $2::INTEGER[]) AS v(id, sort_order) \
             WHERE q.id = v.id",
        )
        .bind(&ids)
        .bind(&ranks)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
