//! Question row and read view.

use quizbank_core::error::CoreError;
use quizbank_core::ordering::Ranked;
use quizbank_core::question::{
    AnswerOption, AnswerSummary, QuestionDraft, QuestionType, StoredOptions,
};
use quizbank_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity struct (database row)
// ---------------------------------------------------------------------------

/// A row from the `questions` table. The in-memory store keeps the same shape.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionRow {
    pub id: DbId,
    pub question_type: String,
    pub prompt: String,
    pub options: Json<StoredOptions>,
    /// Only set on legacy rows whose options are plain strings.
    pub correct_answer: Option<i32>,
    pub rationale: String,
    pub category: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

impl QuestionRow {
    /// Canonical content of this row, with legacy options resolved.
    pub fn draft(&self) -> Result<QuestionDraft, CoreError> {
        Ok(QuestionDraft {
            question_type: self.parsed_type()?,
            prompt: self.prompt.clone(),
            options: self.options.0.clone().resolve(self.correct_answer),
            rationale: self.rationale.clone(),
            category: self.category.clone(),
        })
    }

    /// Overwrite the content columns with a normalized draft.
    ///
    /// The row leaves the legacy shape behind once it is edited.
    pub fn apply(&mut self, draft: QuestionDraft) {
        self.question_type = draft.question_type.as_str().to_string();
        self.prompt = draft.prompt;
        self.options = Json(StoredOptions::Structured(draft.options));
        self.correct_answer = None;
        self.rationale = draft.rationale;
        self.category = draft.category;
    }

    pub fn into_question(self) -> Result<Question, CoreError> {
        let question_type = self.parsed_type()?;
        let options = self.options.0.resolve(self.correct_answer);
        let summary = AnswerSummary::derive(question_type, &options);

        Ok(Question {
            id: self.id,
            key: self.id.to_string(),
            question_type,
            question: self.prompt,
            options,
            rationale: self.rationale,
            category: self.category,
            order: self.sort_order,
            created_at: self.created_at,
            correct_answer: summary.correct_index(),
            true_count: summary.true_count(),
            summary: summary.text(),
        })
    }

    fn parsed_type(&self) -> Result<QuestionType, CoreError> {
        QuestionType::from_str(&self.question_type).map_err(|_| {
            CoreError::Internal(format!(
                "question {} has unknown type '{}'",
                self.id, self.question_type
            ))
        })
    }
}

impl Ranked for QuestionRow {
    fn rank(&self) -> i32 {
        self.sort_order
    }
    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

// ---------------------------------------------------------------------------
// Read view
// ---------------------------------------------------------------------------

/// A question as returned by the API.
///
/// `correctAnswer`, `trueCount` and `summary` are derived on read and are
/// never stored. `_id` repeats `id` as a string for clients that key list
/// items by it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: DbId,
    #[serde(rename = "_id")]
    pub key: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub question: String,
    pub options: Vec<AnswerOption>,
    pub rationale: String,
    pub category: String,
    pub order: i32,
    pub created_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub true_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Ranked for Question {
    fn rank(&self) -> i32 {
        self.order
    }
    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn legacy_row() -> QuestionRow {
        QuestionRow {
            id: 7,
            question_type: "SBA".into(),
            prompt: "Most common cause of CAP?".into(),
            options: Json(StoredOptions::Legacy(vec![
                "Staph".into(),
                "H. influenzae".into(),
                "Strep pneumoniae".into(),
            ])),
            correct_answer: Some(2),
            rationale: "Strep.".into(),
            category: "Respiratory".into(),
            sort_order: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn legacy_row_serializes_in_object_shape() {
        let question = legacy_row().into_question().unwrap();
        let value = serde_json::to_value(&question).unwrap();

        assert_eq!(value["id"], 7);
        assert_eq!(value["_id"], "7");
        assert_eq!(value["type"], "SBA");
        assert_eq!(value["question"], "Most common cause of CAP?");
        assert_eq!(value["options"][2], json!({"text": "Strep pneumoniae", "isCorrect": true}));
        assert_eq!(value["correctAnswer"], 2);
        assert_eq!(value["summary"], "Answer: C");
        assert!(value.get("trueCount").is_none());
    }

    #[test]
    fn apply_drops_legacy_shape() {
        let mut row = legacy_row();
        let draft = row.draft().unwrap();
        row.apply(draft);

        assert_eq!(row.correct_answer, None);
        assert!(matches!(row.options.0, StoredOptions::Structured(_)));
        assert_eq!(row.into_question().unwrap().correct_answer, Some(2));
    }

    #[test]
    fn unknown_stored_type_is_internal_error() {
        let mut row = legacy_row();
        row.question_type = "ESSAY".into();
        assert!(matches!(row.into_question(), Err(CoreError::Internal(_))));
    }
}
