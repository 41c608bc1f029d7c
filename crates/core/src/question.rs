//! Question schema and normalizer.
//!
//! Two question shapes share one storage representation:
//!
//! - **SBA** (single best answer): exactly one option is correct. Clients may
//!   send a `correctAnswer` index, which is authoritative and rewrites every
//!   option's `isCorrect` flag.
//! - **MTF** (multiple true/false): each option carries its own flag and the
//!   flags are stored as sent.
//!
//! Writes go through [`QuestionDraft::from_payload`] (create) or
//! [`QuestionDraft::merge`] (partial update). Reads resolve the stored option
//! column through [`StoredOptions::resolve`], which also understands the
//! legacy plain-string shape, and derive an [`AnswerSummary`] for listings.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Category assigned when the client sends none (or only whitespace).
pub const DEFAULT_CATEGORY: &str = "General";

// ---------------------------------------------------------------------------
// QuestionType
// ---------------------------------------------------------------------------

/// How the options of a question are answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    #[default]
    #[serde(rename = "SBA")]
    Sba,
    #[serde(rename = "MTF")]
    Mtf,
}

impl QuestionType {
    /// Return the wire-format string for this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sba => "SBA",
            Self::Mtf => "MTF",
        }
    }

    /// Parse from a wire-format string.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "SBA" => Ok(Self::Sba),
            "MTF" => Ok(Self::Mtf),
            _ => Err(CoreError::Validation(format!(
                "Invalid type: '{s}'. Must be one of: SBA, MTF"
            ))),
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// One answer option in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    #[validate(length(min = 1, message = "option text must not be empty"))]
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// The option column as it may be found in storage.
///
/// Records written by older clients hold plain strings and keep the correct
/// position in a separate `correct_answer` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredOptions {
    Structured(Vec<AnswerOption>),
    Legacy(Vec<String>),
}

impl StoredOptions {
    /// Rebuild canonical options. Storage is never rewritten by this.
    pub fn resolve(self, correct_answer: Option<i32>) -> Vec<AnswerOption> {
        match self {
            Self::Structured(options) => options,
            Self::Legacy(texts) => {
                let correct = correct_answer.and_then(|c| usize::try_from(c).ok());
                texts
                    .into_iter()
                    .enumerate()
                    .map(|(i, text)| AnswerOption {
                        text,
                        is_correct: correct == Some(i),
                    })
                    .collect()
            }
        }
    }
}

/// Positional label shown next to an option (`0 -> 'A'`, `1 -> 'B'`, ...).
pub fn option_label(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| char::from(b'A' + i))
        .unwrap_or('?')
}

// ---------------------------------------------------------------------------
// Wire input
// ---------------------------------------------------------------------------

/// An option as sent by the authoring form. Text may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionInput {
    pub text: Option<String>,
    #[serde(default)]
    pub is_correct: bool,
}

impl OptionInput {
    fn into_option(self) -> AnswerOption {
        AnswerOption {
            text: self.text.map(|t| t.trim().to_string()).unwrap_or_default(),
            is_correct: self.is_correct,
        }
    }
}

/// Request body for creating or updating a question.
///
/// Every field is optional so the same shape serves partial updates. Fields
/// the store owns (`id`, `createdAt`) are not part of the payload and are
/// dropped during deserialization. `order` is honoured on create only.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPayload {
    #[serde(rename = "type")]
    pub question_type: Option<String>,
    #[serde(alias = "prompt")]
    pub question: Option<String>,
    pub options: Option<Vec<OptionInput>>,
    /// SBA only: index of the correct option.
    pub correct_answer: Option<i64>,
    pub rationale: Option<String>,
    pub category: Option<String>,
    pub order: Option<i32>,
}

// ---------------------------------------------------------------------------
// QuestionDraft
// ---------------------------------------------------------------------------

/// Validated question content, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct QuestionDraft {
    pub question_type: QuestionType,
    #[validate(length(min = 1, message = "question text is required"))]
    pub prompt: String,
    #[validate(nested)]
    pub options: Vec<AnswerOption>,
    #[validate(length(min = 1, message = "rationale is required"))]
    pub rationale: String,
    pub category: String,
}

impl QuestionDraft {
    /// Normalize a create payload.
    ///
    /// Type defaults to SBA and category to [`DEFAULT_CATEGORY`].
    pub fn from_payload(payload: QuestionPayload) -> Result<Self, CoreError> {
        let question_type = match non_blank(payload.question_type.as_deref()) {
            Some(s) => QuestionType::from_str(s)?,
            None => QuestionType::default(),
        };
        let options = payload
            .options
            .ok_or_else(|| CoreError::Validation("options are required".into()))?;

        Self {
            question_type,
            prompt: trimmed(payload.question),
            options: options.into_iter().map(OptionInput::into_option).collect(),
            rationale: trimmed(payload.rationale),
            category: category_or_default(payload.category),
        }
        .finish(payload.correct_answer)
    }

    /// Apply a partial update on top of `existing` and re-normalize the result.
    ///
    /// Absent fields keep their stored value. A `correctAnswer` without new
    /// options re-flags the stored options.
    pub fn merge(existing: &QuestionDraft, payload: QuestionPayload) -> Result<Self, CoreError> {
        let question_type = match non_blank(payload.question_type.as_deref()) {
            Some(s) => QuestionType::from_str(s)?,
            None => existing.question_type,
        };

        Self {
            question_type,
            prompt: payload
                .question
                .map(|q| q.trim().to_string())
                .unwrap_or_else(|| existing.prompt.clone()),
            options: match payload.options {
                Some(options) => options.into_iter().map(OptionInput::into_option).collect(),
                None => existing.options.clone(),
            },
            rationale: payload
                .rationale
                .map(|r| r.trim().to_string())
                .unwrap_or_else(|| existing.rationale.clone()),
            category: match payload.category {
                Some(c) => category_or_default(Some(c)),
                None => existing.category.clone(),
            },
        }
        .finish(payload.correct_answer)
    }

    /// Derived answer summary for this draft.
    pub fn summary(&self) -> AnswerSummary {
        AnswerSummary::derive(self.question_type, &self.options)
    }

    fn finish(mut self, correct_answer: Option<i64>) -> Result<Self, CoreError> {
        if self.options.is_empty() {
            return Err(CoreError::Validation(
                "at least one option is required".into(),
            ));
        }
        self.validate()?;

        if self.question_type == QuestionType::Sba {
            match correct_answer {
                Some(index) => {
                    let len = self.options.len();
                    let correct = usize::try_from(index)
                        .ok()
                        .filter(|i| *i < len)
                        .ok_or_else(|| {
                            CoreError::Validation(format!(
                                "correctAnswer {index} is out of range for {len} options"
                            ))
                        })?;
                    for (i, option) in self.options.iter_mut().enumerate() {
                        option.is_correct = i == correct;
                    }
                }
                None => {
                    let count = self.options.iter().filter(|o| o.is_correct).count();
                    if count != 1 {
                        return Err(CoreError::Validation(format!(
                            "SBA questions need exactly one correct option, found {count}"
                        )));
                    }
                }
            }
        }

        Ok(self)
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn trimmed(s: Option<String>) -> String {
    s.map(|s| s.trim().to_string()).unwrap_or_default()
}

fn category_or_default(category: Option<String>) -> String {
    non_blank(category.as_deref())
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string()
}

// ---------------------------------------------------------------------------
// AnswerSummary
// ---------------------------------------------------------------------------

/// Presentation-only answer summary. Derived on read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSummary {
    /// SBA: position of the correct option.
    SingleBest { index: usize },
    /// MTF: number of options marked true.
    TrueCount(usize),
    /// No options, or an SBA record without a correct option.
    Unanswered,
}

impl AnswerSummary {
    pub fn derive(question_type: QuestionType, options: &[AnswerOption]) -> Self {
        if options.is_empty() {
            return Self::Unanswered;
        }
        match question_type {
            QuestionType::Sba => options
                .iter()
                .position(|o| o.is_correct)
                .map(|index| Self::SingleBest { index })
                .unwrap_or(Self::Unanswered),
            QuestionType::Mtf => Self::TrueCount(options.iter().filter(|o| o.is_correct).count()),
        }
    }

    pub fn correct_index(&self) -> Option<usize> {
        match self {
            Self::SingleBest { index } => Some(*index),
            _ => None,
        }
    }

    pub fn true_count(&self) -> Option<usize> {
        match self {
            Self::TrueCount(n) => Some(*n),
            _ => None,
        }
    }

    /// Listing text, or `None` when there is nothing to show.
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Unanswered => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for AnswerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleBest { index } => write!(f, "Answer: {}", option_label(*index)),
            Self::TrueCount(n) => write!(f, "{n} True statements"),
            Self::Unanswered => f.write_str("No answer set"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> QuestionPayload {
        serde_json::from_value(value).unwrap()
    }

    fn sba_with_index(index: i64) -> QuestionPayload {
        payload(json!({
            "type": "SBA",
            "question": "Which coronary artery?",
            "options": [
                {"text": "A"}, {"text": "B"}, {"text": "C"}, {"text": "D"}, {"text": "E"}
            ],
            "correctAnswer": index,
            "rationale": "Inferior leads.",
            "category": "Cardiology"
        }))
    }

    // -- QuestionType -------------------------------------------------------

    #[test]
    fn question_type_parses_wire_strings() {
        assert_eq!(QuestionType::from_str("SBA").unwrap(), QuestionType::Sba);
        assert_eq!(QuestionType::from_str("MTF").unwrap(), QuestionType::Mtf);
        assert_eq!(QuestionType::Mtf.to_string(), "MTF");
    }

    #[test]
    fn question_type_rejects_unknown() {
        assert_matches!(QuestionType::from_str("sba"), Err(CoreError::Validation(_)));
    }

    // -- Create normalization -----------------------------------------------

    #[test]
    fn sba_correct_answer_index_sets_flags() {
        let draft = QuestionDraft::from_payload(sba_with_index(2)).unwrap();

        let flags: Vec<bool> = draft.options.iter().map(|o| o.is_correct).collect();
        assert_eq!(flags, vec![false, false, true, false, false]);
        assert_eq!(draft.summary().to_string(), "Answer: C");
    }

    #[test]
    fn sba_index_overrides_conflicting_flags() {
        let draft = QuestionDraft::from_payload(payload(json!({
            "type": "SBA",
            "question": "Q",
            "options": [
                {"text": "x", "isCorrect": true},
                {"text": "y", "isCorrect": true}
            ],
            "correctAnswer": 1,
            "rationale": "R"
        })))
        .unwrap();

        assert!(!draft.options[0].is_correct);
        assert!(draft.options[1].is_correct);
    }

    #[test]
    fn sba_flags_without_index_need_exactly_one() {
        let ok = QuestionDraft::from_payload(payload(json!({
            "question": "Q",
            "options": [{"text": "x"}, {"text": "y", "isCorrect": true}],
            "rationale": "R"
        })))
        .unwrap();
        assert_eq!(ok.question_type, QuestionType::Sba);
        assert_eq!(ok.summary(), AnswerSummary::SingleBest { index: 1 });

        let none_correct = QuestionDraft::from_payload(payload(json!({
            "question": "Q",
            "options": [{"text": "x"}, {"text": "y"}],
            "rationale": "R"
        })));
        assert_matches!(none_correct, Err(CoreError::Validation(_)));
    }

    #[test]
    fn sba_index_out_of_range_rejected() {
        assert_matches!(
            QuestionDraft::from_payload(sba_with_index(5)),
            Err(CoreError::Validation(msg)) if msg.contains("out of range")
        );
        assert_matches!(
            QuestionDraft::from_payload(sba_with_index(-1)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn mtf_keeps_flags_and_counts_true() {
        let draft = QuestionDraft::from_payload(payload(json!({
            "type": "MTF",
            "question": "Regarding hyperkalaemia:",
            "options": [
                {"text": "T", "isCorrect": true},
                {"text": "U", "isCorrect": false},
                {"text": "V", "isCorrect": true}
            ],
            "rationale": "R"
        })))
        .unwrap();

        assert_eq!(draft.summary(), AnswerSummary::TrueCount(2));
        assert_eq!(draft.summary().to_string(), "2 True statements");
        assert_eq!(draft.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn mtf_ignores_correct_answer_index() {
        let draft = QuestionDraft::from_payload(payload(json!({
            "type": "MTF",
            "question": "Q",
            "options": [{"text": "a", "isCorrect": true}, {"text": "b"}],
            "correctAnswer": 1,
            "rationale": "R"
        })))
        .unwrap();

        assert!(draft.options[0].is_correct);
        assert!(!draft.options[1].is_correct);
    }

    #[test]
    fn rejects_unknown_type() {
        let result = QuestionDraft::from_payload(payload(json!({
            "type": "ESSAY",
            "question": "Q",
            "options": [{"text": "a", "isCorrect": true}],
            "rationale": "R"
        })));
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("ESSAY"));
    }

    #[test]
    fn rejects_missing_or_empty_options() {
        let missing = QuestionDraft::from_payload(payload(json!({
            "question": "Q", "rationale": "R"
        })));
        assert_matches!(missing, Err(CoreError::Validation(_)));

        let empty = QuestionDraft::from_payload(payload(json!({
            "question": "Q", "options": [], "rationale": "R"
        })));
        assert_matches!(empty, Err(CoreError::Validation(msg)) if msg.contains("at least one"));
    }

    #[test]
    fn rejects_option_without_text() {
        let result = QuestionDraft::from_payload(payload(json!({
            "type": "MTF",
            "question": "Q",
            "options": [{"text": "a"}, {"isCorrect": true}, {"text": "   "}],
            "rationale": "R"
        })));
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("options[1]"));
    }

    #[test]
    fn rejects_blank_prompt_and_rationale() {
        let result = QuestionDraft::from_payload(payload(json!({
            "type": "MTF",
            "question": "  ",
            "options": [{"text": "a"}]
        })));
        assert_matches!(
            result,
            Err(CoreError::Validation(msg))
                if msg.contains("question text is required") && msg.contains("rationale is required")
        );
    }

    #[test]
    fn accepts_prompt_alias_and_ignores_store_fields() {
        let draft = QuestionDraft::from_payload(payload(json!({
            "id": 99,
            "createdAt": "2020-01-01T00:00:00Z",
            "prompt": "  Aliased  ",
            "options": [{"text": "a", "isCorrect": true}],
            "rationale": "R",
            "category": "  "
        })))
        .unwrap();

        assert_eq!(draft.prompt, "Aliased");
        assert_eq!(draft.category, DEFAULT_CATEGORY);
    }

    // -- Merge --------------------------------------------------------------

    fn stored_sba() -> QuestionDraft {
        QuestionDraft::from_payload(sba_with_index(0)).unwrap()
    }

    #[test]
    fn merge_keeps_absent_fields() {
        let existing = stored_sba();
        let merged = QuestionDraft::merge(
            &existing,
            payload(json!({"rationale": "Updated rationale"})),
        )
        .unwrap();

        assert_eq!(merged.prompt, existing.prompt);
        assert_eq!(merged.options, existing.options);
        assert_eq!(merged.category, "Cardiology");
        assert_eq!(merged.rationale, "Updated rationale");
    }

    #[test]
    fn merge_correct_answer_reflags_stored_options() {
        let merged =
            QuestionDraft::merge(&stored_sba(), payload(json!({"correctAnswer": 3}))).unwrap();
        assert_eq!(merged.summary(), AnswerSummary::SingleBest { index: 3 });
    }

    #[test]
    fn merge_switch_to_sba_requires_single_answer() {
        let mtf = QuestionDraft::from_payload(payload(json!({
            "type": "MTF",
            "question": "Q",
            "options": [{"text": "a", "isCorrect": true}, {"text": "b", "isCorrect": true}],
            "rationale": "R"
        })))
        .unwrap();

        assert_matches!(
            QuestionDraft::merge(&mtf, payload(json!({"type": "SBA"}))),
            Err(CoreError::Validation(_))
        );
        let fixed =
            QuestionDraft::merge(&mtf, payload(json!({"type": "SBA", "correctAnswer": 1})))
                .unwrap();
        assert_eq!(fixed.summary().to_string(), "Answer: B");
    }

    // -- Stored options -----------------------------------------------------

    #[test]
    fn legacy_options_resolve_with_correct_answer() {
        let stored: StoredOptions =
            serde_json::from_value(json!(["A", "B", "C", "D", "E"])).unwrap();
        assert_matches!(stored, StoredOptions::Legacy(_));

        let options = stored.resolve(Some(2));
        assert_eq!(options.len(), 5);
        assert!(options[2].is_correct);
        assert_eq!(options.iter().filter(|o| o.is_correct).count(), 1);
    }

    #[test]
    fn legacy_summary_matches_structured_summary() {
        let legacy: StoredOptions = serde_json::from_value(json!(["A", "B", "C"])).unwrap();
        let structured: StoredOptions = serde_json::from_value(json!([
            {"text": "A", "isCorrect": false},
            {"text": "B", "isCorrect": false},
            {"text": "C", "isCorrect": true}
        ]))
        .unwrap();

        let a = AnswerSummary::derive(QuestionType::Sba, &legacy.resolve(Some(2)));
        let b = AnswerSummary::derive(QuestionType::Sba, &structured.resolve(None));
        assert_eq!(a, b);
        assert_eq!(a.text().as_deref(), Some("Answer: C"));
    }

    #[test]
    fn legacy_without_correct_answer_is_unanswered() {
        let legacy: StoredOptions = serde_json::from_value(json!(["A", "B"])).unwrap();
        let summary = AnswerSummary::derive(QuestionType::Sba, &legacy.resolve(None));
        assert_eq!(summary, AnswerSummary::Unanswered);
        assert_eq!(summary.text(), None);
    }

    #[test]
    fn option_labels_are_positional() {
        assert_eq!(option_label(0), 'A');
        assert_eq!(option_label(4), 'E');
        assert_eq!(option_label(25), 'Z');
        assert_eq!(option_label(26), '?');
    }
}
