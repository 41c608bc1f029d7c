//! Answer checking for the quiz flow.
//!
//! Stateless: a submission is compared against the stored options and the
//! outcome is returned to the caller. Nothing is recorded.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::question::{option_label, AnswerOption, QuestionType};

/// A learner's answer to one question.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Submission {
    /// SBA: index of the chosen option.
    Single { selected: usize },
    /// MTF: one true/false mark per option, in option order.
    TrueFalse { marks: Vec<bool> },
}

/// Per-option result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionOutcome {
    pub label: char,
    pub is_correct: bool,
    /// What the learner said about this option (SBA: whether it was picked).
    pub answered: bool,
    pub right: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    pub correct: bool,
    pub score: usize,
    pub total: usize,
    pub options: Vec<OptionOutcome>,
}

/// Compare `submission` with the correct answers in `options`.
///
/// SBA scores out of 1; MTF scores one point per correctly judged statement.
pub fn grade(
    question_type: QuestionType,
    options: &[AnswerOption],
    submission: &Submission,
) -> Result<GradeReport, CoreError> {
    let answers: Vec<bool> = match (question_type, submission) {
        (QuestionType::Sba, Submission::Single { selected }) => {
            if *selected >= options.len() {
                return Err(CoreError::Validation(format!(
                    "selected option {selected} is out of range for {} options",
                    options.len()
                )));
            }
            (0..options.len()).map(|i| i == *selected).collect()
        }
        (QuestionType::Mtf, Submission::TrueFalse { marks }) => {
            if marks.len() != options.len() {
                return Err(CoreError::Validation(format!(
                    "expected {} marks, got {}",
                    options.len(),
                    marks.len()
                )));
            }
            marks.clone()
        }
        (QuestionType::Sba, _) => {
            return Err(CoreError::Validation(
                "SBA questions take a `selected` option index".into(),
            ))
        }
        (QuestionType::Mtf, _) => {
            return Err(CoreError::Validation(
                "MTF questions take a `marks` array".into(),
            ))
        }
    };

    let outcomes: Vec<OptionOutcome> = options
        .iter()
        .zip(answers)
        .enumerate()
        .map(|(i, (option, answered))| OptionOutcome {
            label: option_label(i),
            is_correct: option.is_correct,
            answered,
            right: answered == option.is_correct,
        })
        .collect();

    let correct = outcomes.iter().all(|o| o.right);
    let (score, total) = match question_type {
        QuestionType::Sba => (usize::from(correct), 1),
        QuestionType::Mtf => (outcomes.iter().filter(|o| o.right).count(), outcomes.len()),
    };

    Ok(GradeReport {
        correct,
        score,
        total,
        options: outcomes,
    })
}
