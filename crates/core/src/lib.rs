//! Domain logic for the quiz question bank.
//!
//! Pure types and functions only: the question schema and normalizer,
//! display ordering and the reorder plan, and answer checking. Storage
//! lives in `quizbank-db`, HTTP in `quizbank-api`.

pub mod error;
pub mod grading;
pub mod ordering;
pub mod question;
pub mod types;
