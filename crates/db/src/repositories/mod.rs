//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` (or a connection inside a transaction) as the
//! first argument.

pub mod question_repo;

pub use question_repo::QuestionRepo;
