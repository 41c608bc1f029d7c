//! Persistence for the question bank.
//!
//! [`store::QuestionStore`] is the only interface the API layer sees. It is
//! backed either by PostgreSQL ([`store::PgQuestionStore`], SQL in
//! [`repositories::QuestionRepo`]) or by a process-local list
//! ([`store::MemoryQuestionStore`]) when no database is reachable.

pub mod models;
pub mod repositories;
pub mod seed;
pub mod store;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
///
/// `acquire_timeout` also bounds the initial connection attempt.
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database answers.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
