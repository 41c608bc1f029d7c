use std::path::PathBuf;
use std::time::Duration;

use quizbank_db::store::StoreSettings;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PostgreSQL connection string. Unset means the in-memory store.
    pub database_url: Option<String>,
    /// Upper bound on the startup database connection attempt, in milliseconds.
    pub db_connect_timeout_ms: u64,
    pub db_max_connections: u32,
    /// Directory holding the built front-end (`index.html` and assets).
    pub static_dir: PathBuf,
    /// Seed the in-memory store with sample questions.
    pub seed_sample_questions: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `5000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `DATABASE_URL`          | unset                   |
    /// | `DB_CONNECT_TIMEOUT_MS` | `2000`                  |
    /// | `DB_MAX_CONNECTIONS`    | `10`                    |
    /// | `STATIC_DIR`            | `client/dist`           |
    /// | `SEED_SAMPLE_QUESTIONS` | `true`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let db_connect_timeout_ms: u64 = std::env::var("DB_CONNECT_TIMEOUT_MS")
            .unwrap_or_else(|_| "2000".into())
            .parse()
            .expect("DB_CONNECT_TIMEOUT_MS must be a valid u64");

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let static_dir = PathBuf::from(
            std::env::var("STATIC_DIR").unwrap_or_else(|_| "client/dist".into()),
        );

        let seed_sample_questions: bool = std::env::var("SEED_SAMPLE_QUESTIONS")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("SEED_SAMPLE_QUESTIONS must be `true` or `false`");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            db_connect_timeout_ms,
            db_max_connections,
            static_dir,
            seed_sample_questions,
        }
    }

    /// Settings for picking the question store backend at startup.
    pub fn store_settings(&self) -> StoreSettings {
        StoreSettings {
            database_url: self.database_url.clone(),
            connect_timeout: Duration::from_millis(self.db_connect_timeout_ms),
            max_connections: self.db_max_connections,
            seed_sample_questions: self.seed_sample_questions,
        }
    }
}
