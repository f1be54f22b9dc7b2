use std::time::Duration;

/// Engine configuration
///
/// # Environment variables
///
/// Every field can be overridden via environment variable:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | ./data | Working directory (database, logs) |
/// | DATABASE_PATH | {WORK_DIR}/quan_an.db | SQLite database file |
/// | COMMIT_TIMEOUT_MS | 5000 | Order commit transaction timeout (ms) |
/// | LOG_LEVEL | info | Tracing level filter |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database and log files
    pub work_dir: String,
    /// SQLite database file path
    pub database_path: String,
    /// Upper bound for the commit transaction, milliseconds
    pub commit_timeout_ms: u64,
    /// Tracing level: trace | debug | info | warn | error
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| format!("{}/quan_an.db", work_dir.trim_end_matches('/')));
        Self {
            work_dir,
            database_path,
            commit_timeout_ms: std::env::var("COMMIT_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }

    /// Override working directory and database path
    ///
    /// Mostly used by tests
    pub fn with_overrides(work_dir: impl Into<String>, database_path: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.database_path = database_path.into();
        config
    }

    pub fn commit_timeout(&self) -> Duration {
        Duration::from_millis(self.commit_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
