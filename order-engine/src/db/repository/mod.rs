//! Repository Module
//!
//! Query and transaction helpers over the SQLite pool. Module-level
//! `pub async fn`s taking `&SqlitePool` (or a transaction where a caller
//! composes several writes).

pub mod bill;
pub mod dining_table;
pub mod food;

// Re-exports
pub use bill::{CommitError, CommittedOrder};
pub use food::MatchOutcome;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
