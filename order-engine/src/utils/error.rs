//! Engine-level error type
//!
//! Infrastructure failures only. Parsing never fails outward, and
//! user-recoverable situations (ambiguity, unknown food, commit retry)
//! are expressed as replies, not errors.

use crate::db::repository::RepoError;

/// Engine error enumeration
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl EngineError {
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
