// quartermaster-common/src/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Uniqueness violation: {0}")]
    UniquenessViolation(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failure reported by an external collaborator (hashing, token signing,
    /// mail transport, document rendering, recommendation generation).
    #[error("Collaborator error: {0}")]
    Collaborator(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::ValidationError(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::ValidationError(s.to_string())
    }
}
