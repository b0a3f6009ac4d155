//! Error types for the waterlog application
//!
//! All errors use thiserror for structured error handling.
//! These errors can be serialized for JSON output.
//!
//! `Storage` covers every failure reported by SQLite, including a database
//! file that cannot be opened. Filesystem work done before SQLite is
//! involved, such as creating the data directory, reports `Io`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// The storage engine failed to open, query or commit.
    #[error("Storage unavailable: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Rejected input. Raised before any mutation.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Nothing to delete")]
    NothingToDelete,

    #[error("{0}")]
    Generic(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
