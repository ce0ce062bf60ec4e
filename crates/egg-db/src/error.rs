//! Database error types for egg-db.

use thiserror::Error;

/// Errors from list store operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The store file does not exist.
    #[error("Database file {0} does not exist")]
    NotFound(String),

    /// The store file exists but a fresh one was requested.
    #[error("Database file {0} already exists")]
    AlreadyExists(String),

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., closing a closed item, bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
