//! Database errors

use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Record not found
    #[error("record not found")]
    NotFound,

    /// Store could not be reached
    #[error("resource store unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for repository operations
pub type DbResult<T> = Result<T, DbError>;
