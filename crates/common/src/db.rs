//! Store-level errors shared by repository implementations
//!
//! Store implementations return [`RepositoryError`]; callers convert it into
//! the application [`Error`] with `?`.

use sqlx::error::ErrorKind;

use crate::error::Error;

#[derive(thiserror::Error, Debug)]
pub enum RepositoryError {
    /// The store could not complete the call
    #[error("Database connection error: {0}")]
    Connection(sqlx::Error),

    /// The store refused a record that breaks a table constraint
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if matches!(
                db.kind(),
                ErrorKind::CheckViolation | ErrorKind::NotNullViolation
            ) {
                return RepositoryError::InvalidData(db.message().to_string());
            }
        }
        RepositoryError::Connection(err)
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Connection(e) => Error::Database(e),
            RepositoryError::InvalidData(msg) => Error::Validation(msg),
        }
    }
}
