//! Database layer errors.

use sea_orm::DbErr;
use sitebook_shared::AppError;
use thiserror::Error;

/// Errors raised while connecting or migrating.
#[derive(Debug, Error)]
pub enum DbError {
    /// The database rejected an operation.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Database(inner) => Self::Database(inner.to_string()),
        }
    }
}
