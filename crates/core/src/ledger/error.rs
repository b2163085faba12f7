//! Ledger engine error types.
//!
//! The taxonomy is narrow because the engine is pure computation: the only
//! error it raises itself is an inverted window. Event source failures are
//! carried through unchanged so callers see the real cause.

use chrono::NaiveDate;
use sitebook_shared::AppError;
use thiserror::Error;

/// Error type returned by event sources.
///
/// Boxed so any storage backend can report its own error; callers can
/// `downcast_ref` to recover the concrete type.
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while building statements and reports.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The window starts after it ends.
    #[error("Invalid date window: from {from} is after to {to}")]
    InvalidWindow {
        /// Window start.
        from: NaiveDate,
        /// Window end.
        to: NaiveDate,
    },

    /// The event source failed.
    #[error("Event source failed: {0}")]
    Source(#[from] SourceError),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidWindow { .. } => Self::Validation(err.to_string()),
            LedgerError::Source(_) => Self::Database(err.to_string()),
        }
    }
}
