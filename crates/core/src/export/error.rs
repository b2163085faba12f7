//! Export error types.

use sitebook_shared::AppError;
use thiserror::Error;

/// Errors raised while rendering an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The CSV writer failed.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// The buffered output could not be flushed.
    #[error("Export buffer failed: {0}")]
    Io(#[from] std::io::Error),

    /// The rendered bytes were not UTF-8.
    #[error("Export produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// JSON serialization failed.
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        Self::Internal(err.to_string())
    }
}
