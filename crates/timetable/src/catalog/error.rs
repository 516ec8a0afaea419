//! Error types for catalog loading.

use crate::schedule::IntervalError;
use thiserror::Error;

/// Errors that can occur while reading catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file is not the expected JSON shape
    #[error("Failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A schedule line produced an impossible meeting time
    #[error("Invalid meeting time in {line:?}: {source}")]
    InvalidSchedule {
        line: String,
        #[source]
        source: IntervalError,
    },
}
