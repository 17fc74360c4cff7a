//! Segment store error types.

use crate::domain::LineId;
use crate::path::PathIntegrityError;

/// Errors that can occur when loading or saving a line's segments.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Stored segments do not form a valid line
    #[error("stored segments for line {line} are inconsistent: {source}")]
    Integrity {
        line: LineId,
        source: PathIntegrityError,
    },
}
