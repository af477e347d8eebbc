//! Archive error types
//!
//! Error codes:
//! - ARC_ARCHIVE_IO (FATAL for the request)
//!
//! A malformed line is not an error. It is reported as a `LineIssue` and
//! loading continues.

use thiserror::Error;

/// Result type for archive operations
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Archive errors
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Failed to read archive {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ArchiveError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ArchiveError::Io { .. } => "ARC_ARCHIVE_IO",
        }
    }
}
