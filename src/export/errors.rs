//! Export error types
//!
//! Error codes:
//! - ARC_EXPORT_SERIALIZE
//! - ARC_EXPORT_IO

use thiserror::Error;

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to serialize forecast: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        ExportError::Io {
            context: context.into(),
            source,
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ExportError::Serialize(_) => "ARC_EXPORT_SERIALIZE",
            ExportError::Io { .. } => "ARC_EXPORT_IO",
        }
    }
}
