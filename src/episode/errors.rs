//! Episode tracing error types
//!
//! Error codes:
//! - ARC_ROOT_NOT_FOUND (REJECT)
//!
//! Recoverable integrity problems (dangling parents, cycles, duplicate
//! trace ids) are not errors. They are reported as `TraceWarning`s on the
//! resulting chain.

use thiserror::Error;

/// Result type for episode tracing
pub type EpisodeResult<T> = Result<T, EpisodeError>;

/// Episode tracing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EpisodeError {
    #[error("Root trace not found: {0}")]
    RootNotFound(String),
}

impl EpisodeError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            EpisodeError::RootNotFound(_) => "ARC_ROOT_NOT_FOUND",
        }
    }
}
