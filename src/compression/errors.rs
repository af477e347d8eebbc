//! Compression error types
//!
//! Error codes:
//! - ARC_EMPTY_CHAIN (REJECT)
//! - ARC_INVALID_CONFIG (REJECT)
//! - ARC_CONFIG_IO (REJECT)

use thiserror::Error;

/// Result type for compression operations
pub type CompressionResult<T> = Result<T, CompressionError>;

/// Compression errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompressionError {
    #[error("Episode chain rooted at '{0}' has no nodes")]
    EmptyChain(String),

    #[error("Invalid compression config: {0}")]
    InvalidConfig(String),

    #[error("Failed to read compression config: {0}")]
    ConfigIo(String),
}

impl CompressionError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            CompressionError::EmptyChain(_) => "ARC_EMPTY_CHAIN",
            CompressionError::InvalidConfig(_) => "ARC_INVALID_CONFIG",
            CompressionError::ConfigIo(_) => "ARC_CONFIG_IO",
        }
    }
}
