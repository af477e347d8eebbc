//! CLI-specific error types
//!
//! Every CLI error ends the current command with a non-zero exit.

use std::fmt;
use std::io;

use crate::archive::ArchiveError;
use crate::compression::CompressionError;
use crate::episode::EpisodeError;
use crate::export::ExportError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (archive, stdout, output file)
    IoError,
    /// Root trace id not present in the archive
    RootNotFound,
    /// Compression rejected the chain
    CompressionFailed,
    /// Some roots in a batch failed
    PartialFailure,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "ARC_CLI_CONFIG_ERROR",
            Self::IoError => "ARC_CLI_IO_ERROR",
            Self::RootNotFound => "ARC_CLI_ROOT_NOT_FOUND",
            Self::CompressionFailed => "ARC_CLI_COMPRESSION_FAILED",
            Self::PartialFailure => "ARC_CLI_PARTIAL_FAILURE",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn partial_failure(failed: usize, total: usize) -> Self {
        Self::new(
            CliErrorCode::PartialFailure,
            format!("{} of {} roots failed to compress", failed, total),
        )
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ArchiveError> for CliError {
    fn from(e: ArchiveError) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<EpisodeError> for CliError {
    fn from(e: EpisodeError) -> Self {
        match e {
            EpisodeError::RootNotFound(_) => Self::new(CliErrorCode::RootNotFound, e.to_string()),
        }
    }
}

impl From<CompressionError> for CliError {
    fn from(e: CompressionError) -> Self {
        match e {
            CompressionError::InvalidConfig(_) | CompressionError::ConfigIo(_) => {
                Self::config_error(e.to_string())
            }
            CompressionError::EmptyChain(_) => {
                Self::new(CliErrorCode::CompressionFailed, e.to_string())
            }
        }
    }
}

impl From<ExportError> for CliError {
    fn from(e: ExportError) -> Self {
        Self::io_error(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
