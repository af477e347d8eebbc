//! CLI module for forecast-arc
//!
//! Provides command-line interface for:
//! - compress: Compress one root's episode chain
//! - trace: Print one root's ordered episode chain
//! - roots: List origin trace ids in an archive
//! - compress-all: Compress every origin root

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{compress, compress_all, roots, run, run_command, trace};
pub use errors::{CliError, CliErrorCode, CliResult};
