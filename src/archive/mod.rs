//! Forecast archive loading
//!
//! Reads line-delimited JSON archives of independent forecast records.
//! Parse problems are reported per line and never abort the load.

mod errors;
mod reader;

pub use errors::{ArchiveError, ArchiveResult};
pub use reader::{ArchiveReader, LineIssue, LoadedArchive};
