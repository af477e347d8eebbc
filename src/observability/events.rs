//! Observable events
//!
//! Every log line emitted by the command layer names one of these events.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    ConfigLoaded,

    // Archive
    ArchiveLoaded,
    /// A line was skipped (malformed or duplicate)
    ArchiveLineRejected,

    // Tracing
    ChainTraced,
    /// Dangling parent, cycle or duplicate found while tracing
    ChainWarning,

    // Compression
    ForecastCompressed,
    ForecastExported,

    /// A request failed; others in the batch continue
    RequestFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ArchiveLoaded => "ARCHIVE_LOADED",
            Event::ArchiveLineRejected => "ARCHIVE_LINE_REJECTED",
            Event::ChainTraced => "CHAIN_TRACED",
            Event::ChainWarning => "CHAIN_WARNING",
            Event::ForecastCompressed => "FORECAST_COMPRESSED",
            Event::ForecastExported => "FORECAST_EXPORTED",
            Event::RequestFailed => "REQUEST_FAILED",
        }
    }

    /// Returns true if the event reports something the operator should review
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Event::ArchiveLineRejected | Event::ChainWarning | Event::RequestFailed
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
