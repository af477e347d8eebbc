//! Observability
//!
//! Structured JSON logging for the command layer:
//! - `Logger`: one JSON line per event on stderr
//! - `Event`: typed event names
//! - `ObservationScope`: begin/complete/failed bracketing
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. The tracer and the compression engine never log; the command layer
//!    logs the warnings they return
//! 3. Deterministic key ordering
//!
//! # Usage
//!
//! ```ignore
//! use forecast_arc::observability::{log_event, Event, ObservationScope};
//!
//! let scope = ObservationScope::with_fields("COMPRESS", &[("root", "A")]);
//! log_event(Event::ChainTraced, &[("nodes", "3")]);
//! scope.complete();
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::{ObservationScope, Timer};

use crate::archive::LineIssue;
use crate::episode::TraceWarning;

/// Log an event. Warning events are logged at WARN, others at INFO.
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_warning() {
        Severity::Warn
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}

/// Log a tracing warning for the chain rooted at `root_trace_id`.
pub fn log_trace_warning(root_trace_id: &str, warning: &TraceWarning) {
    let detail = warning.to_string();
    log_event(
        Event::ChainWarning,
        &[
            ("code", warning.code()),
            ("detail", detail.as_str()),
            ("root", root_trace_id),
            ("trace_id", warning.trace_id()),
        ],
    );
}

/// Log a rejected archive line with its number and raw content.
pub fn log_line_issue(issue: &LineIssue) {
    let line_number = issue.line_number.to_string();
    log_event(
        Event::ArchiveLineRejected,
        &[
            ("line", line_number.as_str()),
            ("raw", issue.raw.as_str()),
            ("reason", issue.reason.as_str()),
        ],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        log_event(Event::ArchiveLoaded, &[("records", "3")]);
        log_event(Event::ChainWarning, &[]);
    }

    #[test]
    fn test_log_trace_warning() {
        log_trace_warning(
            "A",
            &TraceWarning::DuplicateTrace {
                trace_id: "B".into(),
            },
        );
    }

    #[test]
    fn test_log_line_issue() {
        log_line_issue(&LineIssue {
            line_number: 4,
            raw: "{oops".into(),
            reason: "expected value".into(),
        });
    }
}
