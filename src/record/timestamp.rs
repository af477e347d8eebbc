//! Ordering key for forecast snapshots
//!
//! Accepted input forms:
//! - integer or float (logical clock or epoch value)
//! - RFC 3339 string (converted to epoch milliseconds)

use std::cmp::Ordering;
use std::fmt;

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Logical or wall-clock ordering key.
///
/// Ordering is IEEE total ordering, so every pair of timestamps compares
/// deterministically.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(try_from = "RawTimestamp", into = "f64")]
pub struct Timestamp(f64);

impl Timestamp {
    /// Creates a timestamp from a raw ordering value.
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Parses an RFC 3339 string into epoch milliseconds.
    pub fn parse_rfc3339(s: &str) -> Result<Self, String> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.timestamp_millis() as f64))
            .map_err(|e| format!("invalid RFC 3339 timestamp '{}': {}", s, e))
    }

    /// Returns the raw ordering value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<Timestamp> for f64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl From<i64> for Timestamp {
    fn from(value: i64) -> Self {
        Self(value as f64)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Number(f64),
    Text(String),
}

impl TryFrom<RawTimestamp> for Timestamp {
    type Error = String;

    fn try_from(raw: RawTimestamp) -> Result<Self, Self::Error> {
        match raw {
            RawTimestamp::Number(n) if n.is_finite() => Ok(Self(n)),
            RawTimestamp::Number(n) => Err(format!("timestamp must be finite, got {}", n)),
            RawTimestamp::Text(s) => Self::parse_rfc3339(&s),
        }
    }
}
