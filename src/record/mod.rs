//! Forecast record data model
//!
//! A `ForecastRecord` is one immutable snapshot of a forecast. Records link
//! to the snapshot they mutated from through `parent_trace_id`.
//!
//! All maps are ordered (`BTreeMap`) so that iteration and serialization
//! are deterministic.

mod timestamp;
mod types;
mod value;

pub use timestamp::Timestamp;
pub use types::{Attributes, ForecastRecord, Metadata};
pub use value::{AttributeValue, Direction};
