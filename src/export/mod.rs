//! Forecast export
//!
//! Persists `CompressedForecast`s as JSON artifacts.

mod errors;
mod writer;

pub use errors::{ExportError, ExportResult};
pub use writer::ForecastExporter;
