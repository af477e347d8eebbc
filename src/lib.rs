//! forecast-arc - deterministic compression of forecast revision histories
//!
//! A forecast is revised many times ("mutations"). Each revision is a
//! `ForecastRecord` linked to its predecessor. This crate:
//!
//! 1. Traces the ordered episode chain descending from a root trace id
//!    (`episode::build_episode_chain`)
//! 2. Collapses that chain into one canonical forecast using trust,
//!    alignment and arc-stability signals
//!    (`compression::compress_episode_chain`)
//!
//! Both steps are pure functions over owned inputs. Archive loading, export
//! and logging live in the surrounding modules.

pub mod archive;
pub mod cli;
pub mod compression;
pub mod episode;
pub mod export;
pub mod observability;
pub mod record;

pub use compression::{compress_episode_chain, CompressedForecast, CompressionConfig};
pub use episode::{build_episode_chain, EpisodeChain, TraceWarning};
pub use record::{AttributeValue, ForecastRecord, Timestamp};
