//! Mutation compression
//!
//! Collapses an `EpisodeChain` into one `CompressedForecast` using three
//! signals:
//!
//! - **Trust**: corroboration (evidence count, external validation) decayed
//!   by distance from the terminal node
//! - **Alignment**: agreement in direction with the terminal node
//! - **Arc stability**: how little numeric dimensions moved across the chain
//!
//! # Usage
//!
//! ```ignore
//! use forecast_arc::compression::{compress_episode_chain, CompressionConfig};
//! use forecast_arc::episode::build_episode_chain;
//!
//! let chain = build_episode_chain(&records, "A")?;
//! let forecast = compress_episode_chain(&chain, &CompressionConfig::default())?;
//! ```
//!
//! Scoring is pure: no I/O, no logging, no randomness.

mod alignment;
mod config;
mod engine;
mod errors;
mod forecast;
mod stability;
mod trust;

pub use alignment::{dimension_alignment, node_alignment};
pub use config::CompressionConfig;
pub use engine::{compress_episode_chain, MutationCompressor};
pub use errors::{CompressionError, CompressionResult};
pub use forecast::{CompressedForecast, NodeScore, Provenance};
pub use stability::{arc_stability, population_variance, ArcStability};
pub use trust::{recency_factor, TrustSignals};
