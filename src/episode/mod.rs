//! Episode tracing
//!
//! Builds an `EpisodeChain`: the deterministically ordered set of forecast
//! snapshots descending from a root trace id.
//!
//! # Ordering
//!
//! - Root first
//! - Then breadth-first by mutation depth
//! - Within a depth: timestamp ascending, then trace id ascending
//!
//! # Integrity
//!
//! A missing root is the only hard failure. Dangling parents, cycles and
//! duplicate trace ids are attached to the chain as `TraceWarning`s so the
//! caller can decide whether a partial chain is acceptable.

mod chain;
mod errors;
mod tracer;

pub use chain::{EpisodeChain, TraceWarning};
pub use errors::{EpisodeError, EpisodeResult};
pub use tracer::build_episode_chain;
