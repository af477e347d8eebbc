//! CompressedForecast - canonical output of the compression engine
//!
//! Produced once per compression call and immutable afterwards. Serializes
//! to the exported JSON artifact:
//!
//! ```json
//! {
//!   "root_trace_id": "A",
//!   "canonical_attributes": { "p": 0.58 },
//!   "contributing_trace_ids": ["A", "B", "C"],
//!   "composite_trust": 0.084,
//!   "arc_stability": 0.997,
//!   "provenance": { ... }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::episode::TraceWarning;
use crate::record::Attributes;

use super::config::CompressionConfig;

/// Scores computed for one chain node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeScore {
    pub trace_id: String,
    /// Index in chain order
    pub position: usize,
    /// Mutation depth below the root
    pub depth: usize,
    pub validated: bool,
    pub base_trust: f64,
    /// Base trust after recency decay
    pub trust: f64,
    pub alignment: f64,
    /// Normalized composite weight; 0.0 means no influence
    pub weight: f64,
}

/// How the compressed forecast was derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    /// SHA-256 over the ordered trace ids
    pub chain_fingerprint: String,
    /// One entry per node, in chain order
    pub nodes: Vec<NodeScore>,
    pub attribute_stability: BTreeMap<String, f64>,
    /// Every raw weight was zero and the terminal node took weight 1.0
    pub terminal_fallback: bool,
    pub warnings: Vec<TraceWarning>,
    pub config: CompressionConfig,
}

/// Single canonical forecast for an episode chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressedForecast {
    root_trace_id: String,
    canonical_attributes: Attributes,
    contributing_trace_ids: Vec<String>,
    composite_trust: f64,
    arc_stability: f64,
    provenance: Provenance,
}

impl CompressedForecast {
    pub(crate) fn new(
        root_trace_id: String,
        canonical_attributes: Attributes,
        contributing_trace_ids: Vec<String>,
        composite_trust: f64,
        arc_stability: f64,
        provenance: Provenance,
    ) -> Self {
        Self {
            root_trace_id,
            canonical_attributes,
            contributing_trace_ids,
            composite_trust,
            arc_stability,
            provenance,
        }
    }

    #[inline]
    pub fn root_trace_id(&self) -> &str {
        &self.root_trace_id
    }

    #[inline]
    pub fn canonical_attributes(&self) -> &Attributes {
        &self.canonical_attributes
    }

    /// Every chain node's trace id, in chain order.
    #[inline]
    pub fn contributing_trace_ids(&self) -> &[String] {
        &self.contributing_trace_ids
    }

    #[inline]
    pub fn composite_trust(&self) -> f64 {
        self.composite_trust
    }

    #[inline]
    pub fn arc_stability(&self) -> f64 {
        self.arc_stability
    }

    #[inline]
    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// Scores for the node with the given trace id.
    pub fn node_score(&self, trace_id: &str) -> Option<&NodeScore> {
        self.provenance.nodes.iter().find(|n| n.trace_id == trace_id)
    }

    /// Composite weight of the node with the given trace id.
    pub fn weight_of(&self, trace_id: &str) -> Option<f64> {
        self.node_score(trace_id).map(|n| n.weight)
    }
}
