//! EpisodeChain - ordered mutation history rooted at one trace
//!
//! Nodes are ordered by mutation depth (root first) and, within equal
//! depth, by `(timestamp, trace_id)` ascending. Every node after the first
//! has a parent that appears earlier in the sequence.
//!
//! This is a data container. Construction lives in `tracer`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::ForecastRecord;

/// Data-integrity problem found while tracing. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceWarning {
    /// Record references a parent that is not in the record set.
    /// Its subtree is excluded from the chain.
    DanglingParent {
        trace_id: String,
        parent_trace_id: String,
    },
    /// Following a parent link would revisit a node already placed.
    /// The repeated subtree is skipped.
    CyclicChain {
        trace_id: String,
        parent_trace_id: String,
    },
    /// A second record carries an already seen trace id. The first wins.
    DuplicateTrace { trace_id: String },
}

impl TraceWarning {
    /// Returns the stable warning code
    pub fn code(&self) -> &'static str {
        match self {
            TraceWarning::DanglingParent { .. } => "ARC_DANGLING_PARENT",
            TraceWarning::CyclicChain { .. } => "ARC_CYCLIC_CHAIN",
            TraceWarning::DuplicateTrace { .. } => "ARC_DUPLICATE_TRACE",
        }
    }

    /// Trace id the warning is about
    pub fn trace_id(&self) -> &str {
        match self {
            TraceWarning::DanglingParent { trace_id, .. }
            | TraceWarning::CyclicChain { trace_id, .. }
            | TraceWarning::DuplicateTrace { trace_id } => trace_id,
        }
    }
}

impl fmt::Display for TraceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceWarning::DanglingParent {
                trace_id,
                parent_trace_id,
            } => write!(
                f,
                "{}: '{}' references missing parent '{}'",
                self.code(),
                trace_id,
                parent_trace_id
            ),
            TraceWarning::CyclicChain {
                trace_id,
                parent_trace_id,
            } => write!(
                f,
                "{}: '{}' under '{}' revisits the chain",
                self.code(),
                trace_id,
                parent_trace_id
            ),
            TraceWarning::DuplicateTrace { trace_id } => {
                write!(f, "{}: duplicate trace id '{}'", self.code(), trace_id)
            }
        }
    }
}

/// Ordered mutation chain descending from `root_trace_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeChain {
    root_trace_id: String,
    nodes: Vec<ForecastRecord>,
    /// Mutation depth of each node, parallel to `nodes`
    depths: Vec<usize>,
    warnings: Vec<TraceWarning>,
}

impl EpisodeChain {
    /// Creates an empty chain for the given root.
    pub fn new(root_trace_id: impl Into<String>) -> Self {
        Self {
            root_trace_id: root_trace_id.into(),
            nodes: Vec::new(),
            depths: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Appends a node at the given mutation depth.
    ///
    /// Structural only. Ordering is the caller's responsibility.
    pub(crate) fn push(&mut self, record: ForecastRecord, depth: usize) {
        self.nodes.push(record);
        self.depths.push(depth);
    }

    pub(crate) fn warn(&mut self, warning: TraceWarning) {
        self.warnings.push(warning);
    }

    #[inline]
    pub fn root_trace_id(&self) -> &str {
        &self.root_trace_id
    }

    /// Nodes in chain order.
    #[inline]
    pub fn nodes(&self) -> &[ForecastRecord] {
        &self.nodes
    }

    /// Mutation depth of each node, parallel to `nodes()`.
    #[inline]
    pub fn depths(&self) -> &[usize] {
        &self.depths
    }

    #[inline]
    pub fn warnings(&self) -> &[TraceWarning] {
        &self.warnings
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Most recent node in chain order.
    pub fn terminal(&self) -> Option<&ForecastRecord> {
        self.nodes.last()
    }

    /// Trace ids in chain order.
    pub fn trace_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.trace_id.clone()).collect()
    }

    /// Deepest mutation depth reached.
    pub fn max_depth(&self) -> usize {
        self.depths.iter().copied().max().unwrap_or(0)
    }
}
