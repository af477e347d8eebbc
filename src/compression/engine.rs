//! Mutation compression engine
//!
//! Reduces an `EpisodeChain` to one `CompressedForecast`:
//!
//! 1. Score every node: trust (depth recency x corroboration) and alignment
//!    (direction agreement with the terminal node)
//! 2. Composite weight = trust * alignment, normalized to sum to 1
//! 3. Numeric dimensions: weighted mean over defining nodes
//! 4. Categorical dimensions: value of the heaviest defining node
//! 5. Composite trust: weighted mean of trust
//! 6. Arc stability: inverse mean variance of numeric dimensions
//!
//! Pure and deterministic. All accumulation runs in chain order and all
//! maps are ordered, so identical input yields bit-identical output.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

use crate::episode::EpisodeChain;
use crate::record::{AttributeValue, Attributes, ForecastRecord};

use super::alignment::node_alignment;
use super::config::CompressionConfig;
use super::errors::{CompressionError, CompressionResult};
use super::forecast::{CompressedForecast, NodeScore, Provenance};
use super::stability::arc_stability;
use super::trust::{recency_factor, TrustSignals};

/// Compresses episode chains under a fixed, validated configuration.
///
/// Holds no mutable state; one compressor may be shared across threads.
#[derive(Debug, Clone)]
pub struct MutationCompressor {
    config: CompressionConfig,
}

impl MutationCompressor {
    /// Creates a compressor after validating `config`.
    pub fn new(config: CompressionConfig) -> CompressionResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CompressionConfig {
        &self.config
    }

    /// Compresses `chain` into its canonical forecast.
    ///
    /// # Errors
    ///
    /// Returns `CompressionError::EmptyChain` if the chain has no nodes.
    pub fn compress(&self, chain: &EpisodeChain) -> CompressionResult<CompressedForecast> {
        let nodes = chain.nodes();
        let terminal = chain
            .terminal()
            .ok_or_else(|| CompressionError::EmptyChain(chain.root_trace_id().to_string()))?;

        let mut scores = self.score_nodes(chain, terminal);
        let terminal_fallback = normalize_weights(&mut scores);
        let weights: Vec<f64> = scores.iter().map(|s| s.weight).collect();

        let canonical_attributes = canonical_attributes(nodes, &weights);

        let composite_trust = scores
            .iter()
            .fold(0.0, |acc, s| acc + s.weight * s.trust);

        let stability = arc_stability(nodes, self.config.variance_clamp);

        let provenance = Provenance {
            chain_fingerprint: chain_fingerprint(nodes),
            nodes: scores,
            attribute_stability: stability.per_attribute,
            terminal_fallback,
            warnings: chain.warnings().to_vec(),
            config: self.config.clone(),
        };

        Ok(CompressedForecast::new(
            chain.root_trace_id().to_string(),
            canonical_attributes,
            chain.trace_ids(),
            composite_trust,
            stability.overall,
            provenance,
        ))
    }

    /// Raw scores; `weight` holds the unnormalized trust * alignment.
    fn score_nodes(&self, chain: &EpisodeChain, terminal: &ForecastRecord) -> Vec<NodeScore> {
        let max_depth = chain.max_depth();

        chain
            .nodes()
            .iter()
            .zip(chain.depths())
            .enumerate()
            .map(|(position, (node, &depth))| {
                let signals = TrustSignals::from_record(node, &self.config);
                let base_trust = signals.base_trust(&self.config);
                let trust =
                    base_trust * recency_factor(depth, max_depth, self.config.decay_rate);
                let alignment =
                    node_alignment(&node.attributes, &terminal.attributes, &self.config);

                NodeScore {
                    trace_id: node.trace_id.clone(),
                    position,
                    depth,
                    validated: signals.validated,
                    base_trust,
                    trust,
                    alignment,
                    weight: trust * alignment,
                }
            })
            .collect()
    }
}

/// Compresses `chain` under `config`.
///
/// Convenience wrapper over `MutationCompressor`.
pub fn compress_episode_chain(
    chain: &EpisodeChain,
    config: &CompressionConfig,
) -> CompressionResult<CompressedForecast> {
    MutationCompressor::new(config.clone())?.compress(chain)
}

/// Normalizes raw weights to sum to 1.
///
/// If no node carries positive weight, the terminal node takes weight 1.0.
/// Returns true when that fallback applied.
fn normalize_weights(scores: &mut [NodeScore]) -> bool {
    let total = scores.iter().fold(0.0, |acc, s| acc + s.weight);

    if total > 0.0 && total.is_finite() {
        for score in scores.iter_mut() {
            score.weight /= total;
        }
        return false;
    }

    let last = scores.len().saturating_sub(1);
    for (i, score) in scores.iter_mut().enumerate() {
        score.weight = if i == last { 1.0 } else { 0.0 };
    }
    true
}

/// Aggregates every dimension seen on any node.
///
/// A dimension whose defining values are all numeric is averaged; any other
/// dimension is treated as categorical.
fn canonical_attributes(nodes: &[ForecastRecord], weights: &[f64]) -> Attributes {
    let mut defined: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (i, node) in nodes.iter().enumerate() {
        for name in node.attributes.keys() {
            defined.entry(name.as_str()).or_default().push(i);
        }
    }

    let mut canonical = Attributes::new();
    for (name, holders) in defined {
        let all_numeric = holders
            .iter()
            .all(|&i| nodes[i].attributes[name].is_numeric());

        let value = if all_numeric {
            weighted_mean(nodes, weights, name, &holders)
        } else {
            heaviest_value(nodes, weights, name, &holders)
        };
        canonical.insert(name.to_string(), value);
    }
    canonical
}

fn weighted_mean(
    nodes: &[ForecastRecord],
    weights: &[f64],
    name: &str,
    holders: &[usize],
) -> AttributeValue {
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for &i in holders {
        if let Some(v) = nodes[i].attributes[name].as_number() {
            numerator += weights[i] * v;
            denominator += weights[i];
        }
    }

    if denominator > 0.0 {
        AttributeValue::Number(numerator / denominator)
    } else {
        // Every holder has zero weight: fall back to the most recent holder
        let last = holders[holders.len() - 1];
        nodes[last].attributes[name].clone()
    }
}

/// Value held by the heaviest node. Ties: later timestamp, then greater
/// trace id.
fn heaviest_value(
    nodes: &[ForecastRecord],
    weights: &[f64],
    name: &str,
    holders: &[usize],
) -> AttributeValue {
    let best = holders
        .iter()
        .copied()
        .max_by(|&a, &b| {
            weights[a]
                .total_cmp(&weights[b])
                .then_with(|| nodes[a].timestamp.cmp(&nodes[b].timestamp))
                .then_with(|| nodes[a].trace_id.cmp(&nodes[b].trace_id))
        })
        .unwrap_or(holders[holders.len() - 1]);

    nodes[best].attributes[name].clone()
}

/// SHA-256 over trace ids in chain order, newline terminated.
fn chain_fingerprint(nodes: &[ForecastRecord]) -> String {
    let mut hasher = Sha256::new();
    for node in nodes {
        hasher.update(node.trace_id.as_bytes());
        hasher.update(b"\n");
    }
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
