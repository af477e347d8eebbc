//! Per-node trust scoring
//!
//! trust(node at depth d, deepest depth D) = base_trust(node) * decay_rate^(D - d)
//!
//! Nodes at the deepest mutation level carry no decay. Shallower nodes decay
//! geometrically, and siblings at one depth share the same recency factor.

use serde_json::Value;

use crate::record::ForecastRecord;

use super::config::CompressionConfig;

/// Corroboration signals read from a record's metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrustSignals {
    /// Corroborating-evidence count (never negative)
    pub evidence: f64,
    /// External validation flag
    pub validated: bool,
}

impl TrustSignals {
    /// Reads signals from `record.metadata` using the configured keys.
    ///
    /// Evidence may be a number or an array (its length is the count).
    /// Anything else counts as no evidence.
    pub fn from_record(record: &ForecastRecord, config: &CompressionConfig) -> Self {
        let evidence = match record.metadata.get(&config.evidence_key) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0).max(0.0),
            Some(Value::Array(items)) => items.len() as f64,
            _ => 0.0,
        };

        let validated = matches!(
            record.metadata.get(&config.validation_key),
            Some(Value::Bool(true))
        );

        Self {
            evidence,
            validated,
        }
    }

    /// Base trust before recency decay.
    ///
    /// Evidence is normalized to [0, 1] against `evidence_saturation` and
    /// floored at `trust_floor`. Validated nodes are multiplied by
    /// `validation_boost`.
    pub fn base_trust(&self, config: &CompressionConfig) -> f64 {
        let normalized = (self.evidence / config.evidence_saturation)
            .min(1.0)
            .max(config.trust_floor);

        if self.validated {
            normalized * config.validation_boost
        } else {
            normalized
        }
    }
}

/// Recency multiplier for a node at `depth` in a chain whose deepest node
/// sits at `max_depth`.
pub fn recency_factor(depth: usize, max_depth: usize, decay_rate: f64) -> f64 {
    let distance = max_depth.saturating_sub(depth);
    decay_rate.powi(distance.min(i32::MAX as usize) as i32)
}
