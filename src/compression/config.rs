//! Compression configuration
//!
//! Loaded from a JSON file. Every field is optional; omitted fields take the
//! defaults below.
//!
//! ```json
//! {
//!   "decay_rate": 0.85,
//!   "validation_boost": 1.5,
//!   "variance_clamp": 4.0,
//!   "attribute_pivots": { "p": 0.5 }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CompressionError, CompressionResult};

/// Scoring policy for the mutation compression engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompressionConfig {
    /// Recency decay per mutation level, in (0, 1]
    #[serde(default = "default_decay_rate")]
    pub decay_rate: f64,

    /// Multiplier on base trust for externally validated nodes
    #[serde(default = "default_validation_boost")]
    pub validation_boost: f64,

    /// Optional ceiling on chain variance before inversion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variance_clamp: Option<f64>,

    /// Evidence count that normalizes to 1.0
    #[serde(default = "default_evidence_saturation")]
    pub evidence_saturation: f64,

    /// Minimum normalized evidence score, in [0, 1]
    #[serde(default = "default_trust_floor")]
    pub trust_floor: f64,

    /// Numeric values above the pivot point one way, below it the other
    #[serde(default)]
    pub default_pivot: f64,

    /// Per-dimension pivot overrides
    #[serde(default)]
    pub attribute_pivots: BTreeMap<String, f64>,

    /// Metadata key carrying the corroborating-evidence count
    #[serde(default = "default_evidence_key")]
    pub evidence_key: String,

    /// Metadata key carrying the external-validation flag
    #[serde(default = "default_validation_key")]
    pub validation_key: String,
}

fn default_decay_rate() -> f64 {
    0.85
}
fn default_validation_boost() -> f64 {
    1.5
}
fn default_evidence_saturation() -> f64 {
    5.0
}
fn default_trust_floor() -> f64 {
    0.1
}
fn default_evidence_key() -> String {
    "corroborating_evidence".to_string()
}
fn default_validation_key() -> String {
    "externally_validated".to_string()
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            decay_rate: default_decay_rate(),
            validation_boost: default_validation_boost(),
            variance_clamp: None,
            evidence_saturation: default_evidence_saturation(),
            trust_floor: default_trust_floor(),
            default_pivot: 0.0,
            attribute_pivots: BTreeMap::new(),
            evidence_key: default_evidence_key(),
            validation_key: default_validation_key(),
        }
    }
}

impl CompressionConfig {
    /// Load configuration from a JSON file and validate it.
    pub fn load(path: &Path) -> CompressionResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CompressionError::ConfigIo(format!("{}: {}", path.display(), e))
        })?;

        let config: CompressionConfig = serde_json::from_str(&content)
            .map_err(|e| CompressionError::InvalidConfig(format!("invalid JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Sets the decay rate.
    pub fn with_decay_rate(mut self, decay_rate: f64) -> Self {
        self.decay_rate = decay_rate;
        self
    }

    /// Sets the validation boost.
    pub fn with_validation_boost(mut self, boost: f64) -> Self {
        self.validation_boost = boost;
        self
    }

    /// Sets the variance ceiling.
    pub fn with_variance_clamp(mut self, clamp: f64) -> Self {
        self.variance_clamp = Some(clamp);
        self
    }

    /// Sets a per-dimension pivot.
    pub fn with_pivot(mut self, attribute: impl Into<String>, pivot: f64) -> Self {
        self.attribute_pivots.insert(attribute.into(), pivot);
        self
    }

    /// Pivot used to derive the direction of a numeric dimension.
    pub fn pivot_for(&self, attribute: &str) -> f64 {
        self.attribute_pivots
            .get(attribute)
            .copied()
            .unwrap_or(self.default_pivot)
    }

    /// Validate all options. Called before any scoring.
    pub fn validate(&self) -> CompressionResult<()> {
        if !(self.decay_rate.is_finite() && self.decay_rate > 0.0 && self.decay_rate <= 1.0) {
            return Err(CompressionError::InvalidConfig(format!(
                "decay_rate must be in (0, 1], got {}",
                self.decay_rate
            )));
        }

        if !(self.validation_boost.is_finite() && self.validation_boost > 0.0) {
            return Err(CompressionError::InvalidConfig(format!(
                "validation_boost must be > 0, got {}",
                self.validation_boost
            )));
        }

        if let Some(clamp) = self.variance_clamp {
            if !(clamp.is_finite() && clamp > 0.0) {
                return Err(CompressionError::InvalidConfig(format!(
                    "variance_clamp must be > 0, got {}",
                    clamp
                )));
            }
        }

        if !(self.evidence_saturation.is_finite() && self.evidence_saturation > 0.0) {
            return Err(CompressionError::InvalidConfig(format!(
                "evidence_saturation must be > 0, got {}",
                self.evidence_saturation
            )));
        }

        if !(0.0..=1.0).contains(&self.trust_floor) {
            return Err(CompressionError::InvalidConfig(format!(
                "trust_floor must be in [0, 1], got {}",
                self.trust_floor
            )));
        }

        if !self.default_pivot.is_finite() {
            return Err(CompressionError::InvalidConfig(
                "default_pivot must be finite".to_string(),
            ));
        }

        if let Some((name, _)) = self.attribute_pivots.iter().find(|(_, p)| !p.is_finite()) {
            return Err(CompressionError::InvalidConfig(format!(
                "pivot for '{}' must be finite",
                name
            )));
        }

        if self.evidence_key.is_empty() || self.validation_key.is_empty() {
            return Err(CompressionError::InvalidConfig(
                "metadata keys must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
