//! ForecastRecord definition

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{AttributeValue, Timestamp};

/// Named forecast dimensions.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// Auxiliary scoring signals (evidence count, validation flag, rule tags).
pub type Metadata = BTreeMap<String, Value>;

/// One raw, immutable snapshot of a forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    /// Unique identifier for this snapshot
    pub trace_id: String,

    /// Snapshot this one mutated from; absent for an origin snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_trace_id: Option<String>,

    #[serde(default)]
    pub timestamp: Timestamp,

    /// Null-valued dimensions are dropped on load
    #[serde(default, deserialize_with = "deserialize_attributes")]
    pub attributes: Attributes,

    #[serde(default)]
    pub metadata: Metadata,
}

impl ForecastRecord {
    /// Creates an origin record with no attributes.
    pub fn new(trace_id: impl Into<String>, timestamp: i64) -> Self {
        Self {
            trace_id: trace_id.into(),
            parent_trace_id: None,
            timestamp: Timestamp::from(timestamp),
            attributes: Attributes::new(),
            metadata: Metadata::new(),
        }
    }

    /// Sets the parent link.
    pub fn with_parent(mut self, parent_trace_id: impl Into<String>) -> Self {
        self.parent_trace_id = Some(parent_trace_id.into());
        self
    }

    /// Adds a forecast dimension.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Adds a metadata signal.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Returns true if this record has no parent link.
    pub fn is_origin(&self) -> bool {
        self.parent_trace_id.is_none()
    }
}

fn deserialize_attributes<'de, D>(deserializer: D) -> Result<Attributes, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, Option<AttributeValue>> = BTreeMap::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect())
}
