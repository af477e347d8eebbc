//! Forecast attribute values
//!
//! Numbers are numeric dimensions (probabilities, estimates). Flags and text
//! are categorical dimensions (stance, label).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Value of a single forecast dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Categorical boolean
    Flag(bool),
    /// Numeric estimate
    Number(f64),
    /// Categorical label
    Text(String),
}

/// Sign of a numeric value relative to a pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Positive,
    Negative,
    Neutral,
}

impl AttributeValue {
    /// Returns the numeric value, if this is a numeric dimension.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns true for numeric dimensions.
    pub fn is_numeric(&self) -> bool {
        matches!(self, AttributeValue::Number(_))
    }

    /// Returns true for categorical labels that carry no direction.
    pub fn is_neutral_label(&self) -> bool {
        match self {
            AttributeValue::Text(s) => {
                s.eq_ignore_ascii_case("neutral") || s.eq_ignore_ascii_case("unknown")
            }
            _ => false,
        }
    }

    /// Direction of a numeric value relative to `pivot`.
    ///
    /// Categorical values have no numeric direction and return `None`.
    pub fn direction(&self, pivot: f64) -> Option<Direction> {
        let n = self.as_number()?;
        Some(if n > pivot {
            Direction::Positive
        } else if n < pivot {
            Direction::Negative
        } else {
            Direction::Neutral
        })
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Flag(b) => write!(f, "{}", b),
            AttributeValue::Number(n) => write!(f, "{}", n),
            AttributeValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Number(n)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Flag(b)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}
