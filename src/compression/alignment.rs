//! Directional alignment against the terminal node
//!
//! Per dimension shared by both nodes:
//! - 1.0 exact directional match
//! - 0.0 opposite direction
//! - 0.5 neutral or unknown
//!
//! The node score is the mean over shared dimensions. Nodes sharing no
//! dimension with the terminal score 0.5.

use crate::record::{AttributeValue, Attributes, Direction};

use super::config::CompressionConfig;

const MATCH: f64 = 1.0;
const OPPOSED: f64 = 0.0;
const NEUTRAL: f64 = 0.5;

/// Alignment of one dimension value against the terminal value.
pub fn dimension_alignment(value: &AttributeValue, terminal: &AttributeValue, pivot: f64) -> f64 {
    if value.is_neutral_label() || terminal.is_neutral_label() {
        return NEUTRAL;
    }

    match (value, terminal) {
        (AttributeValue::Number(_), AttributeValue::Number(_)) => {
            match (value.direction(pivot), terminal.direction(pivot)) {
                (Some(Direction::Neutral), _) | (_, Some(Direction::Neutral)) => NEUTRAL,
                (Some(a), Some(b)) if a == b => MATCH,
                (Some(_), Some(_)) => OPPOSED,
                _ => NEUTRAL,
            }
        }
        (AttributeValue::Flag(a), AttributeValue::Flag(b)) => {
            if a == b {
                MATCH
            } else {
                OPPOSED
            }
        }
        (AttributeValue::Text(a), AttributeValue::Text(b)) => {
            if a == b {
                MATCH
            } else {
                OPPOSED
            }
        }
        // Mixed kinds carry no comparable direction
        _ => NEUTRAL,
    }
}

/// Mean alignment of `node` against `terminal` over shared dimensions.
pub fn node_alignment(node: &Attributes, terminal: &Attributes, config: &CompressionConfig) -> f64 {
    let mut total = 0.0;
    let mut shared = 0usize;

    for (name, value) in node {
        if let Some(terminal_value) = terminal.get(name) {
            total += dimension_alignment(value, terminal_value, config.pivot_for(name));
            shared += 1;
        }
    }

    if shared == 0 {
        NEUTRAL
    } else {
        total / shared as f64
    }
}
