//! Arc stability
//!
//! For each numeric dimension defined on at least two nodes, the population
//! variance of its values across the chain. Chain variance is the mean of
//! those variances, optionally clamped, then inverted:
//!
//! stability = 1 / (1 + variance)
//!
//! Zero variance gives 1.0. Chains with one node, or without any repeated
//! numeric dimension, are 1.0 by convention. Overflowing variances saturate
//! at `f64::MAX`, so stability stays strictly positive.

use std::collections::BTreeMap;

use crate::record::ForecastRecord;

/// Chain-level and per-dimension stability.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcStability {
    pub overall: f64,
    /// Stability of each numeric dimension observed on two or more nodes
    pub per_attribute: BTreeMap<String, f64>,
}

/// Population variance. Returns 0.0 for fewer than two values.
///
/// Magnitudes near `f64::MAX` are rescaled by the largest absolute value
/// before summing. A variance that is still unrepresentable saturates at
/// `f64::MAX`.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let direct = variance_of(values.iter().copied());
    if direct.is_finite() {
        return direct;
    }

    let scale = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if !scale.is_finite() {
        return f64::MAX;
    }
    let scaled = variance_of(values.iter().map(|v| v / scale));
    saturate(scaled * scale * scale)
}

fn variance_of(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let n = values.clone().count() as f64;
    let mean = values.clone().sum::<f64>() / n;
    values.map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}

fn saturate(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        f64::MAX
    }
}

/// Mean of per-dimension variances, saturating instead of overflowing.
fn mean_variance(variances: &[f64]) -> f64 {
    let n = variances.len() as f64;
    let sum: f64 = variances.iter().sum();
    if sum.is_finite() {
        sum / n
    } else {
        saturate(variances.iter().map(|v| v / n).sum())
    }
}

fn invert(variance: f64, clamp: Option<f64>) -> f64 {
    let v = saturate(variance);
    let v = match clamp {
        Some(ceiling) => v.min(ceiling),
        None => v,
    };
    1.0 / (1.0 + v)
}

/// Computes arc stability over `nodes` in chain order.
pub fn arc_stability(nodes: &[ForecastRecord], variance_clamp: Option<f64>) -> ArcStability {
    let mut series: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for node in nodes {
        for (name, value) in &node.attributes {
            if let Some(n) = value.as_number() {
                series.entry(name.as_str()).or_default().push(n);
            }
        }
    }

    let mut per_attribute = BTreeMap::new();
    let mut variances = Vec::new();

    for (name, values) in &series {
        if values.len() < 2 {
            continue;
        }
        let variance = population_variance(values);
        per_attribute.insert(name.to_string(), invert(variance, variance_clamp));
        variances.push(variance);
    }

    let overall = if nodes.len() <= 1 || variances.is_empty() {
        1.0
    } else {
        invert(mean_variance(&variances), variance_clamp)
    };

    ArcStability {
        overall,
        per_attribute,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, p: f64) -> ForecastRecord {
        ForecastRecord::new(id, 0).with_attribute("p", p)
    }

    #[test]
    fn test_population_variance() {
        assert_eq!(population_variance(&[]), 0.0);
        assert_eq!(population_variance(&[3.0]), 0.0);
        assert_eq!(population_variance(&[1.0, 3.0]), 1.0);
        assert_eq!(population_variance(&[2.0, 2.0, 2.0]), 0.0);
    }

    #[test]
    fn test_single_node_is_stable() {
        let result = arc_stability(&[node("A", 0.9)], None);
        assert_eq!(result.overall, 1.0);
        assert!(result.per_attribute.is_empty());
    }

    #[test]
    fn test_constant_values_are_stable() {
        let nodes = [node("A", 0.5), node("B", 0.5), node("C", 0.5)];
        let result = arc_stability(&nodes, None);
        assert_eq!(result.overall, 1.0);
        assert_eq!(result.per_attribute["p"], 1.0);
    }

    #[test]
    fn test_high_variance_lowers_stability() {
        let nodes = [node("A", -10.0), node("B", 10.0)];
        let result = arc_stability(&nodes, None);
        // variance 100
        assert!((result.overall - 1.0 / 101.0).abs() < 1e-12);
    }

    #[test]
    fn test_extreme_magnitudes_stay_in_range() {
        let identical = [node("A", 1e308), node("B", 1e308)];
        let result = arc_stability(&identical, None);
        assert_eq!(result.overall, 1.0);

        let opposed = [node("A", 1e200), node("B", -1e200)];
        let result = arc_stability(&opposed, None);
        assert!(result.overall > 0.0 && result.overall <= 1.0);
        assert!(result.per_attribute["p"] > 0.0);

        let clamped = arc_stability(&opposed, Some(3.0));
        assert_eq!(clamped.overall, 0.25);
    }

    #[test]
    fn test_variance_saturates() {
        assert_eq!(population_variance(&[f64::MAX, -f64::MAX]), f64::MAX);
        assert_eq!(population_variance(&[1e308, 1e308]), 0.0);
        assert_eq!(mean_variance(&[f64::MAX, f64::MAX]), f64::MAX);
    }

    #[test]
    fn test_clamp_bounds_instability() {
        let nodes = [node("A", -10.0), node("B", 10.0)];
        let result = arc_stability(&nodes, Some(1.0));
        assert_eq!(result.overall, 0.5);
        assert_eq!(result.per_attribute["p"], 0.5);
    }

    #[test]
    fn test_categorical_dimensions_ignored() {
        let nodes = [
            ForecastRecord::new("A", 0).with_attribute("stance", "up"),
            ForecastRecord::new("B", 0).with_attribute("stance", "down"),
        ];
        let result = arc_stability(&nodes, None);
        assert_eq!(result.overall, 1.0);
        assert!(result.per_attribute.is_empty());
    }

    #[test]
    fn test_mean_over_dimensions() {
        let nodes = [
            ForecastRecord::new("A", 0)
                .with_attribute("p", 1.0)
                .with_attribute("q", 0.0),
            ForecastRecord::new("B", 0)
                .with_attribute("p", 3.0)
                .with_attribute("q", 0.0),
        ];
        // p variance 1, q variance 0, mean 0.5
        let result = arc_stability(&nodes, None);
        assert!((result.overall - 1.0 / 1.5).abs() < 1e-12);
    }
}
