//! Episode Tracing Tests
//!
//! Tests for tracer invariants:
//! - Chain order is deterministic and independent of input order
//! - Every node after the first has an earlier parent in the chain
//! - Branches are flattened breadth-first, all descendants included
//! - Missing root fails; integrity problems become warnings

use forecast_arc::episode::{build_episode_chain, EpisodeError, TraceWarning};
use forecast_arc::record::ForecastRecord;

// =============================================================================
// Helper Functions
// =============================================================================

fn branching_records() -> Vec<ForecastRecord> {
    vec![
        ForecastRecord::new("root", 10),
        ForecastRecord::new("c2", 30).with_parent("root"),
        ForecastRecord::new("c1", 20).with_parent("root"),
        ForecastRecord::new("g1", 40).with_parent("c2"),
        ForecastRecord::new("g2", 35).with_parent("c1"),
        ForecastRecord::new("g3", 35).with_parent("c2"),
        ForecastRecord::new("unrelated", 5),
    ]
}

/// Deterministic permutation without a RNG
fn rotate(records: &[ForecastRecord], by: usize) -> Vec<ForecastRecord> {
    let mut out = records.to_vec();
    out.rotate_left(by % records.len());
    out
}

// =============================================================================
// Ordering
// =============================================================================

/// Breadth-first by depth, then timestamp, then trace id.
#[test]
fn test_branching_order() {
    let chain = build_episode_chain(&branching_records(), "root").unwrap();

    assert_eq!(
        chain.trace_ids(),
        vec!["root", "c1", "c2", "g2", "g3", "g1"]
    );
    assert_eq!(chain.depths(), &[0, 1, 1, 2, 2, 2]);
}

/// Every node after the first has its parent earlier in the chain.
#[test]
fn test_parent_precedes_child() {
    let chain = build_episode_chain(&branching_records(), "root").unwrap();
    let ids = chain.trace_ids();

    for (i, node) in chain.nodes().iter().enumerate().skip(1) {
        let parent = node.parent_trace_id.as_deref().unwrap();
        let parent_pos = ids.iter().position(|id| id == parent).unwrap();
        assert!(parent_pos < i, "{} appears before its parent", node.trace_id);
    }
}

/// Same records in any order produce the same chain.
#[test]
fn test_order_independent_of_input() {
    let records = branching_records();
    let expected = build_episode_chain(&records, "root").unwrap();

    for shift in 1..records.len() {
        let chain = build_episode_chain(&rotate(&records, shift), "root").unwrap();
        assert_eq!(chain, expected, "differs at rotation {}", shift);
    }
}

/// Repeated calls are identical.
#[test]
fn test_repeated_calls_identical() {
    let records = branching_records();
    let first = build_episode_chain(&records, "root").unwrap();
    for _ in 0..50 {
        assert_eq!(build_episode_chain(&records, "root").unwrap(), first);
    }
}

/// Unrelated origins never leak into the chain.
#[test]
fn test_unrelated_records_excluded() {
    let chain = build_episode_chain(&branching_records(), "root").unwrap();
    assert!(!chain.trace_ids().contains(&"unrelated".to_string()));
}

// =============================================================================
// Failure and Warnings
// =============================================================================

/// Unknown root fails with RootNotFound.
#[test]
fn test_missing_root() {
    for records in [vec![], branching_records()] {
        let err = build_episode_chain(&records, "unknown-id").unwrap_err();
        assert_eq!(err, EpisodeError::RootNotFound("unknown-id".to_string()));
        assert_eq!(err.code(), "ARC_ROOT_NOT_FOUND");
    }
}

/// A cycle through the root truncates and warns; the chain stays usable.
#[test]
fn test_cycle_warns_and_truncates() {
    let records = vec![
        ForecastRecord::new("A", 1).with_parent("D"),
        ForecastRecord::new("B", 2).with_parent("A"),
        ForecastRecord::new("C", 3).with_parent("B"),
        ForecastRecord::new("D", 4).with_parent("C"),
    ];

    let chain = build_episode_chain(&records, "A").unwrap();
    assert_eq!(chain.trace_ids(), vec!["A", "B", "C", "D"]);
    assert!(chain
        .warnings()
        .iter()
        .any(|w| matches!(w, TraceWarning::CyclicChain { trace_id, .. } if trace_id == "A")));
}

/// Records under a dangling parent are excluded and reported.
#[test]
fn test_dangling_parent_subtree_excluded() {
    let mut records = branching_records();
    records.push(ForecastRecord::new("orphan", 50).with_parent("deleted"));
    records.push(ForecastRecord::new("orphan-child", 60).with_parent("orphan"));

    let chain = build_episode_chain(&records, "root").unwrap();
    assert_eq!(chain.len(), 6);
    assert_eq!(chain.warnings().len(), 1);
    assert_eq!(chain.warnings()[0].code(), "ARC_DANGLING_PARENT");
    assert_eq!(chain.warnings()[0].trace_id(), "orphan");
}
