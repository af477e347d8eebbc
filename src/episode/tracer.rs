//! Episode tracer
//!
//! Reconstructs a deterministic mutation chain from an unordered record set:
//!
//! 1. Index records by trace id (first occurrence wins)
//! 2. Build a parent -> children index in one pass
//! 3. Walk breadth-first from the root, one full level at a time
//! 4. Sort each level by `(timestamp, trace_id)` ascending
//!
//! The resulting order does not depend on input record order. Branches are
//! flattened: every descendant of the root is included.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::record::ForecastRecord;

use super::chain::{EpisodeChain, TraceWarning};
use super::errors::{EpisodeError, EpisodeResult};

/// Builds the ordered mutation chain rooted at `root_trace_id`.
///
/// # Errors
///
/// Returns `EpisodeError::RootNotFound` if no record carries the root id.
/// Dangling parents, cycles and duplicate ids are reported as warnings on
/// the returned chain.
pub fn build_episode_chain(
    records: &[ForecastRecord],
    root_trace_id: &str,
) -> EpisodeResult<EpisodeChain> {
    let mut chain = EpisodeChain::new(root_trace_id);

    let mut by_id: HashMap<&str, &ForecastRecord> = HashMap::with_capacity(records.len());
    for record in records {
        if by_id.contains_key(record.trace_id.as_str()) {
            chain.warn(TraceWarning::DuplicateTrace {
                trace_id: record.trace_id.clone(),
            });
            continue;
        }
        by_id.insert(&record.trace_id, record);
    }

    let root = *by_id
        .get(root_trace_id)
        .ok_or_else(|| EpisodeError::RootNotFound(root_trace_id.to_string()))?;

    let children = index_children(&by_id, root_trace_id, &mut chain);

    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(&root.trace_id);
    chain.push(root.clone(), 0);

    let mut level: Vec<&ForecastRecord> = vec![root];
    let mut depth = 0;

    while !level.is_empty() {
        let mut next: Vec<&ForecastRecord> = Vec::new();

        for node in &level {
            let Some(kids) = children.get(node.trace_id.as_str()) else {
                continue;
            };
            for &child in kids {
                if !visited.insert(&child.trace_id) {
                    chain.warn(TraceWarning::CyclicChain {
                        trace_id: child.trace_id.clone(),
                        parent_trace_id: node.trace_id.clone(),
                    });
                    continue;
                }
                next.push(child);
            }
        }

        next.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.trace_id.cmp(&b.trace_id))
        });

        depth += 1;
        for child in &next {
            chain.push((*child).clone(), depth);
        }
        level = next;
    }

    Ok(chain)
}

/// Builds the parent -> children index and reports dangling parents.
///
/// A missing parent on the root itself is not reported: the root anchors
/// the chain.
fn index_children<'a>(
    by_id: &HashMap<&'a str, &'a ForecastRecord>,
    root_trace_id: &str,
    chain: &mut EpisodeChain,
) -> HashMap<&'a str, Vec<&'a ForecastRecord>> {
    let mut children: HashMap<&str, Vec<&ForecastRecord>> = HashMap::new();
    let mut dangling: BTreeMap<&str, &str> = BTreeMap::new();

    for (&trace_id, &record) in by_id {
        let Some(parent) = record.parent_trace_id.as_deref() else {
            continue;
        };
        if by_id.contains_key(parent) {
            children.entry(parent).or_default().push(record);
        } else if trace_id != root_trace_id {
            dangling.insert(trace_id, parent);
        }
    }

    for kids in children.values_mut() {
        kids.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.trace_id.cmp(&b.trace_id))
        });
    }

    for (trace_id, parent) in dangling {
        chain.warn(TraceWarning::DanglingParent {
            trace_id: trace_id.to_string(),
            parent_trace_id: parent.to_string(),
        });
    }

    children
}
