//! Per-node memory of admitted label sets.
//!
//! Used by the exact solvers to maintain a Pareto frontier of mutually
//! non-dominated label sets per roadmap node. A candidate is dominated if
//! any previously recorded set for the same node is a subset of it. The
//! record grows monotonically during one search.

use crate::core::LabelSet;

#[derive(Debug)]
pub(crate) struct DominanceRecorder {
    records: Vec<Vec<LabelSet>>,
}

impl DominanceRecorder {
    /// Create an empty recorder for `node_count` nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            records: vec![Vec::new(); node_count],
        }
    }

    /// True iff some recorded set for `id` is a subset of `candidate`.
    pub fn is_dominated(&self, id: usize, candidate: &LabelSet) -> bool {
        self.records[id].iter().any(|s| s.is_subset_of(candidate))
    }

    /// Record an admitted set for `id`.
    pub fn record(&mut self, id: usize, labels: LabelSet) {
        self.records[id].push(labels);
    }

    /// Number of sets recorded for `id`.
    #[cfg(test)]
    pub fn record_count(&self, id: usize) -> usize {
        self.records[id].len()
    }
}
