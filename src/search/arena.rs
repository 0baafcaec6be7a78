//! Arena storage for search nodes.
//!
//! Every node created during a search lives in one index-addressed vector
//! owned by that search. Parent links are arena indices, so discarding a
//! stale frontier entry is a no-op and the whole expansion is released in
//! bulk when the arena drops. Parent chains are acyclic by construction
//! (a node is always created from an already-accepted parent) and
//! terminate at the seed.

use crate::core::LabelSet;

/// Index of a node within its [`NodeArena`].
pub(crate) type NodeIndex = usize;

/// One candidate expansion. Immutable after creation.
#[derive(Clone, Debug)]
pub(crate) struct SearchNode {
    /// Roadmap node id.
    pub id: usize,
    /// Cost from the start along this candidate's path.
    pub g: f32,
    /// Heuristic estimate to the remaining goals.
    pub h: f32,
    /// `g + h`.
    pub f: f32,
    /// Labels accumulated along the path prefix.
    pub labels: LabelSet,
    /// Survival probability of the label set (max-success variants).
    pub survival: f32,
    /// Goal hypotheses still reachable (max-success variants).
    pub hypotheses: Vec<u32>,
    /// Best-case reach probability among `hypotheses`.
    pub reachability: f32,
    /// `survival * reachability`.
    pub success: f32,
    /// True for a goal-candidate copy of a physical goal node.
    pub is_goal: bool,
    /// Back-reference into the arena; `None` only for the seed.
    pub parent: Option<NodeIndex>,
}

impl SearchNode {
    /// Create a plain node with cost and heuristic; other fields default.
    pub fn new(id: usize, g: f32, h: f32) -> Self {
        Self {
            id,
            g,
            h,
            f: g + h,
            labels: LabelSet::new(),
            survival: 1.0,
            hypotheses: Vec::new(),
            reachability: 0.0,
            success: 0.0,
            is_goal: false,
            parent: None,
        }
    }

    /// Attach the accumulated label set.
    pub fn with_labels(mut self, labels: LabelSet) -> Self {
        self.labels = labels;
        self
    }

    /// Attach survival and reachability; recomputes the success value.
    pub fn with_risk(mut self, survival: f32, reachability: f32) -> Self {
        self.survival = survival;
        self.reachability = reachability;
        self.success = survival * reachability;
        self
    }

    /// Attach the remaining goal hypotheses.
    pub fn with_hypotheses(mut self, hypotheses: Vec<u32>) -> Self {
        self.hypotheses = hypotheses;
        self
    }

    /// Mark as a goal-candidate copy.
    pub fn as_goal(mut self) -> Self {
        self.is_goal = true;
        self
    }
}

/// Owns every node created during one search.
#[derive(Debug, Default)]
pub(crate) struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Store a node and return its index.
    pub fn push(&mut self, node: SearchNode) -> NodeIndex {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn get(&self, index: NodeIndex) -> &SearchNode {
        &self.nodes[index]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Follow parent links from `from` back to the seed, returning roadmap
    /// node ids in start -> goal order.
    pub fn backtrack(&self, from: NodeIndex) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = Some(from);
        while let Some(index) = current {
            let node = &self.nodes[index];
            path.push(node.id);
            current = node.parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_backtrack() {
        let mut arena = NodeArena::new();
        let a = arena.push(SearchNode::new(0, 0.0, 2.0));
        let mut n1 = SearchNode::new(1, 1.0, 1.0);
        n1.parent = Some(a);
        let b = arena.push(n1);
        let mut n2 = SearchNode::new(3, 2.0, 0.0);
        n2.parent = Some(b);
        let c = arena.push(n2);

        assert_eq!(arena.len(), 3);
        assert_eq!(arena.backtrack(c), vec![0, 1, 3]);
        assert_eq!(arena.backtrack(a), vec![0]);
    }

    #[test]
    fn test_node_builders() {
        let node = SearchNode::new(4, 1.5, 0.5)
            .with_labels(LabelSet::from_labels(vec![2, 1]))
            .with_risk(0.8, 0.5)
            .with_hypotheses(vec![1, 2])
            .as_goal();
        assert_eq!(node.f, 2.0);
        assert_eq!(node.labels.as_slice(), &[1, 2]);
        assert!((node.success - 0.4).abs() < 1e-6);
        assert!(node.is_goal);
    }
}
