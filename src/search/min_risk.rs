//! Minimum-constraint-removal search: minimize how many uncertain
//! obstacles a path must assume absent.
//!
//! Both variants order the frontier by label cardinality first and travel
//! cost second. The greedy variant keeps one best record per node, which
//! is fast but can commit to a label set that blocks the true optimum;
//! the exact variant keeps every non-dominated label set per node and is
//! guaranteed to accept a minimum-cardinality path first.

use std::collections::HashMap;

use log::{debug, info, warn};

use super::arena::SearchNode;
use super::dominance::DominanceRecorder;
use super::engine::{self, Strategy};
use super::{trajectory_of, SearchOutcome};
use crate::graph::{Edge, Roadmap};
use crate::heuristic::GoalCentroidHeuristic;

struct GreedyStrategy<'a> {
    heuristic: &'a GoalCentroidHeuristic,
    goal_set: &'a [usize],
    smallest_card: Vec<usize>,
    g_best: Vec<f32>,
    expanded: Vec<bool>,
}

impl Strategy for GreedyStrategy<'_> {
    type Key = (usize, f32, f32);

    fn key(&self, node: &SearchNode) -> Self::Key {
        (node.labels.len(), node.f, node.h)
    }

    fn is_stale(&self, node: &SearchNode) -> bool {
        self.expanded[node.id]
    }

    fn settle(&mut self, node: &SearchNode) {
        self.expanded[node.id] = true;
    }

    fn is_goal(&self, node: &SearchNode) -> bool {
        self.goal_set.contains(&node.id)
    }

    fn relax(
        &mut self,
        _graph: &Roadmap,
        current: &SearchNode,
        edge: &Edge,
        admitted: &mut Vec<SearchNode>,
    ) {
        if self.expanded[edge.to] {
            return;
        }
        let labels = current.labels.union(&edge.labels);
        let card = labels.len();
        let g = self.g_best[current.id] + edge.cost;

        // Admit on a strictly smaller cardinality, or on a tied
        // cardinality with a strictly cheaper path.
        if card < self.smallest_card[edge.to]
            || (card == self.smallest_card[edge.to] && g < self.g_best[edge.to])
        {
            self.smallest_card[edge.to] = card;
            self.g_best[edge.to] = g;
            admitted.push(
                SearchNode::new(edge.to, g, self.heuristic.estimate(edge.to)).with_labels(labels),
            );
        }
    }
}

struct ExactStrategy<'a> {
    heuristic: &'a GoalCentroidHeuristic,
    goal_set: &'a [usize],
    recorder: DominanceRecorder,
}

impl Strategy for ExactStrategy<'_> {
    type Key = (usize, f32, f32);

    fn key(&self, node: &SearchNode) -> Self::Key {
        (node.labels.len(), node.f, node.h)
    }

    fn is_goal(&self, node: &SearchNode) -> bool {
        self.goal_set.contains(&node.id)
    }

    fn relax(
        &mut self,
        _graph: &Roadmap,
        current: &SearchNode,
        edge: &Edge,
        admitted: &mut Vec<SearchNode>,
    ) {
        let labels = current.labels.union(&edge.labels);
        if self.recorder.is_dominated(edge.to, &labels) {
            return;
        }
        self.recorder.record(edge.to, labels.clone());
        let g = current.g + edge.cost;
        admitted
            .push(SearchNode::new(edge.to, g, self.heuristic.estimate(edge.to)).with_labels(labels));
    }
}

/// Greedy minimum-constraint-removal search.
pub struct MinRiskGreedySolver<'a> {
    graph: &'a Roadmap,
    start: usize,
    goal_set: Vec<usize>,
    goal_poses: HashMap<usize, u32>,
    heuristic: GoalCentroidHeuristic,
}

impl<'a> MinRiskGreedySolver<'a> {
    pub fn new(graph: &'a Roadmap, start: usize, goal_set: Vec<usize>) -> Self {
        let goal_poses = goal_set
            .iter()
            .copied()
            .zip(graph.target_poses().iter().copied())
            .collect();
        let heuristic = GoalCentroidHeuristic::new(graph, &goal_set);
        Self {
            graph,
            start,
            goal_set,
            goal_poses,
            heuristic,
        }
    }

    pub fn search(&self) -> SearchOutcome {
        let n = self.graph.node_count();
        let mut strategy = GreedyStrategy {
            heuristic: &self.heuristic,
            goal_set: &self.goal_set,
            smallest_card: vec![usize::MAX; n],
            g_best: vec![f32::INFINITY; n],
            expanded: vec![false; n],
        };
        strategy.smallest_card[self.start] = 0;
        strategy.g_best[self.start] = 0.0;

        let seed = SearchNode::new(self.start, 0.0, self.heuristic.estimate(self.start));
        let expansion = engine::run(self.graph, &mut strategy, seed);
        finish("MinRiskGreedy", self.graph, &self.goal_poses, expansion)
    }
}

/// Exact minimum-constraint-removal search over non-dominated label sets.
pub struct MinRiskExactSolver<'a> {
    graph: &'a Roadmap,
    start: usize,
    goal_set: Vec<usize>,
    goal_poses: HashMap<usize, u32>,
    heuristic: GoalCentroidHeuristic,
}

impl<'a> MinRiskExactSolver<'a> {
    pub fn new(graph: &'a Roadmap, start: usize, goal_set: Vec<usize>) -> Self {
        let goal_poses = goal_set
            .iter()
            .copied()
            .zip(graph.target_poses().iter().copied())
            .collect();
        let heuristic = GoalCentroidHeuristic::new(graph, &goal_set);
        Self {
            graph,
            start,
            goal_set,
            goal_poses,
            heuristic,
        }
    }

    pub fn search(&self) -> SearchOutcome {
        let mut strategy = ExactStrategy {
            heuristic: &self.heuristic,
            goal_set: &self.goal_set,
            // The seed's empty set is deliberately not recorded, so the
            // start may be re-entered later under a different label set.
            recorder: DominanceRecorder::new(self.graph.node_count()),
        };

        let seed = SearchNode::new(self.start, 0.0, self.heuristic.estimate(self.start));
        let expansion = engine::run(self.graph, &mut strategy, seed);
        finish("MinRiskExact", self.graph, &self.goal_poses, expansion)
    }
}

fn finish(
    tag: &str,
    graph: &Roadmap,
    goal_poses: &HashMap<usize, u32>,
    expansion: engine::Expansion,
) -> SearchOutcome {
    let Some(goal_index) = expansion.accepted_goal else {
        warn!(
            "[{}] no goal reachable ({} nodes expanded)",
            tag, expansion.expanded
        );
        return SearchOutcome::failure(expansion.expanded);
    };

    let goal = expansion.arena.get(goal_index);
    let path = expansion.arena.backtrack(goal_index);
    let goal_pose = goal_poses.get(&goal.id).copied().unwrap_or(0);
    info!(
        "[{}] reached goal {} (pose {}) with {} labels, cost {:.4}, {} nodes expanded",
        tag,
        goal.id,
        goal_pose,
        goal.labels.len(),
        goal.f,
        expansion.expanded
    );
    debug!("[{}] path {:?}, labels {:?}", tag, path, goal.labels);

    SearchOutcome {
        trajectory: trajectory_of(graph, &path),
        labels: goal.labels.clone(),
        cost: goal.f,
        goal_pose,
        nodes_expanded: expansion.expanded,
        failed: false,
        path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RoadmapBuilder;

    /// Diamond where the cheap route carries a label and the long route
    /// is label-free.
    fn make_labeled_diamond() -> Roadmap {
        let mut builder = RoadmapBuilder::new();
        builder.add_node(vec![0.0, 0.0]);
        builder.add_node(vec![1.0, 0.0]);
        builder.add_node(vec![0.0, 1.0]);
        builder.add_node(vec![1.0, 1.0]);
        builder
            .add_edge(0, 1, 1.0, &[5])
            .add_edge(0, 2, 1.0, &[])
            .add_edge(1, 3, 1.0, &[5])
            .add_edge(2, 3, 3.0, &[])
            .set_start(0)
            .mark_goal(3, 0)
            .set_label_weight(5, 1, 0.3);
        builder.build().unwrap()
    }

    #[test]
    fn test_greedy_prefers_fewer_labels_over_cost() {
        let graph = make_labeled_diamond();
        let outcome = MinRiskGreedySolver::new(&graph, 0, vec![3]).search();

        assert!(!outcome.failed);
        assert_eq!(outcome.path, vec![0, 2, 3]);
        assert!(outcome.labels.is_empty());
        assert!((outcome.cost - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_exact_prefers_fewer_labels_over_cost() {
        let graph = make_labeled_diamond();
        let outcome = MinRiskExactSolver::new(&graph, 0, vec![3]).search();

        assert!(!outcome.failed);
        assert_eq!(outcome.path, vec![0, 2, 3]);
        assert!(outcome.labels.is_empty());
        assert!((outcome.cost - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_exact_escapes_greedy_trap() {
        // Nodes 0 -> m -> g. The cheap entry to m carries label 6 and the
        // expensive entry carries label 5; the exit edge carries label 5.
        // A single-record search that settles m with {6} first ends with
        // {5, 6}; the exact search keeps both entries and finds {5}.
        let mut builder = RoadmapBuilder::new();
        builder.add_node(vec![0.0, 0.0]); // 0: start
        builder.add_node(vec![1.0, 0.0]); // 1: m
        builder.add_node(vec![2.0, 0.0]); // 2: g
        builder
            .add_edge(0, 1, 1.0, &[6])
            .add_edge(0, 1, 2.0, &[5])
            .add_edge(1, 2, 1.0, &[5])
            .set_start(0)
            .mark_goal(2, 0)
            .set_label_weight(5, 0, 0.4)
            .set_label_weight(6, 1, 0.4);
        let graph = builder.build().unwrap();

        let exact = MinRiskExactSolver::new(&graph, 0, vec![2]).search();
        assert!(!exact.failed);
        assert_eq!(exact.labels.as_slice(), &[5]);
        assert_eq!(exact.labels.len(), 1);
    }

    #[test]
    fn test_both_report_failure_when_disconnected() {
        let mut builder = RoadmapBuilder::new();
        builder.add_node(vec![0.0, 0.0]);
        builder.add_node(vec![9.0, 9.0]);
        builder.set_start(0).mark_goal(1, 0);
        let graph = builder.build().unwrap();

        assert!(MinRiskGreedySolver::new(&graph, 0, vec![1]).search().failed);
        assert!(MinRiskExactSolver::new(&graph, 0, vec![1]).search().failed);
    }
}
