//! Shortest-path search on travel cost (A*).
//!
//! Labels play no role in the search itself; the label set of the winning
//! path is recovered afterwards by re-walking its edges. This is the
//! baseline the label-aware solvers are measured against.

use std::collections::HashMap;

use log::{debug, info, warn};

use super::arena::SearchNode;
use super::engine::{self, Strategy};
use super::{trajectory_of, SearchOutcome};
use crate::core::LabelSet;
use crate::graph::{Edge, Roadmap};
use crate::heuristic::GoalCentroidHeuristic;

struct AstarStrategy<'a> {
    heuristic: &'a GoalCentroidHeuristic,
    goal_set: &'a [usize],
    g_best: Vec<f32>,
    expanded: Vec<bool>,
}

impl Strategy for AstarStrategy<'_> {
    type Key = (f32, f32);

    fn key(&self, node: &SearchNode) -> Self::Key {
        (node.f, node.h)
    }

    fn is_stale(&self, node: &SearchNode) -> bool {
        // A cheaper entry for this id was accepted earlier.
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
        let g = self.g_best[current.id] + edge.cost;
        if g < self.g_best[edge.to] {
            self.g_best[edge.to] = g;
            admitted.push(SearchNode::new(edge.to, g, self.heuristic.estimate(edge.to)));
        }
    }
}

/// A* from the roadmap start to any node of a goal set.
pub struct ShortestPathSolver<'a> {
    graph: &'a Roadmap,
    start: usize,
    goal_set: Vec<usize>,
    goal_poses: HashMap<usize, u32>,
    heuristic: GoalCentroidHeuristic,
}

impl<'a> ShortestPathSolver<'a> {
    /// Prepare a solver; heuristics are precomputed here.
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

    /// Run the search to completion.
    pub fn search(&self) -> SearchOutcome {
        let n = self.graph.node_count();
        let mut strategy = AstarStrategy {
            heuristic: &self.heuristic,
            goal_set: &self.goal_set,
            g_best: vec![f32::INFINITY; n],
            expanded: vec![false; n],
        };
        strategy.g_best[self.start] = 0.0;

        let seed = SearchNode::new(self.start, 0.0, self.heuristic.estimate(self.start));
        let expansion = engine::run(self.graph, &mut strategy, seed);

        let Some(goal_index) = expansion.accepted_goal else {
            warn!(
                "[ShortestPath] no goal reachable from node {} ({} nodes expanded)",
                self.start, expansion.expanded
            );
            return SearchOutcome::failure(expansion.expanded);
        };

        let goal = expansion.arena.get(goal_index);
        let path = expansion.arena.backtrack(goal_index);
        let labels = self.path_labels(&path);
        let goal_pose = self.goal_poses.get(&goal.id).copied().unwrap_or(0);
        info!(
            "[ShortestPath] reached goal {} (pose {}) with cost {:.4}, {} nodes expanded",
            goal.id, goal_pose, goal.f, expansion.expanded
        );
        debug!("[ShortestPath] path {:?}, labels {:?}", path, labels);

        SearchOutcome {
            trajectory: trajectory_of(self.graph, &path),
            labels,
            cost: goal.f,
            goal_pose,
            nodes_expanded: expansion.expanded,
            failed: false,
            path,
        }
    }

    /// Union of the edge labels along a finished path.
    fn path_labels(&self, path: &[usize]) -> LabelSet {
        let mut labels = LabelSet::new();
        for pair in path.windows(2) {
            if let Some(edge_labels) = self.graph.edge_labels(pair[0], pair[1]) {
                labels = labels.union(edge_labels);
            }
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RoadmapBuilder;

    fn make_diamond() -> Roadmap {
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
    fn test_finds_cheapest_path_ignoring_labels() {
        let graph = make_diamond();
        let solver = ShortestPathSolver::new(&graph, 0, vec![3]);
        let outcome = solver.search();

        assert!(!outcome.failed);
        assert_eq!(outcome.path, vec![0, 1, 3]);
        assert!((outcome.cost - 2.0).abs() < 1e-5);
        assert_eq!(outcome.goal_pose, 0);
        // Labels are recovered from the winning path's edges.
        assert_eq!(outcome.labels.as_slice(), &[5]);
        assert_eq!(outcome.trajectory.len(), 3);
        assert_eq!(outcome.trajectory[0], vec![0.0, 0.0]);
        assert_eq!(outcome.trajectory[2], vec![1.0, 1.0]);
    }

    #[test]
    fn test_reports_failure_when_goal_disconnected() {
        let mut builder = RoadmapBuilder::new();
        builder.add_node(vec![0.0, 0.0]);
        builder.add_node(vec![1.0, 0.0]);
        builder.add_node(vec![5.0, 5.0]); // island
        builder
            .add_edge(0, 1, 1.0, &[])
            .set_start(0)
            .mark_goal(2, 0);
        let graph = builder.build().unwrap();

        let solver = ShortestPathSolver::new(&graph, 0, vec![2]);
        let outcome = solver.search();
        assert!(outcome.failed);
        assert!(outcome.path.is_empty());
        assert!(outcome.trajectory.is_empty());
        assert!(outcome.cost.is_infinite());
    }

    #[test]
    fn test_start_equal_to_goal() {
        let mut builder = RoadmapBuilder::new();
        builder.add_node(vec![0.0, 0.0]);
        builder.add_node(vec![1.0, 0.0]);
        builder
            .add_edge(0, 1, 1.0, &[])
            .set_start(0)
            .mark_goal(0, 0);
        let graph = builder.build().unwrap();

        let outcome = ShortestPathSolver::new(&graph, 0, vec![0]).search();
        assert!(!outcome.failed);
        assert_eq!(outcome.path, vec![0]);
        assert_eq!(outcome.cost, 0.0);
        assert!(outcome.labels.is_empty());
    }
}
