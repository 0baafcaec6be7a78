//! Precomputed roadmap graph.
//!
//! A [`Roadmap`] is a read-only weighted undirected graph built once from
//! sampled robot configurations. Edges carry a non-negative travel cost and
//! a [`LabelSet`] of uncertain-collision labels; a designated start node and
//! a set of goal nodes (each tagged with a target-pose hypothesis id)
//! complete the search problem. Solvers never mutate the roadmap.

pub mod load;

use std::collections::HashMap;

use crate::core::{LabelSet, LabelWeights};
use crate::error::{PlannerError, Result};

/// An outgoing edge in the adjacency list.
#[derive(Clone, Debug)]
pub struct Edge {
    /// Neighbor node id.
    pub to: usize,
    /// Non-negative travel cost (symmetric).
    pub cost: f32,
    /// Collision labels carried by the edge (symmetric).
    pub labels: LabelSet,
}

/// Read-only roadmap accessor consumed by the solvers.
#[derive(Clone, Debug)]
pub struct Roadmap {
    states: Vec<Vec<f32>>,
    adjacency: Vec<Vec<Edge>>,
    label_weights: LabelWeights,
    start: usize,
    goal_set: Vec<usize>,
    target_poses: Vec<u32>,
    most_promising_labels: Vec<u32>,
}

impl Roadmap {
    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.states.len()
    }

    /// State vector of a node.
    pub fn state(&self, id: usize) -> &[f32] {
        &self.states[id]
    }

    /// Outgoing edges of a node.
    pub fn neighbors(&self, id: usize) -> &[Edge] {
        &self.adjacency[id]
    }

    /// Cost of the edge between two nodes, if one exists.
    pub fn edge_cost(&self, a: usize, b: usize) -> Option<f32> {
        self.adjacency[a].iter().find(|e| e.to == b).map(|e| e.cost)
    }

    /// Labels of the edge between two nodes, if one exists.
    pub fn edge_labels(&self, a: usize, b: usize) -> Option<&LabelSet> {
        self.adjacency[a]
            .iter()
            .find(|e| e.to == b)
            .map(|e| &e.labels)
    }

    /// The designated start node.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Goal node ids, parallel to [`Roadmap::target_poses`].
    pub fn goal_set(&self) -> &[usize] {
        &self.goal_set
    }

    /// Target-pose hypothesis ids, parallel to [`Roadmap::goal_set`].
    pub fn target_poses(&self) -> &[u32] {
        &self.target_poses
    }

    /// Hypothesis id of a goal node, if the node is a goal.
    pub fn target_pose_of(&self, goal: usize) -> Option<u32> {
        self.goal_set
            .iter()
            .position(|&g| g == goal)
            .map(|i| self.target_poses[i])
    }

    /// Goal node id -> hypothesis id map.
    pub fn goal_pose_map(&self) -> HashMap<usize, u32> {
        self.goal_set
            .iter()
            .copied()
            .zip(self.target_poses.iter().copied())
            .collect()
    }

    /// The label weight table.
    pub fn label_weights(&self) -> &LabelWeights {
        &self.label_weights
    }

    /// Labels the roadmap generator marked as most promising.
    ///
    /// Parsed and retained but not consumed by any solver (reserved).
    pub fn most_promising_labels(&self) -> &[u32] {
        &self.most_promising_labels
    }

    /// Number of edges (each undirected edge counted once).
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|e| e.len()).sum::<usize>() / 2
    }
}

/// Incremental builder for in-memory roadmaps.
///
/// The file loader uses this internally; tests and embedding hosts can use
/// it directly to assemble small graphs by hand.
#[derive(Debug, Default)]
pub struct RoadmapBuilder {
    states: Vec<Vec<f32>>,
    edges: Vec<(usize, usize, f32, LabelSet)>,
    weight_triples: Vec<(u32, usize, f32)>,
    start: usize,
    goal_set: Vec<usize>,
    target_poses: Vec<u32>,
    most_promising_labels: Vec<u32>,
}

impl RoadmapBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with the given state vector; returns its id.
    pub fn add_node(&mut self, state: Vec<f32>) -> usize {
        self.states.push(state);
        self.states.len() - 1
    }

    /// Add an undirected edge with cost and labels.
    pub fn add_edge(&mut self, a: usize, b: usize, cost: f32, labels: &[u32]) -> &mut Self {
        self.edges
            .push((a, b, cost, LabelSet::from_labels(labels.to_vec())));
        self
    }

    /// Set the designated start node.
    pub fn set_start(&mut self, id: usize) -> &mut Self {
        self.start = id;
        self
    }

    /// Mark a node as a goal with its target-pose hypothesis id.
    pub fn mark_goal(&mut self, id: usize, pose: u32) -> &mut Self {
        self.goal_set.push(id);
        self.target_poses.push(pose);
        self
    }

    /// Register a label's obstacle index and collision probability.
    pub fn set_label_weight(&mut self, label: u32, obstacle: usize, weight: f32) -> &mut Self {
        self.weight_triples.push((label, obstacle, weight));
        self
    }

    /// Store the generator's most-promising-labels list.
    pub fn set_most_promising_labels(&mut self, labels: Vec<u32>) -> &mut Self {
        self.most_promising_labels = labels;
        self
    }

    /// Validate and assemble the roadmap.
    pub fn build(self) -> Result<Roadmap> {
        let n = self.states.len();
        if n == 0 {
            return Err(PlannerError::Roadmap("roadmap has no nodes".into()));
        }
        if self.start >= n {
            return Err(PlannerError::Roadmap(format!(
                "start node {} out of range (node count {})",
                self.start, n
            )));
        }
        for &goal in &self.goal_set {
            if goal >= n {
                return Err(PlannerError::Roadmap(format!(
                    "goal node {} out of range (node count {})",
                    goal, n
                )));
            }
        }

        let mut adjacency: Vec<Vec<Edge>> = vec![Vec::new(); n];
        for (a, b, cost, labels) in self.edges {
            if a >= n || b >= n {
                return Err(PlannerError::Roadmap(format!(
                    "edge ({a}, {b}) out of range (node count {n})"
                )));
            }
            if cost < 0.0 {
                return Err(PlannerError::Roadmap(format!(
                    "edge ({a}, {b}) has negative cost {cost}"
                )));
            }
            adjacency[a].push(Edge {
                to: b,
                cost,
                labels: labels.clone(),
            });
            adjacency[b].push(Edge { to: a, cost, labels });
        }

        Ok(Roadmap {
            states: self.states,
            adjacency,
            label_weights: LabelWeights::from_triples(&self.weight_triples),
            start: self.start,
            goal_set: self.goal_set,
            target_poses: self.target_poses,
            most_promising_labels: self.most_promising_labels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
            .set_label_weight(5, 0, 0.3);
        builder.build().unwrap()
    }

    #[test]
    fn test_build_diamond() {
        let roadmap = make_diamond();
        assert_eq!(roadmap.node_count(), 4);
        assert_eq!(roadmap.edge_count(), 4);
        assert_eq!(roadmap.start(), 0);
        assert_eq!(roadmap.goal_set(), &[3]);
        assert_eq!(roadmap.target_pose_of(3), Some(0));
        assert_eq!(roadmap.target_pose_of(1), None);
    }

    #[test]
    fn test_edges_are_symmetric() {
        let roadmap = make_diamond();
        assert_eq!(roadmap.edge_cost(0, 1), Some(1.0));
        assert_eq!(roadmap.edge_cost(1, 0), Some(1.0));
        assert_eq!(roadmap.edge_labels(1, 3).unwrap().as_slice(), &[5]);
        assert_eq!(roadmap.edge_labels(3, 1).unwrap().as_slice(), &[5]);
        assert_eq!(roadmap.edge_cost(0, 3), None);
    }

    #[test]
    fn test_build_rejects_bad_edges() {
        let mut builder = RoadmapBuilder::new();
        builder.add_node(vec![0.0]);
        builder.add_edge(0, 7, 1.0, &[]);
        assert!(builder.build().is_err());

        let mut builder = RoadmapBuilder::new();
        builder.add_node(vec![0.0]);
        builder.add_node(vec![1.0]);
        builder.add_edge(0, 1, -2.0, &[]);
        assert!(builder.build().is_err());
    }

    #[test]
    fn test_build_rejects_empty() {
        assert!(RoadmapBuilder::new().build().is_err());
    }
}
