//! Heuristic estimates from node states to remaining goals.
//!
//! Two flavors are used by the solvers:
//!
//! - [`GoalCentroidHeuristic`]: distance to the centroid of all goal
//!   states, precomputed per node. Used by the shortest-path and min-risk
//!   solvers, whose goal set never shrinks.
//! - [`HypothesisHeuristic`]: weighted sum of distances to per-hypothesis
//!   centroids. Used by the max-success solvers; the estimate is dynamic
//!   because the set of reachable hypotheses shrinks as hypothesis-labeled
//!   edges are traversed.

use std::collections::HashMap;

use crate::core::{euclidean_distance, LabelWeights};
use crate::graph::Roadmap;

/// Per-node distance to the mean of all goal states.
///
/// Exactly zero at every goal node.
#[derive(Clone, Debug)]
pub struct GoalCentroidHeuristic {
    h: Vec<f32>,
}

impl GoalCentroidHeuristic {
    /// Precompute estimates for every node of the roadmap.
    pub fn new(graph: &Roadmap, goal_set: &[usize]) -> Self {
        let dim = graph.state(0).len();
        let mut centroid = vec![0.0f32; dim];
        for &goal in goal_set {
            for (c, v) in centroid.iter_mut().zip(graph.state(goal)) {
                *c += v;
            }
        }
        if !goal_set.is_empty() {
            for c in centroid.iter_mut() {
                *c /= goal_set.len() as f32;
            }
        }

        let h = (0..graph.node_count())
            .map(|id| {
                if goal_set.contains(&id) {
                    0.0
                } else {
                    euclidean_distance(graph.state(id), &centroid)
                }
            })
            .collect();

        Self { h }
    }

    /// Precomputed estimate for a node.
    #[inline]
    pub fn estimate(&self, id: usize) -> f32 {
        self.h[id]
    }
}

/// Weighted distance to the centroids of still-reachable goal hypotheses.
#[derive(Clone, Debug)]
pub struct HypothesisHeuristic {
    centroids: HashMap<u32, Vec<f32>>,
}

impl HypothesisHeuristic {
    /// Compute one centroid per goal hypothesis from the roadmap's goals.
    pub fn new(graph: &Roadmap) -> Self {
        let dim = graph.state(0).len();
        let mut sums: HashMap<u32, Vec<f32>> = HashMap::new();
        let mut counts: HashMap<u32, usize> = HashMap::new();

        for (&goal, &pose) in graph.goal_set().iter().zip(graph.target_poses()) {
            let sum = sums.entry(pose).or_insert_with(|| vec![0.0; dim]);
            for (s, v) in sum.iter_mut().zip(graph.state(goal)) {
                *s += v;
            }
            *counts.entry(pose).or_insert(0) += 1;
        }

        let centroids = sums
            .into_iter()
            .map(|(pose, mut sum)| {
                let count = counts[&pose] as f32;
                for s in sum.iter_mut() {
                    *s /= count;
                }
                (pose, sum)
            })
            .collect();

        Self { centroids }
    }

    /// Estimate from a state given the remaining hypotheses.
    ///
    /// Each hypothesis contributes its own label-table probability times
    /// the distance to its centroid; an empty hypothesis set estimates 0.
    pub fn estimate(&self, state: &[f32], hypotheses: &[u32], weights: &LabelWeights) -> f32 {
        hypotheses
            .iter()
            .filter_map(|h| self.centroids.get(h).map(|c| (h, c)))
            .map(|(&h, centroid)| weights.weight(h) * euclidean_distance(state, centroid))
            .sum()
    }

    /// Sorted, duplicate-free hypothesis ids seen among the goals.
    pub fn hypothesis_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.centroids.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RoadmapBuilder;

    fn make_two_goal_graph() -> Roadmap {
        let mut builder = RoadmapBuilder::new();
        builder.add_node(vec![0.0, 0.0]); // start
        builder.add_node(vec![4.0, 0.0]); // goal, hypothesis 0
        builder.add_node(vec![0.0, 4.0]); // goal, hypothesis 1
        builder
            .add_edge(0, 1, 1.0, &[])
            .add_edge(0, 2, 1.0, &[])
            .set_start(0)
            .mark_goal(1, 0)
            .mark_goal(2, 1)
            .set_label_weight(0, 0, 0.6)
            .set_label_weight(1, 0, 0.4);
        builder.build().unwrap()
    }

    #[test]
    fn test_goal_centroid_zero_at_goals() {
        let graph = make_two_goal_graph();
        let h = GoalCentroidHeuristic::new(&graph, &[1, 2]);
        assert_eq!(h.estimate(1), 0.0);
        assert_eq!(h.estimate(2), 0.0);
        // Centroid of the two goals is (2, 2).
        assert!((h.estimate(0) - (8.0f32).sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_hypothesis_centroids() {
        let graph = make_two_goal_graph();
        let h = HypothesisHeuristic::new(&graph);
        assert_eq!(h.hypothesis_ids(), vec![0, 1]);

        let weights = graph.label_weights();
        // Both hypotheses: 0.6 * dist((0,0),(4,0)) + 0.4 * dist((0,0),(0,4)).
        let full = h.estimate(&[0.0, 0.0], &[0, 1], weights);
        assert!((full - (0.6 * 4.0 + 0.4 * 4.0)).abs() < 1e-5);

        // After hypothesis 0 is ruled out, only hypothesis 1 contributes.
        let reduced = h.estimate(&[0.0, 0.0], &[1], weights);
        assert!((reduced - 0.4 * 4.0).abs() < 1e-5);

        assert_eq!(h.estimate(&[0.0, 0.0], &[], weights), 0.0);
    }

    #[test]
    fn test_hypothesis_centroid_averages_shared_pose() {
        let mut builder = RoadmapBuilder::new();
        builder.add_node(vec![0.0, 0.0]);
        builder.add_node(vec![2.0, 0.0]);
        builder.add_node(vec![4.0, 0.0]);
        builder
            .add_edge(0, 1, 1.0, &[])
            .add_edge(1, 2, 1.0, &[])
            .set_start(0)
            .mark_goal(1, 0)
            .mark_goal(2, 0)
            .set_label_weight(0, 0, 1.0);
        let graph = builder.build().unwrap();

        let h = HypothesisHeuristic::new(&graph);
        // Centroid of nodes 1 and 2 is (3, 0).
        let est = h.estimate(&[0.0, 0.0], &[0], graph.label_weights());
        assert!((est - 3.0).abs() < 1e-5);
    }
}
