//! Maximum-success search: maximize the probability that the path
//! survives every uncertain obstacle and ends at the true target pose.
//!
//! Goal hypotheses share the label id namespace: traversing an edge whose
//! labels include a hypothesis id rules that pose out, because the edge is
//! only blocked in the world where that pose is real. Physical goal nodes
//! therefore appear twice during the search: as transit nodes (keeping
//! every surviving hypothesis) and as goal candidates (committed to their
//! own pose, heuristic zero). Only a goal candidate can terminate the
//! search.

use std::collections::HashMap;

use log::{debug, info, warn};

use super::arena::SearchNode;
use super::dominance::DominanceRecorder;
use super::engine::{self, Strategy};
use super::{trajectory_of, SearchOutcome};
use crate::core::LabelSet;
use crate::graph::{Edge, Roadmap};
use crate::heuristic::HypothesisHeuristic;

/// Priority key: success probability (descending), then f, then h.
type SuccessKey = (std::cmp::Reverse<f32>, f32, f32);

fn success_key(node: &SearchNode) -> SuccessKey {
    (std::cmp::Reverse(node.success), node.f, node.h)
}

/// Drop every hypothesis whose id appears among the edge labels.
pub fn update_goal_hypotheses(current: &[u32], edge_labels: &LabelSet) -> Vec<u32> {
    current
        .iter()
        .copied()
        .filter(|&h| !edge_labels.contains(h))
        .collect()
}

struct GreedyStrategy<'a> {
    heuristic: &'a HypothesisHeuristic,
    goal_poses: &'a HashMap<usize, u32>,
    expanded: Vec<bool>,
    best_success: Vec<f32>,
    best_f: Vec<f32>,
    goal_best_success: HashMap<usize, f32>,
    goal_best_f: HashMap<usize, f32>,
}

impl Strategy for GreedyStrategy<'_> {
    type Key = SuccessKey;

    fn key(&self, node: &SearchNode) -> Self::Key {
        success_key(node)
    }

    fn is_stale(&self, node: &SearchNode) -> bool {
        // Goal candidates are never stale; the first one popped wins.
        !node.is_goal && self.expanded[node.id]
    }

    fn settle(&mut self, node: &SearchNode) {
        if !node.is_goal {
            self.expanded[node.id] = true;
        }
    }

    fn is_goal(&self, node: &SearchNode) -> bool {
        node.is_goal
    }

    fn relax(
        &mut self,
        graph: &Roadmap,
        current: &SearchNode,
        edge: &Edge,
        admitted: &mut Vec<SearchNode>,
    ) {
        let weights = graph.label_weights();
        let labels = current.labels.union(&edge.labels);
        let survival = weights.survival(&labels);
        let hypotheses = update_goal_hypotheses(&current.hypotheses, &edge.labels);

        // Transit admission: better success, or tied success and cheaper f.
        if !self.expanded[edge.to] {
            let reachability = weights.reachability(&hypotheses);
            let success = survival * reachability;
            let best = self.best_success[edge.to];
            if success >= best {
                let g = current.g + edge.cost;
                let h = self
                    .heuristic
                    .estimate(graph.state(edge.to), &hypotheses, weights);
                if success > best || g + h < self.best_f[edge.to] {
                    self.best_success[edge.to] = success;
                    self.best_f[edge.to] = g + h;
                    admitted.push(
                        SearchNode::new(edge.to, g, h)
                            .with_labels(labels.clone())
                            .with_risk(survival, reachability)
                            .with_hypotheses(hypotheses.clone()),
                    );
                }
            }
        }

        // Goal-candidate admission: only when the node's own pose survived.
        if let Some(&pose) = self.goal_poses.get(&edge.to) {
            if !hypotheses.contains(&pose) {
                return;
            }
            let reachability = weights.weight(pose);
            let success = survival * reachability;
            let best = self.goal_best_success.get(&edge.to).copied().unwrap_or(-1.0);
            let g = current.g + edge.cost;
            if success > best {
                self.goal_best_success.insert(edge.to, success);
                self.goal_best_f.insert(edge.to, g);
                admitted.push(
                    SearchNode::new(edge.to, g, 0.0)
                        .with_labels(labels)
                        .with_risk(survival, reachability)
                        .with_hypotheses(vec![pose])
                        .as_goal(),
                );
            } else if success == best {
                let best_f = self
                    .goal_best_f
                    .get(&edge.to)
                    .copied()
                    .unwrap_or(f32::INFINITY);
                if g < best_f {
                    self.goal_best_f.insert(edge.to, g);
                    admitted.push(
                        SearchNode::new(edge.to, g, 0.0)
                            .with_labels(labels)
                            .with_risk(survival, reachability)
                            .with_hypotheses(vec![pose])
                            .as_goal(),
                    );
                }
            }
        }
    }
}

struct ExactStrategy<'a> {
    heuristic: &'a HypothesisHeuristic,
    goal_poses: &'a HashMap<usize, u32>,
    recorder: DominanceRecorder,
}

impl Strategy for ExactStrategy<'_> {
    type Key = SuccessKey;

    fn key(&self, node: &SearchNode) -> Self::Key {
        success_key(node)
    }

    fn is_goal(&self, node: &SearchNode) -> bool {
        node.is_goal
    }

    fn relax(
        &mut self,
        graph: &Roadmap,
        current: &SearchNode,
        edge: &Edge,
        admitted: &mut Vec<SearchNode>,
    ) {
        let labels = current.labels.union(&edge.labels);
        if self.recorder.is_dominated(edge.to, &labels) {
            return;
        }
        self.recorder.record(edge.to, labels.clone());

        let weights = graph.label_weights();
        let survival = weights.survival(&labels);
        let hypotheses = update_goal_hypotheses(&current.hypotheses, &edge.labels);
        let g = current.g + edge.cost;

        let h = self
            .heuristic
            .estimate(graph.state(edge.to), &hypotheses, weights);
        let reachability = weights.reachability(&hypotheses);
        admitted.push(
            SearchNode::new(edge.to, g, h)
                .with_labels(labels.clone())
                .with_risk(survival, reachability)
                .with_hypotheses(hypotheses.clone()),
        );

        // A goal node whose own pose survived also enters as a candidate.
        if let Some(&pose) = self.goal_poses.get(&edge.to) {
            if hypotheses.contains(&pose) {
                admitted.push(
                    SearchNode::new(edge.to, g, 0.0)
                        .with_labels(labels)
                        .with_risk(survival, weights.weight(pose))
                        .with_hypotheses(vec![pose])
                        .as_goal(),
                );
            }
        }
    }
}

/// Greedy maximum-success search with one best record per node.
pub struct MaxSuccessGreedySolver<'a> {
    graph: &'a Roadmap,
    goal_poses: HashMap<usize, u32>,
    heuristic: HypothesisHeuristic,
}

impl<'a> MaxSuccessGreedySolver<'a> {
    pub fn new(graph: &'a Roadmap) -> Self {
        Self {
            graph,
            goal_poses: graph.goal_pose_map(),
            heuristic: HypothesisHeuristic::new(graph),
        }
    }

    pub fn search(&self) -> SearchOutcome {
        let n = self.graph.node_count();
        let start = self.graph.start();
        let weights = self.graph.label_weights();
        let hypotheses = self.heuristic.hypothesis_ids();

        let reachability = weights.reachability(&hypotheses);
        let h = self
            .heuristic
            .estimate(self.graph.state(start), &hypotheses, weights);
        let seed = SearchNode::new(start, 0.0, h)
            .with_risk(1.0, reachability)
            .with_hypotheses(hypotheses);

        let mut strategy = GreedyStrategy {
            heuristic: &self.heuristic,
            goal_poses: &self.goal_poses,
            expanded: vec![false; n],
            best_success: vec![-1.0; n],
            best_f: vec![f32::INFINITY; n],
            goal_best_success: HashMap::new(),
            goal_best_f: HashMap::new(),
        };
        strategy.best_success[start] = seed.success;
        strategy.best_f[start] = seed.f;

        let expansion = engine::run(self.graph, &mut strategy, seed);
        finish("MaxSuccessGreedy", self.graph, &self.goal_poses, expansion)
    }
}

/// Exact maximum-success search over non-dominated label sets.
pub struct MaxSuccessExactSolver<'a> {
    graph: &'a Roadmap,
    goal_poses: HashMap<usize, u32>,
    heuristic: HypothesisHeuristic,
}

impl<'a> MaxSuccessExactSolver<'a> {
    pub fn new(graph: &'a Roadmap) -> Self {
        Self {
            graph,
            goal_poses: graph.goal_pose_map(),
            heuristic: HypothesisHeuristic::new(graph),
        }
    }

    pub fn search(&self) -> SearchOutcome {
        let start = self.graph.start();
        let weights = self.graph.label_weights();
        let hypotheses = self.heuristic.hypothesis_ids();

        let reachability = weights.reachability(&hypotheses);
        let h = self
            .heuristic
            .estimate(self.graph.state(start), &hypotheses, weights);
        let seed = SearchNode::new(start, 0.0, h)
            .with_risk(1.0, reachability)
            .with_hypotheses(hypotheses);

        let mut strategy = ExactStrategy {
            heuristic: &self.heuristic,
            goal_poses: &self.goal_poses,
            // The seed's empty set is deliberately not recorded, so the
            // start may be re-entered later under a different label set.
            recorder: DominanceRecorder::new(self.graph.node_count()),
        };

        let expansion = engine::run(self.graph, &mut strategy, seed);
        finish("MaxSuccessExact", self.graph, &self.goal_poses, expansion)
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
        "[{}] reached goal {} (pose {}): survival {:.4}, reachability {:.4}, success {:.4}, \
         cost {:.4}, {} nodes expanded",
        tag, goal.id, goal_pose, goal.survival, goal.reachability, goal.success, goal.f,
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
