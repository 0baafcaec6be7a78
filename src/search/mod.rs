//! Label-aware search variants over a roadmap.
//!
//! Five solvers share one expansion loop and differ in what they optimize:
//!
//! - [`ShortestPathSolver`]: plain A* on travel cost, ignoring labels.
//! - [`MinRiskGreedySolver`] / [`MinRiskExactSolver`]: minimize the
//!   cardinality of the accumulated label set, cost as tie-breaker.
//! - [`MaxSuccessGreedySolver`] / [`MaxSuccessExactSolver`]: maximize the
//!   probability that the path both survives all uncertain obstacles and
//!   ends at the true target pose.
//!
//! Greedy variants keep one best record per roadmap node; exact variants
//! keep a Pareto frontier of non-dominated label sets per node and may
//! re-expand a node many times.

mod arena;
mod dominance;
mod engine;
mod frontier;

pub mod max_success;
pub mod min_risk;
pub mod shortest_path;

pub use max_success::{MaxSuccessExactSolver, MaxSuccessGreedySolver};
pub use min_risk::{MinRiskExactSolver, MinRiskGreedySolver};
pub use shortest_path::ShortestPathSolver;

use crate::core::LabelSet;
use crate::graph::Roadmap;

/// Result of one solver run.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Roadmap node ids from start to goal; empty on failure.
    pub path: Vec<usize>,
    /// State vectors along the path, start first; empty on failure.
    pub trajectory: Vec<Vec<f32>>,
    /// Labels accumulated along the path.
    pub labels: LabelSet,
    /// Priority value of the accepted goal node (travel cost plus the
    /// residual heuristic, which is zero at goals).
    pub cost: f32,
    /// Target-pose hypothesis id of the goal that was reached.
    pub goal_pose: u32,
    /// Number of nodes accepted during the search.
    pub nodes_expanded: usize,
    /// True when the frontier emptied before any goal was reached.
    pub failed: bool,
}

impl SearchOutcome {
    pub(crate) fn failure(nodes_expanded: usize) -> Self {
        Self {
            path: Vec::new(),
            trajectory: Vec::new(),
            labels: LabelSet::new(),
            cost: f32::INFINITY,
            goal_pose: 0,
            nodes_expanded,
            failed: true,
        }
    }

    /// Judge the path against the ground truth encoded in the label ids.
    pub fn verdict(&self, n_hypotheses: u32) -> PathVerdict {
        check_path_success(&self.labels, self.goal_pose, n_hypotheses)
    }
}

/// Ground-truth judgement of a finished path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathVerdict {
    /// Number of truly-present obstacles the path passes through.
    pub obstacles_collided: usize,
    /// True iff no real obstacle is hit and the true pose was reached.
    pub is_success: bool,
}

/// Count collisions with real obstacles and decide overall success.
///
/// The roadmap generator assigns ids so that a label divisible by the
/// hypothesis count marks an obstacle that is actually present, and pose 0
/// is the true target pose. `n_hypotheses` must be non-zero.
pub fn check_path_success(labels: &LabelSet, goal_pose: u32, n_hypotheses: u32) -> PathVerdict {
    let obstacles_collided = labels
        .iter()
        .filter(|&label| label % n_hypotheses == 0)
        .count();
    PathVerdict {
        obstacles_collided,
        is_success: obstacles_collided == 0 && goal_pose == 0,
    }
}

/// Expand a node-id path into the sequence of state vectors it visits.
pub(crate) fn trajectory_of(graph: &Roadmap, path: &[usize]) -> Vec<Vec<f32>> {
    path.iter().map(|&id| graph.state(id).to_vec()).collect()
}
