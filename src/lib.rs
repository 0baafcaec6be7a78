//! # Marga-Plan: Label-Aware Roadmap Search
//!
//! A planning library for probabilistic roadmaps whose edges carry labels
//! of uncertain obstacles. Given a roadmap with a start node and a set of
//! candidate goals (one per target-pose hypothesis), it answers the same
//! query five ways:
//!
//! - Shortest path on travel cost (A*), ignoring labels
//! - Minimum-constraint-removal path, greedy and exact
//! - Maximum-success-probability path, greedy and exact
//!
//! ## Quick Start
//!
//! ```rust
//! use marga_plan::{RoadmapBuilder, ShortestPathSolver};
//!
//! let mut builder = RoadmapBuilder::new();
//! builder.add_node(vec![0.0, 0.0]);
//! builder.add_node(vec![1.0, 0.0]);
//! builder
//!     .add_edge(0, 1, 1.0, &[])
//!     .set_start(0)
//!     .mark_goal(1, 0);
//! let roadmap = builder.build().unwrap();
//!
//! let outcome = ShortestPathSolver::new(&roadmap, 0, vec![1]).search();
//! assert_eq!(outcome.path, vec![0, 1]);
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: label sets and the label weight table
//! - [`graph`]: the roadmap graph, its builder and file loader
//! - [`heuristic`]: goal-centroid and hypothesis-weighted heuristics
//! - [`search`]: the five solvers over a shared expansion loop
//! - [`io`]: trajectory, statistics and failure-indicator output
//! - [`config`]: TOML run configuration
//!
//! Label ids and goal-hypothesis ids share one numeric namespace: an edge
//! labeled with a hypothesis id rules that target pose out, which is what
//! lets the max-success solvers reason about pose uncertainty and obstacle
//! uncertainty in one pass.

pub mod config;
pub mod core;
pub mod error;
pub mod graph;
pub mod heuristic;
pub mod io;
pub mod search;
pub mod utils;

pub use config::RunConfig;
pub use core::{LabelSet, LabelWeights};
pub use error::{PlannerError, Result};
pub use graph::load::{load_roadmap, RoadmapFiles};
pub use graph::{Roadmap, RoadmapBuilder};
pub use search::{
    check_path_success, MaxSuccessExactSolver, MaxSuccessGreedySolver, MinRiskExactSolver,
    MinRiskGreedySolver, PathVerdict, SearchOutcome, ShortestPathSolver,
};
