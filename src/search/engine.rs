//! Shared best-first expansion loop.
//!
//! All five solvers drive the same loop and differ only in their strategy:
//! the priority key, the staleness test applied on pop, the goal predicate,
//! and the relaxation/admission rule. The engine owns the arena and the
//! frontier; accepted nodes simply stay in the arena (the closed list is
//! implicit) and the winner is reported by arena index.

use log::trace;

use super::arena::{NodeArena, NodeIndex, SearchNode};
use super::frontier::Frontier;
use crate::graph::{Edge, Roadmap};

/// Variant-specific behavior plugged into [`run`].
pub(crate) trait Strategy {
    /// Priority key; lower keys expand first. Ties are broken by insertion
    /// order inside the frontier.
    type Key: PartialOrd;

    fn key(&self, node: &SearchNode) -> Self::Key;

    /// True when a popped entry was superseded and must be discarded.
    fn is_stale(&self, node: &SearchNode) -> bool {
        let _ = node;
        false
    }

    /// Mark an accepted node as settled.
    fn settle(&mut self, node: &SearchNode) {
        let _ = node;
    }

    /// Goal predicate evaluated on acceptance.
    fn is_goal(&self, node: &SearchNode) -> bool;

    /// Relax one neighbor edge, pushing admitted candidates into `admitted`.
    /// Parent links are filled in by the engine.
    fn relax(
        &mut self,
        graph: &Roadmap,
        current: &SearchNode,
        edge: &Edge,
        admitted: &mut Vec<SearchNode>,
    );
}

/// Result of driving the loop to termination.
pub(crate) struct Expansion {
    /// Every node created during the search.
    pub arena: NodeArena,
    /// Arena index of the accepted goal node, if any.
    pub accepted_goal: Option<NodeIndex>,
    /// Number of accepted (settled) nodes.
    pub expanded: usize,
}

/// Run the expansion loop from `seed` until a goal is accepted or the
/// frontier empties.
pub(crate) fn run<S: Strategy>(graph: &Roadmap, strategy: &mut S, seed: SearchNode) -> Expansion {
    let mut arena = NodeArena::new();
    let mut frontier = Frontier::new();

    let seed_key = strategy.key(&seed);
    let seed_index = arena.push(seed);
    frontier.push(seed_key, seed_index);

    let mut expanded = 0;
    let mut admitted: Vec<SearchNode> = Vec::new();

    while let Some(current_index) = frontier.pop() {
        let current = arena.get(current_index).clone();

        if strategy.is_stale(&current) {
            // Lazy deletion: the arena keeps the node, nothing else to do.
            continue;
        }

        strategy.settle(&current);
        expanded += 1;
        trace!(
            "[Search] accept id={} f={:.4} |labels|={}",
            current.id,
            current.f,
            current.labels.len()
        );

        if strategy.is_goal(&current) {
            return Expansion {
                arena,
                accepted_goal: Some(current_index),
                expanded,
            };
        }

        for edge in graph.neighbors(current.id) {
            strategy.relax(graph, &current, edge, &mut admitted);
            for mut candidate in admitted.drain(..) {
                candidate.parent = Some(current_index);
                let key = strategy.key(&candidate);
                let index = arena.push(candidate);
                frontier.push(key, index);
            }
        }
    }

    Expansion {
        arena,
        accepted_goal: None,
        expanded,
    }
}
