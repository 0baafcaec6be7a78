//! Priority frontier over arena handles.
//!
//! A binary heap of `(key, sequence, node index)` entries. Lower keys pop
//! first; exact key ties (and incomparable float keys) fall back to the
//! insertion sequence number, so pop order is total and deterministic
//! regardless of heap internals. Stale entries are handled by the caller
//! (lazy deletion): popping one is a no-op discard.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::arena::NodeIndex;

#[derive(Debug)]
struct FrontierEntry<K> {
    key: K,
    seq: u64,
    node: NodeIndex,
}

impl<K: PartialOrd> PartialEq for FrontierEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl<K: PartialOrd> Eq for FrontierEntry<K> {}

impl<K: PartialOrd> Ord for FrontierEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior (BinaryHeap is a max-heap);
        // earlier insertions win exact ties.
        match other.key.partial_cmp(&self.key) {
            Some(Ordering::Equal) | None => other.seq.cmp(&self.seq),
            Some(ordering) => ordering,
        }
    }
}

impl<K: PartialOrd> PartialOrd for FrontierEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of candidate expansions.
#[derive(Debug)]
pub(crate) struct Frontier<K> {
    heap: BinaryHeap<FrontierEntry<K>>,
    seq: u64,
}

impl<K: PartialOrd> Frontier<K> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Push a node handle under the given priority key.
    pub fn push(&mut self, key: K, node: NodeIndex) {
        self.heap.push(FrontierEntry {
            key,
            seq: self.seq,
            node,
        });
        self.seq += 1;
    }

    /// Pop the minimum-priority node handle.
    pub fn pop(&mut self) -> Option<NodeIndex> {
        self.heap.pop().map(|entry| entry.node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_lowest_key_first() {
        let mut frontier: Frontier<(f32, f32)> = Frontier::new();
        frontier.push((3.0, 0.0), 0);
        frontier.push((1.0, 0.0), 1);
        frontier.push((2.0, 0.0), 2);

        assert_eq!(frontier.pop(), Some(1));
        assert_eq!(frontier.pop(), Some(2));
        assert_eq!(frontier.pop(), Some(0));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_tie_break_is_insertion_order() {
        let mut frontier: Frontier<(f32, f32)> = Frontier::new();
        frontier.push((1.0, 0.5), 7);
        frontier.push((1.0, 0.5), 8);
        frontier.push((1.0, 0.5), 9);

        assert_eq!(frontier.pop(), Some(7));
        assert_eq!(frontier.pop(), Some(8));
        assert_eq!(frontier.pop(), Some(9));
    }

    #[test]
    fn test_secondary_key_breaks_primary_tie() {
        let mut frontier: Frontier<(f32, f32)> = Frontier::new();
        frontier.push((1.0, 2.0), 0);
        frontier.push((1.0, 1.0), 1);

        assert_eq!(frontier.pop(), Some(1));
        assert_eq!(frontier.pop(), Some(0));
    }

    #[test]
    fn test_cardinality_key_ordering() {
        // Min-risk key: cardinality before cost.
        let mut frontier: Frontier<(usize, f32, f32)> = Frontier::new();
        frontier.push((2, 1.0, 0.0), 0);
        frontier.push((0, 9.0, 0.0), 1);
        frontier.push((1, 0.5, 0.0), 2);

        assert_eq!(frontier.pop(), Some(1));
        assert_eq!(frontier.pop(), Some(2));
        assert_eq!(frontier.pop(), Some(0));
    }

    #[test]
    fn test_reverse_key_for_maximization() {
        use std::cmp::Reverse;
        let mut frontier: Frontier<(Reverse<f32>, f32, f32)> = Frontier::new();
        frontier.push((Reverse(0.2), 0.0, 0.0), 0);
        frontier.push((Reverse(0.9), 0.0, 0.0), 1);
        frontier.push((Reverse(0.5), 0.0, 0.0), 2);

        assert_eq!(frontier.pop(), Some(1));
        assert_eq!(frontier.pop(), Some(2));
        assert_eq!(frontier.pop(), Some(0));
    }
}
