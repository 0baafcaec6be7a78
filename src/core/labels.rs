//! Sorted label sets and their algebra.
//!
//! Every edge of the roadmap carries a set of integer labels, each denoting
//! an uncertain collision event. Paths accumulate labels by union, and a
//! set with fewer labels is always weakly preferable, which makes the
//! subset test the dominance test used by the exact solvers.

/// A sorted, duplicate-free set of edge labels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<u32>,
}

impl LabelSet {
    /// Create an empty label set.
    pub fn new() -> Self {
        Self { labels: Vec::new() }
    }

    /// Build a set from arbitrary labels, sorting and deduplicating.
    pub fn from_labels(mut labels: Vec<u32>) -> Self {
        labels.sort_unstable();
        labels.dedup();
        Self { labels }
    }

    /// Sorted-merge union of two sets, O(|a| + |b|).
    pub fn union(&self, other: &LabelSet) -> LabelSet {
        let mut merged = Vec::with_capacity(self.labels.len() + other.labels.len());
        let (a, b) = (&self.labels, &other.labels);
        let (mut i, mut j) = (0, 0);

        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => {
                    merged.push(a[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    merged.push(b[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    merged.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&a[i..]);
        merged.extend_from_slice(&b[j..]);

        LabelSet { labels: merged }
    }

    /// True iff every label of `self` appears in `other`.
    ///
    /// This is the dominance test: a candidate set is inadmissible at a
    /// node if a previously recorded set is a subset of it.
    pub fn is_subset_of(&self, other: &LabelSet) -> bool {
        let mut j = 0;
        for &label in &self.labels {
            while j < other.labels.len() && other.labels[j] < label {
                j += 1;
            }
            if j >= other.labels.len() || other.labels[j] != label {
                return false;
            }
            j += 1;
        }
        true
    }

    /// Check membership of a single label.
    pub fn contains(&self, label: u32) -> bool {
        self.labels.binary_search(&label).is_ok()
    }

    /// Number of labels (the cardinality minimized by the min-risk solvers).
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True if no labels have been accumulated.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate over the labels in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.labels.iter().copied()
    }

    /// The labels as a sorted slice.
    pub fn as_slice(&self) -> &[u32] {
        &self.labels
    }
}

impl From<Vec<u32>> for LabelSet {
    fn from(labels: Vec<u32>) -> Self {
        Self::from_labels(labels)
    }
}
