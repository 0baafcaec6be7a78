//! Label weight table and survival computation.
//!
//! Each label maps to an (obstacle index, collision probability) pair.
//! Labels sharing an obstacle are mutually exclusive evidence about that
//! obstacle; obstacles themselves are treated as independent, which gives
//! the product form of the survival probability.
//!
//! A subset of label ids doubles as goal-hypothesis ids: the weight of a
//! hypothesis label is the probability that its target pose is the real
//! one. The two id spaces are a single numeric namespace by construction
//! of the roadmap generator and must not be separated.

use super::labels::LabelSet;

/// Dense label -> (obstacle, probability) table.
///
/// Stored as a vector sized `max(label) + 1` for O(1) lookup; unknown
/// labels carry zero weight.
#[derive(Clone, Debug, Default)]
pub struct LabelWeights {
    entries: Vec<Option<(usize, f32)>>,
    n_obstacles: usize,
}

impl LabelWeights {
    /// Build the table from `(label, obstacle, probability)` triples.
    pub fn from_triples(triples: &[(u32, usize, f32)]) -> Self {
        let size = triples
            .iter()
            .map(|&(label, _, _)| label as usize + 1)
            .max()
            .unwrap_or(0);
        let mut entries = vec![None; size];
        let mut max_obstacle = None;

        for &(label, obstacle, weight) in triples {
            entries[label as usize] = Some((obstacle, weight));
            max_obstacle = Some(max_obstacle.map_or(obstacle, |m: usize| m.max(obstacle)));
        }

        Self {
            entries,
            n_obstacles: max_obstacle.map_or(0, |m| m + 1),
        }
    }

    /// Probability associated with a label (0.0 for unknown labels).
    pub fn weight(&self, label: u32) -> f32 {
        self.entries
            .get(label as usize)
            .and_then(|e| e.map(|(_, w)| w))
            .unwrap_or(0.0)
    }

    /// Obstacle index a label refers to.
    pub fn obstacle(&self, label: u32) -> Option<usize> {
        self.entries
            .get(label as usize)
            .and_then(|e| e.map(|(obs, _)| obs))
    }

    /// Number of obstacles (max obstacle index + 1).
    pub fn obstacle_count(&self) -> usize {
        self.n_obstacles
    }

    /// Number of known labels.
    pub fn label_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Probability that a path carrying `labels` incurs no collision.
    ///
    /// Per-obstacle probabilities are summed (labels on one obstacle are
    /// mutually exclusive), then survival is the product of the per-obstacle
    /// complements under the independence assumption.
    pub fn survival(&self, labels: &LabelSet) -> f32 {
        let mut collision_per_obstacle = vec![0.0f32; self.n_obstacles];
        for label in labels.iter() {
            if let Some((obstacle, weight)) = self.entries.get(label as usize).and_then(|e| *e) {
                collision_per_obstacle[obstacle] += weight;
            }
        }
        collision_per_obstacle.iter().map(|p| 1.0 - p).product()
    }

    /// Best-case probability among the still-possible goal hypotheses.
    ///
    /// Returns 0.0 when no hypothesis remains reachable.
    pub fn reachability(&self, hypotheses: &[u32]) -> f32 {
        hypotheses
            .iter()
            .map(|&h| self.weight(h))
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_lookup() {
        let weights = LabelWeights::from_triples(&[(0, 0, 0.5), (5, 1, 0.3)]);
        assert_eq!(weights.weight(5), 0.3);
        assert_eq!(weights.obstacle(5), Some(1));
        assert_eq!(weights.weight(3), 0.0);
        assert_eq!(weights.obstacle(3), None);
        assert_eq!(weights.obstacle_count(), 2);
        assert_eq!(weights.label_count(), 2);
    }

    #[test]
    fn test_survival_single_label() {
        let weights = LabelWeights::from_triples(&[(5, 0, 0.3)]);
        let labels = LabelSet::from_labels(vec![5]);
        assert!((weights.survival(&labels) - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_survival_same_obstacle_sums() {
        let weights = LabelWeights::from_triples(&[(5, 0, 0.3), (6, 0, 0.2)]);
        let labels = LabelSet::from_labels(vec![5, 6]);
        assert!((weights.survival(&labels) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_survival_independent_obstacles_multiply() {
        let weights = LabelWeights::from_triples(&[(5, 0, 0.3), (6, 1, 0.2)]);
        let labels = LabelSet::from_labels(vec![5, 6]);
        assert!((weights.survival(&labels) - 0.56).abs() < 1e-6);
    }

    #[test]
    fn test_survival_empty_labels() {
        let weights = LabelWeights::from_triples(&[(5, 0, 0.3)]);
        assert!((weights.survival(&LabelSet::new()) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_dominance_monotonicity() {
        // A subset of labels can never survive worse than its superset.
        let weights = LabelWeights::from_triples(&[(1, 0, 0.2), (2, 1, 0.4), (3, 1, 0.1)]);
        let a = LabelSet::from_labels(vec![1]);
        let b = LabelSet::from_labels(vec![1, 2, 3]);
        assert!(a.is_subset_of(&b));
        assert!(weights.survival(&a) >= weights.survival(&b));
    }

    #[test]
    fn test_reachability_max_over_hypotheses() {
        let weights = LabelWeights::from_triples(&[(0, 0, 0.5), (1, 0, 0.3), (2, 0, 0.2)]);
        assert!((weights.reachability(&[0, 1, 2]) - 0.5).abs() < 1e-6);
        assert!((weights.reachability(&[1, 2]) - 0.3).abs() < 1e-6);
        assert_eq!(weights.reachability(&[]), 0.0);
    }
}
