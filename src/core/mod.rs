//! Fundamental types: label sets, label weights, state-space math.

pub mod labels;
pub mod risk;

pub use labels::LabelSet;
pub use risk::LabelWeights;

/// Euclidean distance between two state vectors.
///
/// States are fixed-length float tuples used only for heuristic distance;
/// dimensions beyond the shorter vector are ignored.
#[inline]
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_distance() {
        assert!((euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]) - 5.0).abs() < 1e-6);
        assert_eq!(euclidean_distance(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
    }
}
