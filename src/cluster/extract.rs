use std::ops::RangeInclusive;

use super::cost_matrix::CostMatrix;
use crate::Value;

/// Walks the split table back from the bottom-right corner and returns the
/// index range of every cluster, lowest values first.
///
/// The ranges are contiguous, non-empty and together cover `0..matrix.len()`.
pub fn backtrack_boundaries<T: Value>(matrix: &CostMatrix<T>) -> Vec<RangeInclusive<usize>> {
    let clusters = matrix.clusters();
    let mut boundaries = Vec::with_capacity(clusters);
    let mut right = matrix.len() - 1;

    for cluster in (0..clusters).rev() {
        let left = matrix.split(cluster, right);
        boundaries.push(left..=right);
        if cluster > 0 {
            right = left - 1;
        }
    }

    boundaries.reverse();
    boundaries
}

/// Copies each boundary range out of `sorted`.
pub fn slice_clusters<T: Copy>(sorted: &[T], boundaries: &[RangeInclusive<usize>]) -> Vec<Vec<T>> {
    boundaries
        .iter()
        .map(|range| sorted[range.clone()].to_vec())
        .collect()
}
