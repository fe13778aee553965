use std::ops::RangeInclusive;

use log::debug;

use super::config::CkmeansConfig;
use super::cost_matrix::CostMatrix;
use super::extract::{backtrack_boundaries, slice_clusters};
use super::prefix::{all_equal, sorted_copy, PrefixSums};
use super::validate::{validate_cluster_count, validate_finite};
use crate::error::Result;
use crate::Value;

/// An optimal partition of sorted values into contiguous clusters, together
/// with per-cluster statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<T> {
    clusters: Vec<Vec<T>>,
    boundaries: Vec<RangeInclusive<usize>>,
    within_ss: Vec<T>,
    centers: Vec<T>,
}

impl<T: Value> Partition<T> {
    fn from_boundaries(
        sorted: &[T],
        prefix: &PrefixSums<T>,
        boundaries: Vec<RangeInclusive<usize>>,
    ) -> Self {
        let within_ss = boundaries
            .iter()
            .map(|range| prefix.ssq(*range.start(), *range.end()))
            .collect();
        let centers = boundaries
            .iter()
            .map(|range| prefix.mean(*range.start(), *range.end()))
            .collect();
        Self {
            clusters: slice_clusters(sorted, &boundaries),
            boundaries,
            within_ss,
            centers,
        }
    }

    /// The lone, empty cluster returned for an empty input. It has no index
    /// range and no center.
    fn empty() -> Self {
        Self {
            clusters: vec![Vec::new()],
            boundaries: Vec::new(),
            within_ss: vec![T::zero()],
            centers: Vec::new(),
        }
    }

    /// The clusters, lowest values first. Each is sorted ascending.
    pub fn clusters(&self) -> &[Vec<T>] {
        &self.clusters
    }

    pub fn into_clusters(self) -> Vec<Vec<T>> {
        self.clusters
    }

    /// Number of clusters.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Index range of each cluster within the sorted input. Empty when the
    /// input was empty.
    pub fn boundaries(&self) -> &[RangeInclusive<usize>] {
        &self.boundaries
    }

    /// Sum of squared deviations from its own mean, per cluster.
    pub fn within_ss(&self) -> &[T] {
        &self.within_ss
    }

    /// Sum of [`within_ss`](Self::within_ss): the minimized objective.
    pub fn total_within_ss(&self) -> T {
        self.within_ss.iter().fold(T::zero(), |acc, &ss| acc + ss)
    }

    /// Mean of each cluster.
    pub fn centers(&self) -> &[T] {
        &self.centers
    }

    /// Number of values in each cluster.
    pub fn sizes(&self) -> Vec<usize> {
        self.clusters.iter().map(Vec::len).collect()
    }

    /// The lowest value of every cluster except the first. A value `x` falls in
    /// cluster `c` when `breaks[c - 1] <= x < breaks[c]`.
    pub fn breaks(&self) -> Vec<T> {
        self.clusters
            .iter()
            .skip(1)
            .filter_map(|cluster| cluster.first().copied())
            .collect()
    }
}

/// Clusters `values` into `config.clusters` groups with the least total
/// within-cluster sum of squares.
///
/// The result is globally optimal. When every value is identical a single
/// cluster holding all of them is returned, whatever the requested count
/// (zero included). An empty input counts as identical and yields one empty
/// cluster.
///
/// # Errors
///
/// - [`Error::InvalidClusterCount`](crate::Error::InvalidClusterCount) when the
///   requested count exceeds `values.len()`, or is zero for values that are
///   not all identical.
/// - [`Error::NonFiniteValue`](crate::Error::NonFiniteValue) when an input is
///   NaN or infinite.
///
/// # Examples
///
/// ```
/// use ckmeans_dp::{cluster, CkmeansConfig};
///
/// let values = vec![0.0, 1.0, 2.0, 50.0, 100.0, 101.0, 103.0];
/// let partition = cluster(&values, &CkmeansConfig::new(3)).unwrap();
///
/// assert_eq!(partition.sizes(), vec![3, 1, 3]);
/// assert_eq!(partition.centers()[1], 50.0);
/// assert_eq!(partition.breaks(), vec![50.0, 100.0]);
/// ```
pub fn cluster<T: Value>(values: &[T], config: &CkmeansConfig) -> Result<Partition<T>> {
    validate_cluster_count(values.len(), config.clusters)?;
    validate_finite(values)?;

    let sorted = sorted_copy(values);
    let prefix = PrefixSums::new(&sorted)?;

    if all_equal(&sorted) {
        debug!(
            "all {} values identical, returning one cluster instead of {}",
            sorted.len(),
            config.clusters
        );
        return Ok(match sorted.len().checked_sub(1) {
            Some(last) => Partition::from_boundaries(&sorted, &prefix, vec![0..=last]),
            None => Partition::empty(),
        });
    }

    debug!(
        "partitioning {} values into {} clusters (parallel: {})",
        sorted.len(),
        config.clusters,
        config.parallel
    );
    let matrix = CostMatrix::build(&prefix, config)?;
    let boundaries = backtrack_boundaries(&matrix);
    let partition = Partition::from_boundaries(&sorted, &prefix, boundaries);
    debug!(
        "optimal within-cluster sum of squares: {:?}",
        matrix.total_cost()
    );

    Ok(partition)
}

/// Partitions `values` into `cluster_count` contiguous clusters minimizing the
/// total within-cluster sum of squares, returning the clusters in ascending
/// order.
///
/// See [`cluster`] for the error cases and the all-identical special case.
///
/// # Examples
///
/// ```
/// use ckmeans_dp::partition;
///
/// let clusters = partition(&[3.0, 2.0, 3.0, 5.0, 2.0, 1.0], 3).unwrap();
/// assert_eq!(clusters, vec![vec![1.0, 2.0, 2.0], vec![3.0, 3.0], vec![5.0]]);
///
/// assert!(partition(&[1.0], 2).is_err());
/// ```
pub fn partition<T: Value>(values: &[T], cluster_count: usize) -> Result<Vec<Vec<T>>> {
    cluster(values, &CkmeansConfig::new(cluster_count)).map(Partition::into_clusters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_more_clusters_than_values() {
        assert_eq!(
            partition::<f64>(&[], 10),
            Err(Error::InvalidClusterCount {
                requested: 10,
                available: 0
            })
        );
        assert!(partition(&[1.0], 2).is_err());
    }

    #[test]
    fn test_zero_clusters_need_identical_values() {
        assert_eq!(
            partition(&[1.0, 2.0], 0),
            Err(Error::InvalidClusterCount {
                requested: 0,
                available: 2
            })
        );
        assert_eq!(partition(&[5.0, 5.0], 0).unwrap(), vec![vec![5.0, 5.0]]);
    }

    #[test]
    fn test_empty_input_with_zero_clusters() {
        assert_eq!(partition::<f64>(&[], 0).unwrap(), vec![Vec::<f64>::new()]);

        let detail = cluster::<f64>(&[], &CkmeansConfig::new(0)).unwrap();
        assert_eq!(detail.len(), 1);
        assert!(detail.boundaries().is_empty());
        assert!(detail.centers().is_empty());
        assert_eq!(detail.total_within_ss(), 0.0);
        assert_eq!(detail.sizes(), vec![0]);
    }

    #[test]
    fn test_nan_rejected() {
        assert_eq!(
            partition(&[1.0, f64::NAN, 3.0], 2),
            Err(Error::NonFiniteValue { index: 1 })
        );
    }

    #[test]
    fn test_single_value() {
        assert_eq!(partition(&[1.0], 1).unwrap(), vec![vec![1.0]]);
    }

    #[test]
    fn test_identical_values_form_one_cluster() {
        let values = [1.0, 1.0, 1.0, 1.0];
        assert_eq!(partition(&values, 1).unwrap(), vec![vec![1.0; 4]]);
        assert_eq!(partition(&values, 4).unwrap(), vec![vec![1.0; 4]]);

        let detail = cluster(&values, &CkmeansConfig::new(3)).unwrap();
        assert_eq!(detail.len(), 1);
        assert_eq!(detail.within_ss(), &[0.0]);
        assert_eq!(detail.centers(), &[1.0]);
        assert_eq!(detail.boundaries().to_vec(), vec![0..=3usize]);
        assert!(detail.breaks().is_empty());
    }

    #[test]
    fn test_known_partitions() {
        assert_eq!(
            partition(&[-1.0, 2.0, -1.0, 2.0, 4.0, 5.0, 6.0, -1.0, 2.0, -1.0], 3).unwrap(),
            vec![
                vec![-1.0, -1.0, -1.0, -1.0],
                vec![2.0, 2.0, 2.0],
                vec![4.0, 5.0, 6.0]
            ]
        );
        assert_eq!(
            partition(&[3.0, 2.0, 3.0, 5.0, 2.0, 1.0], 3).unwrap(),
            vec![vec![1.0, 2.0, 2.0], vec![3.0, 3.0], vec![5.0]]
        );
        assert_eq!(
            partition(&[0.0, 1.0, 2.0, 50.0, 100.0, 101.0, 103.0], 3).unwrap(),
            vec![vec![0.0, 1.0, 2.0], vec![50.0], vec![100.0, 101.0, 103.0]]
        );
    }

    #[test]
    fn test_small_partitions() {
        let cases: Vec<(Vec<f64>, usize, Vec<Vec<f64>>)> = vec![
            (vec![1.0, 1.0, 2.0], 3, vec![vec![1.0], vec![1.0], vec![2.0]]),
            (vec![1.0, 2.0, 3.0], 3, vec![vec![1.0], vec![2.0], vec![3.0]]),
            (vec![0.0, 3.0, 4.0], 2, vec![vec![0.0], vec![3.0, 4.0]]),
            (vec![-3.0, 0.0, 4.0], 2, vec![vec![-3.0, 0.0], vec![4.0]]),
            (vec![1.0, 2.0, 2.0, 3.0], 3, vec![vec![1.0], vec![2.0, 2.0], vec![3.0]]),
            (
                vec![1.0, 2.0, 3.0, 2.0, 3.0],
                3,
                vec![vec![1.0], vec![2.0, 2.0], vec![3.0, 3.0]],
            ),
            (
                vec![3.0, 2.0, 3.0, 2.0, 1.0],
                3,
                vec![vec![1.0], vec![2.0, 2.0], vec![3.0, 3.0]],
            ),
            (
                vec![0.0, 1.0, 2.0, 100.0, 101.0, 103.0],
                2,
                vec![vec![0.0, 1.0, 2.0], vec![100.0, 101.0, 103.0]],
            ),
        ];
        for (values, k, expected) in cases {
            assert_eq!(partition(&values, k).unwrap(), expected, "input {values:?}, k = {k}");
        }
    }

    #[test]
    fn test_nearly_equal_values() {
        let values = [64.64249127327881, 64.64249127328245, 57.79216426169771];
        assert_eq!(
            partition(&values, 2).unwrap(),
            vec![
                vec![57.79216426169771],
                vec![64.64249127327881, 64.64249127328245]
            ]
        );
    }

    #[test]
    fn test_partition_statistics() {
        let values = [0.0, 1.0, 2.0, 50.0, 100.0, 101.0, 103.0];
        let detail = cluster(&values, &CkmeansConfig::new(3)).unwrap();
        assert_eq!(detail.boundaries().to_vec(), vec![0..=2usize, 3..=3, 4..=6]);
        assert_eq!(detail.sizes(), vec![3, 1, 3]);
        assert_abs_diff_eq!(detail.within_ss()[0], 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(detail.within_ss()[1], 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(detail.within_ss()[2], 14.0 / 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(detail.total_within_ss(), 2.0 + 14.0 / 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(detail.centers()[0], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(detail.centers()[2], 304.0 / 3.0, epsilon = 1e-9);
        assert_eq!(detail.breaks(), vec![50.0, 100.0]);
    }

    #[test]
    fn test_single_precision() {
        let clusters = partition(&[0.0f32, 1.0, 2.0, 50.0, 100.0, 101.0, 103.0], 3).unwrap();
        assert_eq!(
            clusters,
            vec![vec![0.0f32, 1.0, 2.0], vec![50.0], vec![100.0, 101.0, 103.0]]
        );
    }
}
