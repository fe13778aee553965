use log::trace;
use ndarray::{Array2, ArrayView1, ArrayViewMut1, Axis};

use super::config::CkmeansConfig;
use super::prefix::PrefixSums;
use crate::error::{Error, Result};
use crate::Value;

/// Dynamic-programming tables for the optimal partition of sorted values.
///
/// Both tables have one row per cluster count and one column per value.
/// `cost[[c, i]]` is the smallest within-cluster sum of squares reachable by
/// splitting sorted values `0..=i` into `c + 1` clusters, and
/// `splits[[c, i]]` is the index where the last of those clusters begins.
///
/// Only the final column of the last row is filled; nothing reads the rest.
#[derive(Debug, Clone)]
pub struct CostMatrix<T> {
    cost: Array2<T>,
    splits: Array2<usize>,
}

impl<T: Value> CostMatrix<T> {
    /// Fills both tables for `config.clusters` clusters over the values
    /// summarized by `prefix`.
    ///
    /// Each row after the first is filled by divide and conquer over its
    /// columns: the optimal split of the middle column bounds the search for
    /// every column on either side, since optimal splits never move left as
    /// the right edge grows. That keeps the fill at O(k n log n).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidClusterCount`] if `config.clusters` is zero or exceeds
    /// `prefix.len()`.
    pub fn build(prefix: &PrefixSums<T>, config: &CkmeansConfig) -> Result<Self> {
        let n = prefix.len();
        let k = config.clusters;
        if k == 0 || k > n {
            return Err(Error::InvalidClusterCount {
                requested: k,
                available: n,
            });
        }

        let mut cost = Array2::from_elem((k, n), T::zero());
        let mut splits = Array2::<usize>::zeros((k, n));

        for i in 0..n {
            cost[[0, i]] = prefix.ssq(0, i);
        }

        let fork_span = config.fork_span();
        for cluster in 1..k {
            let first_column = if cluster < k - 1 { cluster } else { n - 1 };

            let (done_cost, mut open_cost) = cost.view_mut().split_at(Axis(0), cluster);
            let (done_splits, mut open_splits) = splits.view_mut().split_at(Axis(0), cluster);
            let row = RowFill {
                cluster,
                prefix,
                prev_cost: done_cost.row(cluster - 1),
                prev_splits: done_splits.row(cluster - 1),
                fork_span,
            };

            let (_, cost_columns) = open_cost.row_mut(0).split_at(Axis(0), first_column);
            let (_, split_columns) = open_splits.row_mut(0).split_at(Axis(0), first_column);
            row.fill(first_column, cost_columns, split_columns, cluster, None);

            trace!(
                "filled row {} from column {}: cost[{}] = {:?}",
                cluster,
                first_column,
                n - 1,
                open_cost[[0, n - 1]]
            );
        }

        Ok(Self { cost, splits })
    }

    /// Number of rows, i.e. the requested cluster count.
    pub fn clusters(&self) -> usize {
        self.cost.nrows()
    }

    /// Number of columns, i.e. the value count.
    pub fn len(&self) -> usize {
        self.cost.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.cost.is_empty()
    }

    pub fn cost(&self, cluster: usize, i: usize) -> T {
        self.cost[[cluster, i]]
    }

    pub fn split(&self, cluster: usize, i: usize) -> usize {
        self.splits[[cluster, i]]
    }

    /// The optimal total cost of the full partition.
    pub fn total_cost(&self) -> T {
        self.cost[[self.clusters() - 1, self.len() - 1]]
    }
}

/// One row of the fill, with read access to the finished row above it.
struct RowFill<'a, T> {
    cluster: usize,
    prefix: &'a PrefixSums<T>,
    prev_cost: ArrayView1<'a, T>,
    prev_splits: ArrayView1<'a, usize>,
    fork_span: Option<usize>,
}

impl<T: Value> RowFill<'_, T> {
    /// Fills the columns starting at `offset` covered by `cost` and `splits`.
    ///
    /// Every optimal split in the range is at least `lower` and, when the
    /// column just past the range is already known, at most `upper`.
    fn fill(
        &self,
        offset: usize,
        cost: ArrayViewMut1<'_, T>,
        splits: ArrayViewMut1<'_, usize>,
        lower: usize,
        upper: Option<usize>,
    ) {
        let len = cost.len();
        if len == 0 {
            return;
        }

        let i = offset + (len - 1) / 2;
        let (best_cost, best_split) = self.best_split(i, lower, upper);

        let (cost_left, cost_rest) = cost.split_at(Axis(0), i - offset);
        let (mut cost_mid, cost_right) = cost_rest.split_at(Axis(0), 1);
        let (splits_left, splits_rest) = splits.split_at(Axis(0), i - offset);
        let (mut splits_mid, splits_right) = splits_rest.split_at(Axis(0), 1);
        cost_mid[0] = best_cost;
        splits_mid[0] = best_split;

        let left = move || self.fill(offset, cost_left, splits_left, lower, Some(best_split));
        let right = move || self.fill(i + 1, cost_right, splits_right, best_split, upper);
        match self.fork_span {
            Some(span) if len >= span => {
                rayon::join(left, right);
            }
            _ => {
                left();
                right();
            }
        }
    }

    /// Finds the cheapest start `j` for a last cluster ending at `i`.
    ///
    /// Candidates are scanned from both ends at once: `j` walks down from
    /// the upper bound while `jlow` walks up. The scan stops as soon as the
    /// cluster `[j, i]` plus the cheapest possible prefix cost can no longer
    /// beat the best found so far.
    fn best_split(&self, i: usize, lower: usize, upper: Option<usize>) -> (T, usize) {
        let prev = &self.prev_cost;

        // Singleton last cluster.
        let mut best_cost = prev[i - 1];
        let mut best_split = i;

        let mut jlow = lower.max(self.prev_splits[i]);
        let jhigh = match upper {
            Some(upper) => (i - 1).min(upper),
            None => i - 1,
        };

        let mut j = jhigh;
        while j >= jlow {
            let sji = self.prefix.ssq(j, i);
            if sji + prev[jlow - 1] >= best_cost {
                break;
            }

            let ssq_jlow = self.prefix.ssq(jlow, i) + prev[jlow - 1];
            if ssq_jlow < best_cost {
                best_cost = ssq_jlow;
                best_split = jlow;
            }
            jlow += 1;

            let ssq_j = sji + prev[j - 1];
            if ssq_j < best_cost {
                best_cost = ssq_j;
                best_split = j;
            }
            j -= 1;
        }

        (best_cost, best_split)
    }
}
