use std::cmp::Ordering;

use num_traits::NumCast;

use crate::error::{Error, Result};
use crate::Value;

/// Returns a sorted copy of `values` in ascending order.
///
/// The input must already be free of NaNs (see
/// [`validate_finite`](super::validate::validate_finite)); any pair that does
/// not compare is treated as equal.
pub fn sorted_copy<T: Value>(values: &[T]) -> Vec<T> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// True when every value equals the first one. Empty and single-element
/// inputs count as all-equal.
pub fn all_equal<T: Value>(values: &[T]) -> bool {
    match values.first() {
        Some(first) => values.iter().all(|v| v == first),
        None => true,
    }
}

/// Running sums and sums of squares over sorted values, shifted by the median
/// so that the sum-of-squares identity stays well conditioned for inputs far
/// from zero.
///
/// `sums[i]` and `squares[i]` cover the shifted values `0..=i`. The shift
/// cancels in every deviation computed here, so callers never see it except
/// through [`PrefixSums::mean`], which adds it back.
#[derive(Debug, Clone)]
pub struct PrefixSums<T> {
    shift: T,
    sums: Vec<T>,
    squares: Vec<T>,
    // counts[m] == m + 1, converted once so range costs never convert.
    counts: Vec<T>,
}

impl<T: Value> PrefixSums<T> {
    /// Builds the cumulative arrays over `sorted`, which must be ascending.
    pub fn new(sorted: &[T]) -> Result<Self> {
        let n = sorted.len();
        let shift = sorted.get(n / 2).copied().unwrap_or_else(T::zero);

        let mut sums = Vec::with_capacity(n);
        let mut squares = Vec::with_capacity(n);
        let mut counts = Vec::with_capacity(n);
        let mut sum = T::zero();
        let mut square = T::zero();
        for (i, &value) in sorted.iter().enumerate() {
            let shifted = value - shift;
            sum = sum + shifted;
            square = square + shifted * shifted;
            sums.push(sum);
            squares.push(square);
            let count =
                <T as NumCast>::from(i + 1).ok_or(Error::NumericConversion { count: i + 1 })?;
            counts.push(count);
        }

        Ok(Self {
            shift,
            sums,
            squares,
            counts,
        })
    }

    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    /// Sum of squared deviations from the mean over the sorted range
    /// `[j, i]`, clamped at zero to absorb round-off.
    ///
    /// # Panics
    ///
    /// Panics if `j > i` or `i` is out of bounds.
    #[inline]
    pub fn ssq(&self, j: usize, i: usize) -> T {
        let sji = if j > 0 {
            let count = self.counts[i - j];
            let mean = (self.sums[i] - self.sums[j - 1]) / count;
            self.squares[i] - self.squares[j - 1] - count * mean * mean
        } else {
            self.squares[i] - self.sums[i] * self.sums[i] / self.counts[i]
        };
        if sji < T::zero() {
            T::zero()
        } else {
            sji
        }
    }

    /// Mean of the original (unshifted) values in `[j, i]`.
    pub fn mean(&self, j: usize, i: usize) -> T {
        let total = if j > 0 {
            self.sums[i] - self.sums[j - 1]
        } else {
            self.sums[i]
        };
        total / self.counts[i - j] + self.shift
    }
}
