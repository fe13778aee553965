use crate::error::{Error, Result};
use crate::Value;

/// Checks that `requested` clusters can be carved out of `available` values.
///
/// Every cluster must hold at least one value, so `requested` may not exceed
/// `available`. A request for zero clusters passes here: identical inputs
/// collapse to one cluster whatever the count, and only a real partition needs
/// `requested >= 1`.
///
/// # Examples
///
/// ```
/// use ckmeans_dp::cluster::validate::validate_cluster_count;
///
/// assert!(validate_cluster_count(5, 3).is_ok());
/// assert!(validate_cluster_count(1, 2).is_err());
/// assert!(validate_cluster_count(0, 0).is_ok());
/// ```
pub fn validate_cluster_count(available: usize, requested: usize) -> Result<()> {
    if requested > available {
        return Err(Error::InvalidClusterCount {
            requested,
            available,
        });
    }
    Ok(())
}

/// Rejects NaN and infinite inputs, reporting the first offending index.
pub fn validate_finite<T: Value>(values: &[T]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(Error::NonFiniteValue { index }),
        None => Ok(()),
    }
}
