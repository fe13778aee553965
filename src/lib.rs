//! Exact k-means clustering of one-dimensional data.
//!
//! Values are split into contiguous groups of the sorted input so that the
//! total within-cluster sum of squared deviations is as small as possible.
//! The optimum is found by dynamic programming over a cluster-by-value cost
//! table (the Ckmeans.1d.dp method of Wang and Song), with a divide-and-conquer
//! column fill that brings the work down to O(k n log n).
//!
//! ```
//! use ckmeans_dp::partition;
//!
//! let values = [-1.0, 2.0, -1.0, 2.0, 4.0, 5.0, 6.0, -1.0, 2.0, -1.0];
//! let clusters = partition(&values, 3).unwrap();
//! assert_eq!(
//!     clusters,
//!     vec![vec![-1.0, -1.0, -1.0, -1.0], vec![2.0, 2.0, 2.0], vec![4.0, 5.0, 6.0]]
//! );
//! ```
use std::fmt::Debug;

use num_traits::Float;

pub mod cluster;
pub mod error;

pub use cluster::{cluster, partition, CkmeansConfig, Partition};
pub use error::{Error, Result};

/// Floating-point types the engine can cluster.
pub trait Value: Float + Send + Sync + Debug {}
impl<T: Float + Send + Sync + Debug> Value for T {}
