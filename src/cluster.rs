pub mod config;
pub mod cost_matrix;
pub mod extract;
pub mod partition;
pub mod prefix;
pub mod validate;

// Re-export the clustering entry points with descriptive names
pub use config::{CkmeansConfig, DEFAULT_PARALLEL_MIN_SPAN};
pub use cost_matrix::CostMatrix;
pub use extract::{backtrack_boundaries, slice_clusters};
pub use partition::{cluster, partition, Partition};
pub use prefix::PrefixSums;
pub use validate::validate_cluster_count;
