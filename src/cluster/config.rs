/// Column ranges shorter than this are filled on the calling thread even when
/// parallel filling is enabled.
pub const DEFAULT_PARALLEL_MIN_SPAN: usize = 4096;

/// Configuration options for optimal one-dimensional clustering.
#[derive(Debug, Clone)]
pub struct CkmeansConfig {
    /// Number of clusters to produce.
    pub clusters: usize,
    /// Fork the two halves of each column range onto the rayon pool.
    pub parallel: bool,
    /// Smallest column range that is split across threads.
    pub parallel_min_span: usize,
}

impl CkmeansConfig {
    /// Create a new config for `clusters` clusters. Parallel filling follows the
    /// `parallel` cargo feature.
    pub fn new(clusters: usize) -> Self {
        Self {
            clusters,
            parallel: cfg!(feature = "parallel"),
            parallel_min_span: DEFAULT_PARALLEL_MIN_SPAN,
        }
    }

    /// Enable or disable fork-join filling of the cost matrix.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Customize the smallest column range handed to a separate task.
    pub fn with_parallel_min_span(mut self, span: usize) -> Self {
        self.parallel_min_span = span;
        self
    }

    /// The span at which column filling forks, if it forks at all.
    pub(crate) fn fork_span(&self) -> Option<usize> {
        self.parallel.then_some(self.parallel_min_span.max(1))
    }
}
