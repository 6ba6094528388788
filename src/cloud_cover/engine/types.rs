//! Engine configuration types

/// How the overlap rectangle is traversed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Traversal {
    /// Single-threaded, row-major
    #[default]
    Sequential,
    /// Rows processed on the rayon thread pool, each with its own accumulator
    Parallel,
}

/// Options of a single engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    /// Render the segmentation raster during the traversal
    pub segmentation: bool,
    pub traversal: Traversal,
}

impl EngineConfig {
    pub fn with_segmentation(mut self, enable: bool) -> Self {
        self.segmentation = enable;
        self
    }

    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }
}
