//! Alignment, masking and classification engine
//!
//! One traversal of the overlap rectangle classifies every pixel and feeds the
//! index accumulator and, when requested, the segmentation raster.

pub mod alignment;
pub mod classifier;
pub mod aggregator;
pub mod segmentation;
pub mod types;
mod cloud_cover_engine;

pub use alignment::{Alignment, Point, Rectangle};
pub use classifier::{CLOUD_RATIO_THRESHOLD, Classification, classify};
pub use aggregator::IndexAccumulator;
pub use segmentation::SegmentationRaster;
pub use types::{EngineConfig, Traversal};
pub use cloud_cover_engine::CloudCoverEngine;
