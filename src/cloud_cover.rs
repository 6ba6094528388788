//! Cloud cover index module
//!
//! This module computes the fraction of cloud in a sky photograph restricted
//! to the opaque white region of a mask, with separate modules for raster
//! decoding, the classification engine, PNG output and pipeline orchestration.

pub mod common;
pub mod raster;
pub mod engine;
pub mod png;
pub mod pipeline;

pub use common::{
    CloudCoverError,
    Result,
};

pub use raster::{
    Color,
    Raster,
    RasterReader,
    RgbaRaster,
    ImageRasterReader,
};

pub use engine::{
    Alignment,
    Classification,
    CloudCoverEngine,
    EngineConfig,
    IndexAccumulator,
    Point,
    Rectangle,
    SegmentationRaster,
    Traversal,
    CLOUD_RATIO_THRESHOLD,
};

pub use png::{
    SegmentationWriter,
    PngSegmentationWriter,
};

pub use pipeline::{
    CloudCoverPipeline,
    CloudCoverReport,
    PipelineConfig,
    PipelineConfigBuilder,
    PipelineTimings,
};
