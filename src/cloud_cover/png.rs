//! PNG writing module
//!
//! This module encodes segmentation rasters as PNG streams.

mod writer;
mod png_segmentation_writer;

pub use writer::SegmentationWriter;
pub use png_segmentation_writer::PngSegmentationWriter;
