use std::io::Write;
use crate::cloud_cover::common::error::Result;
use crate::cloud_cover::engine::segmentation::SegmentationRaster;

pub trait SegmentationWriter {
    fn write_segmentation(&self, segmentation: &SegmentationRaster, output: &mut dyn Write) -> Result<()>;
}
