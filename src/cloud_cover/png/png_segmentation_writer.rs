use std::io::Write;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use tracing::debug;
use crate::cloud_cover::common::error::{Result, CloudCoverError};
use crate::cloud_cover::engine::segmentation::SegmentationRaster;
use crate::cloud_cover::png::writer::SegmentationWriter;
use crate::cloud_cover::raster::types::Raster;

pub struct PngSegmentationWriter;

impl SegmentationWriter for PngSegmentationWriter {
    fn write_segmentation(&self, segmentation: &SegmentationRaster, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding PNG image: {}x{}", segmentation.width(), segmentation.height());

        let mut buffer = Vec::new();

        PngEncoder::new(&mut buffer)
            .write_image(
                segmentation.as_raw(),
                segmentation.width() as u32,
                segmentation.height() as u32,
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| CloudCoverError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("PNG encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
