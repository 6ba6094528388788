//! Raster reader implementation using the image library.
//!
//! Only PNG and JPEG streams are accepted. The format is sniffed from the
//! stream's magic bytes rather than trusted from a file extension.

use image::ImageFormat;
use tracing::debug;

use crate::cloud_cover::common::error::{CloudCoverError, Result};
use crate::cloud_cover::raster::reader::RasterReader;
use crate::cloud_cover::raster::types::{Raster, RgbaRaster};

/// Formats this reader will decode.
pub const SUPPORTED_FORMATS: [ImageFormat; 2] = [ImageFormat::Png, ImageFormat::Jpeg];

/// Raster reader that uses the image library for decoding.
pub struct ImageRasterReader;

impl RasterReader for ImageRasterReader {
    /// Decodes a PNG or JPEG byte stream into an owned raster.
    ///
    /// # Returns
    ///
    /// * `Ok(RgbaRaster)` - Successfully decoded image
    /// * `Err(CloudCoverError::UnsupportedFormat)` - The stream is not PNG or JPEG
    /// * `Err(CloudCoverError::DecodeError)` - The stream looks like PNG/JPEG but is unreadable
    fn read_raster(&self, data: &[u8]) -> Result<RgbaRaster> {
        debug!("Decoding image, {} bytes", data.len());

        let format = image::guess_format(data)
            .map_err(|e| CloudCoverError::UnsupportedFormat(e.to_string()))?;

        if !SUPPORTED_FORMATS.contains(&format) {
            return Err(CloudCoverError::UnsupportedFormat(format!("{:?}", format)));
        }

        let decoded = image::load_from_memory_with_format(data, format)
            .map_err(|e| CloudCoverError::DecodeError(e.to_string()))?;

        let raster = RgbaRaster::from_dynamic(decoded);
        debug!("Decoded {:?} image: {}x{}", format, raster.width(), raster.height());

        Ok(raster)
    }
}
