//! Black/white segmentation raster.

use image::RgbaImage;

use crate::cloud_cover::common::error::{CloudCoverError, Result};
use crate::cloud_cover::engine::classifier::Classification;
use crate::cloud_cover::raster::types::{Color, Raster};

pub(crate) const CHANNELS: usize = 4;
const SKY_PIXEL: [u8; CHANNELS] = [0, 0, 0, 255];
const CLOUD_PIXEL: [u8; CHANNELS] = [255, 255, 255, 255];

/// RGBA8 raster with the size of the overlap rectangle.
///
/// Sky pixels are opaque black and cloud pixels opaque white. Excluded pixels
/// keep the buffer's zero value, fully transparent black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentationRaster {
    image: RgbaImage,
}

impl SegmentationRaster {
    /// Fails with `InvalidDimensions` when a side does not fit in `u32`.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let (w, h) = u32::try_from(width)
            .ok()
            .zip(u32::try_from(height).ok())
            .ok_or(CloudCoverError::InvalidDimensions(width, height))?;
        Ok(Self {
            image: RgbaImage::new(w, h),
        })
    }

    pub fn mark(&mut self, x: usize, y: usize, result: Classification) {
        let row = self.row_mut(y);
        paint(&mut row[x * CHANNELS..(x + 1) * CHANNELS], result);
    }

    /// Bytes of one row, `width * 4` long.
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let stride = self.stride();
        let raw: &mut [u8] = &mut self.image;
        &mut raw[y * stride..(y + 1) * stride]
    }

    /// Mutable RGBA8 bytes, row-major.
    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.image
    }

    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn stride(&self) -> usize {
        self.image.width() as usize * CHANNELS
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }
}

/// Writes the segmentation color of `result` into a single RGBA8 pixel.
pub(crate) fn paint(pixel: &mut [u8], result: Classification) {
    match result {
        Classification::Sky => pixel.copy_from_slice(&SKY_PIXEL),
        Classification::Cloud => pixel.copy_from_slice(&CLOUD_PIXEL),
        Classification::Excluded => {}
    }
}

impl Raster for SegmentationRaster {
    fn width(&self) -> usize {
        self.image.width() as usize
    }

    fn height(&self) -> usize {
        self.image.height() as usize
    }

    fn sample(&self, x: usize, y: usize) -> Color {
        let [r, g, b, a] = self.image.get_pixel(x as u32, y as u32).0;
        Color::from_straight_rgba8(r, g, b, a)
    }
}
