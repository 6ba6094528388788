//! Raster and color sample types

use image::{DynamicImage, ImageBuffer, Rgba, RgbaImage};

/// A color sample with 16-bit, alpha-premultiplied channels.
///
/// 8-bit channel values are expanded to 16 bits by `v * 0x101`, so an 8-bit
/// 255 becomes 0xffff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}

impl Color {
    pub const OPAQUE_WHITE: Color = Color::new(0xffff, 0xffff, 0xffff, 0xffff);
    pub const OPAQUE_BLACK: Color = Color::new(0, 0, 0, 0xffff);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    /// Builds a sample from channels that are already premultiplied.
    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }

    /// Premultiplies straight (non-premultiplied) 16-bit channels by alpha.
    pub fn from_straight_rgba16(r: u16, g: u16, b: u16, a: u16) -> Self {
        let premultiply = |c: u16| (c as u32 * a as u32 / 0xffff) as u16;
        Self {
            r: premultiply(r),
            g: premultiply(g),
            b: premultiply(b),
            a,
        }
    }

    /// Expands straight 8-bit channels to 16 bits and premultiplies them.
    pub fn from_straight_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let expand = |c: u8| c as u16 * 0x101;
        Self::from_straight_rgba16(expand(r), expand(g), expand(b), expand(a))
    }
}

/// Read-only 2D grid of color samples with its origin at (0, 0).
///
/// `sample` is only called with `x < width()` and `y < height()`. Rendering a
/// segmentation requires both overlap sides to fit in `u32`.
pub trait Raster: Sync {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn sample(&self, x: usize, y: usize) -> Color;
}

/// Straight-alpha RGBA image stored at 16 bits per channel.
pub type Rgba16Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// Owned raster backed by an `image` buffer, as produced by decoders.
#[derive(Debug, Clone)]
pub struct RgbaRaster {
    image: Rgba16Image,
}

impl RgbaRaster {
    pub fn new(image: Rgba16Image) -> Self {
        Self { image }
    }

    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self::new(image.into_rgba16())
    }

    pub fn from_rgba8(image: RgbaImage) -> Self {
        Self::from_dynamic(DynamicImage::ImageRgba8(image))
    }

    /// Builds an 8-bit raster pixel by pixel; mostly useful for tests and fixtures.
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Self
    where
        F: FnMut(u32, u32) -> Rgba<u8>,
    {
        Self::from_rgba8(RgbaImage::from_fn(width, height, f))
    }

}

impl Raster for RgbaRaster {
    fn width(&self) -> usize {
        self.image.width() as usize
    }

    fn height(&self) -> usize {
        self.image.height() as usize
    }

    fn sample(&self, x: usize, y: usize) -> Color {
        let [r, g, b, a] = self.image.get_pixel(x as u32, y as u32).0;
        Color::from_straight_rgba16(r, g, b, a)
    }
}
