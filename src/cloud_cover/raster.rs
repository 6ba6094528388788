//! Raster access module
//!
//! This module defines the read-only raster interface consumed by the engine,
//! and the decoder that turns PNG/JPEG byte streams into rasters.

mod reader;
mod image_reader;
pub mod types;

pub use reader::RasterReader;
pub use image_reader::ImageRasterReader;
pub use types::{Color, Raster, RgbaRaster};
