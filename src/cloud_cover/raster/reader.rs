use crate::cloud_cover::common::error::Result;
use crate::cloud_cover::raster::types::RgbaRaster;

pub trait RasterReader {
    fn read_raster(&self, data: &[u8]) -> Result<RgbaRaster>;
}
