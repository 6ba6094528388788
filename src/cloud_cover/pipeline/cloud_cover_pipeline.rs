use tracing::{info, instrument};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cloud_cover::{
    common::error::{CloudCoverError, Result},
    engine::{Alignment, CloudCoverEngine},
    png::{PngSegmentationWriter, SegmentationWriter},
    raster::{ImageRasterReader, Raster, RasterReader, RgbaRaster},
    pipeline::{PipelineConfig, PipelineTimings},
};

/// Outcome of one successful computation
#[derive(Debug, Clone)]
pub struct CloudCoverReport {
    /// Fraction of included pixels classified as cloud, in [0, 1]
    pub index: f64,
    pub included_pixels: u64,
    pub cloud_pixels: u64,
    pub alignment: Alignment,
    /// Where the segmentation PNG was written, if it was
    pub segmentation_path: Option<PathBuf>,
    pub timings: PipelineTimings,
}

pub struct CloudCoverPipeline<R: RasterReader, W: SegmentationWriter> {
    reader: R,
    writer: W,
    config: PipelineConfig,
}

impl CloudCoverPipeline<ImageRasterReader, PngSegmentationWriter> {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            reader: ImageRasterReader,
            writer: PngSegmentationWriter,
            config,
        }
    }
}

impl<R: RasterReader, W: SegmentationWriter> CloudCoverPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: PipelineConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    /// Computes the index from two encoded images held in memory.
    ///
    /// The segmentation is rendered and written to `segmentation_output` only
    /// when one is given. The configured paths are not used.
    #[instrument(skip_all, fields(source_size = source_data.len(), mask_size = mask_data.len()))]
    pub fn process(
        &self,
        source_data: &[u8],
        mask_data: &[u8],
        segmentation_output: Option<&mut dyn Write>,
    ) -> Result<CloudCoverReport> {
        let mut timings = PipelineTimings::new();
        let partial = self.process_timed(source_data, mask_data, segmentation_output, &mut timings)?;
        Ok(partial.into_report(timings))
    }

    /// Validates the configuration, reads both files, computes the index and
    /// writes the segmentation file when enabled.
    #[instrument(skip(self))]
    pub fn run(&self) -> Result<CloudCoverReport> {
        self.config.validate()?;

        let source_path = self.config.source_path()?;
        let mask_path = self.config.mask_path()?;
        info!(
            source = %source_path.display(),
            mask = %mask_path.display(),
            segmentation = self.config.segmentation,
            "Computing cloud cover index"
        );

        let mut timings = PipelineTimings::new();
        let source_data = timings.time("read_source", || read_input(source_path))?;
        let mask_data = timings.time("read_mask", || read_input(mask_path))?;

        let (source, mask) = self.decode_pair(&source_data, &mask_data, &mut timings)?;
        let mut engine = CloudCoverEngine::new(&source, &mask, self.config.engine_config());
        let partial = self.classify(&mut engine, &mut timings)?;

        let segmentation_path = match (&self.config.output_path, self.config.segmentation) {
            (Some(output_path), true) => {
                let _span = tracing::info_span!("write_segmentation").entered();
                let segmentation = engine.segmentation()?;
                let mut output_file = std::fs::File::create(output_path).map_err(|e| {
                    CloudCoverError::OutputWriteError(format!("{}: {}", output_path.display(), e))
                })?;
                timings
                    .time("encode_segmentation", || {
                        self.writer.write_segmentation(segmentation, &mut output_file)
                    })
                    .map_err(|e| match e {
                        CloudCoverError::IoError(e) => CloudCoverError::OutputWriteError(
                            format!("{}: {}", output_path.display(), e),
                        ),
                        other => other,
                    })?;
                info!(output = %output_path.display(), "Segmentation image saved");
                Some(output_path.clone())
            }
            _ => None,
        };

        let mut report = partial.into_report(timings);
        report.segmentation_path = segmentation_path;
        Ok(report)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn process_timed(
        &self,
        source_data: &[u8],
        mask_data: &[u8],
        segmentation_output: Option<&mut dyn Write>,
        timings: &mut PipelineTimings,
    ) -> Result<PartialReport> {
        let (source, mask) = self.decode_pair(source_data, mask_data, timings)?;
        let engine_config = self
            .config
            .engine_config()
            .with_segmentation(segmentation_output.is_some());
        let mut engine = CloudCoverEngine::new(&source, &mask, engine_config);
        let partial = self.classify(&mut engine, timings)?;

        if let Some(output) = segmentation_output {
            let _span = tracing::info_span!("encode_segmentation").entered();
            let segmentation = engine.segmentation()?;
            timings.time("encode_segmentation", || {
                self.writer.write_segmentation(segmentation, output)
            })?;
        }

        Ok(partial)
    }

    fn decode_pair(
        &self,
        source_data: &[u8],
        mask_data: &[u8],
        timings: &mut PipelineTimings,
    ) -> Result<(RgbaRaster, RgbaRaster)> {
        let source = {
            let _span = tracing::info_span!("decode_source").entered();
            timings.time("decode_source", || self.decode("source", source_data))?
        };
        let mask = {
            let _span = tracing::info_span!("decode_mask").entered();
            timings.time("decode_mask", || self.decode("mask", mask_data))?
        };

        info!(
            source_width = source.width(),
            source_height = source.height(),
            mask_width = mask.width(),
            mask_height = mask.height(),
            "Images decoded"
        );
        Ok((source, mask))
    }

    fn decode(&self, label: &str, data: &[u8]) -> Result<RgbaRaster> {
        self.reader.read_raster(data).map_err(|e| match e {
            CloudCoverError::DecodeError(msg) => {
                CloudCoverError::DecodeError(format!("{}: {}", label, msg))
            }
            CloudCoverError::UnsupportedFormat(msg) => {
                CloudCoverError::UnsupportedFormat(format!("{}: {}", label, msg))
            }
            other => other,
        })
    }

    fn classify(
        &self,
        engine: &mut CloudCoverEngine<'_>,
        timings: &mut PipelineTimings,
    ) -> Result<PartialReport> {
        let _span = tracing::info_span!(
            "classify",
            width = engine.alignment().overlap.width(),
            height = engine.alignment().overlap.height()
        )
        .entered();

        let index = timings.time("classify", || engine.run())?;
        let counts = engine.accumulator().unwrap_or_default();

        info!(
            index,
            included = counts.total_included(),
            cloud = counts.total_cloud(),
            "Classification complete"
        );

        Ok(PartialReport {
            index,
            included_pixels: counts.total_included(),
            cloud_pixels: counts.total_cloud(),
            alignment: *engine.alignment(),
        })
    }
}

struct PartialReport {
    index: f64,
    included_pixels: u64,
    cloud_pixels: u64,
    alignment: Alignment,
}

impl PartialReport {
    fn into_report(self, timings: PipelineTimings) -> CloudCoverReport {
        CloudCoverReport {
            index: self.index,
            included_pixels: self.included_pixels,
            cloud_pixels: self.cloud_pixels,
            alignment: self.alignment,
            segmentation_path: None,
            timings,
        }
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    let _span = tracing::info_span!("read_input_file", path = %path.display()).entered();
    std::fs::read(path)
        .map_err(|e| CloudCoverError::InputReadError(format!("{}: {}", path.display(), e)))
}
