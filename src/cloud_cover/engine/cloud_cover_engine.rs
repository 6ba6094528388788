use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::cloud_cover::common::error::{CloudCoverError, Result};
use crate::cloud_cover::engine::aggregator::IndexAccumulator;
use crate::cloud_cover::engine::alignment::{Alignment, Point};
use crate::cloud_cover::engine::classifier::classify;
use crate::cloud_cover::engine::segmentation::{CHANNELS, SegmentationRaster, paint};
use crate::cloud_cover::engine::types::{EngineConfig, Traversal};
use crate::cloud_cover::raster::types::Raster;

/// Cloud cover index calculator for one source/mask pair.
///
/// The source is expected to be a sky photograph and the mask an opaque
/// black/white image. Both are center-aligned and only pixels inside their
/// intersection that map to an opaque white mask pixel are evaluated.
pub struct CloudCoverEngine<'a> {
    source: &'a dyn Raster,
    mask: &'a dyn Raster,
    config: EngineConfig,
    alignment: Alignment,
    accumulator: Option<IndexAccumulator>,
    segmentation: Option<SegmentationRaster>,
}

impl<'a> CloudCoverEngine<'a> {
    pub fn new(source: &'a dyn Raster, mask: &'a dyn Raster, config: EngineConfig) -> Self {
        let alignment = Alignment::resolve(source, mask);
        debug!(?alignment, "Resolved alignment");
        Self {
            source,
            mask,
            config,
            alignment,
            accumulator: None,
            segmentation: None,
        }
    }

    /// Classifies the overlap and returns the cloud cover index.
    ///
    /// Every call starts from fresh counters and a fresh segmentation raster,
    /// so repeated calls return identical results.
    #[instrument(skip(self), fields(width = self.alignment.overlap.width(), height = self.alignment.overlap.height()))]
    pub fn run(&mut self) -> Result<f64> {
        let overlap = self.alignment.overlap;
        let mut segmentation = if self.config.segmentation {
            Some(SegmentationRaster::new(overlap.width(), overlap.height())?)
        } else {
            None
        };

        let rows = RowClassifier {
            source: self.source,
            mask: self.mask,
            alignment: self.alignment,
        };

        let accumulator = if overlap.is_empty() {
            IndexAccumulator::new()
        } else {
            match self.config.traversal {
                Traversal::Sequential => rows.sequential(segmentation.as_mut()),
                Traversal::Parallel => rows.parallel(segmentation.as_mut()),
            }
        };

        debug!(
            included = accumulator.total_included(),
            cloud = accumulator.total_cloud(),
            "Traversal complete"
        );

        self.accumulator = Some(accumulator);
        self.segmentation = segmentation;
        accumulator.finalize()
    }

    /// Segmentation rendered by the last `run()`.
    pub fn segmentation(&self) -> Result<&SegmentationRaster> {
        self.segmentation.as_ref().ok_or(CloudCoverError::NotYetComputed)
    }

    /// Moves the rendered segmentation out of the engine.
    pub fn take_segmentation(&mut self) -> Result<SegmentationRaster> {
        self.segmentation.take().ok_or(CloudCoverError::NotYetComputed)
    }

    /// Counters of the last `run()`, or `None` before the first one.
    pub fn accumulator(&self) -> Option<IndexAccumulator> {
        self.accumulator
    }

    pub fn alignment(&self) -> &Alignment {
        &self.alignment
    }

}

#[derive(Clone, Copy)]
struct RowClassifier<'a> {
    source: &'a dyn Raster,
    mask: &'a dyn Raster,
    alignment: Alignment,
}

impl RowClassifier<'_> {
    fn sequential(&self, mut segmentation: Option<&mut SegmentationRaster>) -> IndexAccumulator {
        let mut total = IndexAccumulator::new();
        for y in 0..self.alignment.overlap.height() {
            let row = segmentation.as_mut().map(|seg| seg.row_mut(y));
            total.merge(self.classify_row(y, row));
        }
        total
    }

    fn parallel(&self, segmentation: Option<&mut SegmentationRaster>) -> IndexAccumulator {
        match segmentation {
            Some(seg) => {
                let stride = seg.stride();
                seg.as_raw_mut()
                    .par_chunks_mut(stride)
                    .enumerate()
                    .map(|(y, row)| self.classify_row(y, Some(row)))
                    .reduce(IndexAccumulator::new, IndexAccumulator::merged)
            }
            None => (0..self.alignment.overlap.height())
                .into_par_iter()
                .map(|y| self.classify_row(y, None))
                .reduce(IndexAccumulator::new, IndexAccumulator::merged),
        }
    }

    fn classify_row(&self, y: usize, mut row: Option<&mut [u8]>) -> IndexAccumulator {
        let mut acc = IndexAccumulator::new();
        for x in 0..self.alignment.overlap.width() {
            let p = Point::new(x, y);
            let m = self.alignment.mask_point(p);
            let s = self.alignment.source_point(p);
            let result = classify(self.mask.sample(m.x, m.y), self.source.sample(s.x, s.y));

            acc.accumulate(result);
            if let Some(row) = row.as_deref_mut() {
                paint(&mut row[x * CHANNELS..(x + 1) * CHANNELS], result);
            }
        }
        acc
    }
}
