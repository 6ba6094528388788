//! Cloud cover index accumulation.

use crate::cloud_cover::common::error::{CloudCoverError, Result};
use crate::cloud_cover::engine::classifier::Classification;

/// Counters of included and cloud pixels. `total_cloud <= total_included` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexAccumulator {
    total_included: u64,
    total_cloud: u64,
}

impl IndexAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulate(&mut self, result: Classification) {
        match result {
            Classification::Excluded => {}
            Classification::Sky => self.total_included += 1,
            Classification::Cloud => {
                self.total_included += 1;
                self.total_cloud += 1;
            }
        }
    }

    /// Adds the counts of a partial accumulator, e.g. one per traversed row.
    pub fn merge(&mut self, other: IndexAccumulator) {
        self.total_included += other.total_included;
        self.total_cloud += other.total_cloud;
    }

    pub fn merged(mut self, other: IndexAccumulator) -> Self {
        self.merge(other);
        self
    }

    pub fn total_included(&self) -> u64 {
        self.total_included
    }

    pub fn total_cloud(&self) -> u64 {
        self.total_cloud
    }

    /// Fraction of included pixels classified as cloud.
    ///
    /// Fails with [`CloudCoverError::NoIncludedPixels`] when nothing was
    /// included, which is distinct from a valid index of 0.0.
    pub fn finalize(&self) -> Result<f64> {
        if self.total_included == 0 {
            return Err(CloudCoverError::NoIncludedPixels);
        }
        Ok(self.total_cloud as f64 / self.total_included as f64)
    }
}
