//! Pipeline configuration types

use std::path::{Path, PathBuf};

use crate::cloud_cover::common::error::{CloudCoverError, Result};
use crate::cloud_cover::engine::{EngineConfig, Traversal};

/// Configuration for one cloud cover computation
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Sky photograph, PNG or JPEG, any dimensions
    pub source_path: Option<PathBuf>,
    /// Black/white mask, PNG or JPEG, any dimensions
    pub mask_path: Option<PathBuf>,
    /// Whether to write the black/white segmentation as PNG
    pub segmentation: bool,
    /// Segmentation output file, required when `segmentation` is set
    pub output_path: Option<PathBuf>,
    pub traversal: Traversal,
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Checks the required paths. Touches no file.
    pub fn validate(&self) -> Result<()> {
        if self.source_path.is_none() {
            return Err(CloudCoverError::MissingInput("source"));
        }
        if self.mask_path.is_none() {
            return Err(CloudCoverError::MissingInput("mask"));
        }
        if self.segmentation && self.output_path.is_none() {
            return Err(CloudCoverError::MissingOutputPath);
        }
        Ok(())
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::default()
            .with_segmentation(self.segmentation)
            .with_traversal(self.traversal)
    }

    pub(crate) fn source_path(&self) -> Result<&Path> {
        self.source_path.as_deref().ok_or(CloudCoverError::MissingInput("source"))
    }

    pub(crate) fn mask_path(&self) -> Result<&Path> {
        self.mask_path.as_deref().ok_or(CloudCoverError::MissingInput("mask"))
    }
}

/// Builder for PipelineConfig
#[derive(Default)]
pub struct PipelineConfigBuilder {
    source_path: Option<PathBuf>,
    mask_path: Option<PathBuf>,
    segmentation: Option<bool>,
    output_path: Option<PathBuf>,
    traversal: Option<Traversal>,
}

impl PipelineConfigBuilder {
    pub fn source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    pub fn mask_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.mask_path = Some(path.into());
        self
    }

    pub fn segmentation(mut self, enable: bool) -> Self {
        self.segmentation = Some(enable);
        self
    }

    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = Some(traversal);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig {
            source_path: self.source_path.or(default.source_path),
            mask_path: self.mask_path.or(default.mask_path),
            segmentation: self.segmentation.unwrap_or(default.segmentation),
            output_path: self.output_path.or(default.output_path),
            traversal: self.traversal.unwrap_or(default.traversal),
        }
    }
}
