//! Pipeline module
//!
//! This module orchestrates reading, decoding, classification and segmentation
//! output for one source/mask pair.

mod types;
mod timing;
mod cloud_cover_pipeline;


pub use types::{PipelineConfig, PipelineConfigBuilder};
pub use timing::{PipelineTimings, StepTiming, Timer};
pub use cloud_cover_pipeline::{CloudCoverPipeline, CloudCoverReport};
