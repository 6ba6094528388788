//! Common utilities module
//!
//! This module contains shared utilities used across the cloud cover modules.

pub mod error;

pub use error::{CloudCoverError, Result};
