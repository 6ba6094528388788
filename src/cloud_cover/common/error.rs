use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudCoverError {
    #[error("Missing {0} image path")]
    MissingInput(&'static str),

    #[error("Missing output file, required when segmentation output is enabled")]
    MissingOutputPath,

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to encode PNG image: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("No included pixels: the mask has no opaque white pixel inside the overlap")]
    NoIncludedPixels,

    #[error("Segmentation not available: enable segmentation and call run() before reading it")]
    NotYetComputed,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CloudCoverError {
    /// True for errors raised while validating the configuration, before any I/O.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingInput(_) | Self::MissingOutputPath)
    }
}

pub type Result<T> = std::result::Result<T, CloudCoverError>;
