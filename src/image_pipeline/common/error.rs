use thiserror::Error;

use crate::image_pipeline::buffer::Origin;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Unsupported channel count: {0} (expected 3 or 4)")]
    UnsupportedChannelCount(usize),

    #[error("Incompatible dimensions: {0}x{1} vs {2}x{3}")]
    IncompatibleDimensions(usize, usize, usize, usize),

    #[error("Invalid hue range: low={0}, high={1} (expected 0 <= low < high < 360)")]
    InvalidHueRange(f64, f64),

    #[error("Orientation mismatch: expected {0:?}, got {1:?}")]
    OrientationMismatch(Origin, Origin),

    #[error("Buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLengthMismatch { expected: usize, actual: usize },

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode frame: {0}")]
    DecodeError(String),

    #[error("Failed to encode frame: {0}")]
    EncodeError(String),

    #[error("Invalid settings: {0}")]
    SettingsError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
