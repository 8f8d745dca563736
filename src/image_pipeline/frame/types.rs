//! Frame data types

use serde::{Deserialize, Serialize};

use crate::image_pipeline::buffer::{Origin, sample_count};
use crate::image_pipeline::common::error::Result;

/// Decoded samples handed over by a decoder
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Samples per pixel (3 for RGB, 4 for RGBA)
    pub channels: usize,
    /// Interleaved 8-bit samples, row-major
    pub data: Vec<u8>,
    /// Row order of `data`
    pub origin: Origin,
}

/// Out-of-band description of a headerless interleaved frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameLayout {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    #[serde(default)]
    pub origin: Origin,
}

impl FrameLayout {
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
            origin: Origin::TopLeft,
        }
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    /// Number of bytes a frame with this layout occupies.
    pub fn byte_len(&self) -> Result<usize> {
        sample_count(self.width, self.height, self.channels)
    }
}
