//! Pixel buffer types

use serde::{Deserialize, Serialize};

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::frame::DecodedFrame;

/// Fully opaque alpha value, used when a 3-channel source is upconverted.
pub const OPAQUE: u8 = 255;

/// One 8-bit RGBA pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, OPAQUE)
    }
}

/// Which visual edge row 0 of a buffer represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Row 0 is the top of the image (file / scanline order)
    #[default]
    TopLeft,
    /// Row 0 is the bottom of the image (rendering surface order)
    BottomLeft,
}

/// `width * height * channels`, or `InvalidDimensions` when the product
/// does not fit in `usize`.
pub fn sample_count(width: usize, height: usize, channels: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .ok_or(PipelineError::InvalidDimensions(width, height))
}

impl Origin {
    pub fn flipped(self) -> Self {
        match self {
            Origin::TopLeft => Origin::BottomLeft,
            Origin::BottomLeft => Origin::TopLeft,
        }
    }
}

/// A contiguous, row-major grid of RGBA pixels tagged with its origin convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: usize,
    height: usize,
    origin: Origin,
    pixels: Vec<Pixel>,
}

impl ImageBuffer {
    /// Creates a transparent black buffer.
    pub fn new(width: usize, height: usize, origin: Origin) -> Result<Self> {
        let len = sample_count(width, height, 1)?;
        Ok(Self {
            width,
            height,
            origin,
            pixels: vec![Pixel::default(); len],
        })
    }

    pub fn from_pixels(
        width: usize,
        height: usize,
        origin: Origin,
        pixels: Vec<Pixel>,
    ) -> Result<Self> {
        let expected = sample_count(width, height, 1)?;
        if pixels.len() != expected {
            return Err(PipelineError::BufferLengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            origin,
            pixels,
        })
    }

    /// Builds a buffer from interleaved 8-bit samples.
    ///
    /// Three-channel data gets a synthesized opaque alpha; four-channel data is
    /// copied as is. Any other channel count is rejected.
    pub fn from_interleaved(
        width: usize,
        height: usize,
        channels: usize,
        data: &[u8],
        origin: Origin,
    ) -> Result<Self> {
        if channels != 3 && channels != 4 {
            return Err(PipelineError::UnsupportedChannelCount(channels));
        }

        let expected = sample_count(width, height, channels)?;
        if data.len() != expected {
            return Err(PipelineError::BufferLengthMismatch {
                expected,
                actual: data.len(),
            });
        }

        let pixels: Vec<Pixel> = match channels {
            3 => data
                .chunks_exact(3)
                .map(|px| Pixel::opaque(px[0], px[1], px[2]))
                .collect(),
            _ => data
                .chunks_exact(4)
                .map(|px| Pixel::new(px[0], px[1], px[2], px[3]))
                .collect(),
        };

        Ok(Self {
            width,
            height,
            origin,
            pixels,
        })
    }

    pub fn from_frame(frame: DecodedFrame) -> Result<Self> {
        Self::from_interleaved(frame.width, frame.height, frame.channels, &frame.data, frame.origin)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub(crate) fn set_origin(&mut self, origin: Origin) {
        self.origin = origin;
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    /// Returns storage row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: usize) -> &[Pixel] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [Pixel] {
        let start = y * self.width;
        &mut self.pixels[start..start + self.width]
    }

    /// Storage rows in order. Always yields `height` slices, empty ones when
    /// `width` is 0.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        (0..self.height).map(move |y| self.row(y))
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x)
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get_mut(y * self.width + x)
    }

    /// Interleaved RGBA bytes in storage row order.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|px| [px.r, px.g, px.b, px.a])
            .collect()
    }
}
