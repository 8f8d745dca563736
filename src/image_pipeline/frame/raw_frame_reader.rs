//! Decoder for headerless interleaved frames.
//!
//! The bytes carry no metadata, so the geometry comes from a [`FrameLayout`]
//! supplied by the caller. Channel count validation is left to
//! [`ImageBuffer::from_frame`](crate::image_pipeline::buffer::ImageBuffer::from_frame).

use tracing::debug;
use crate::image_pipeline::common::error::{Result, PipelineError};
use crate::image_pipeline::frame::types::{DecodedFrame, FrameLayout};
use crate::image_pipeline::frame::reader::FrameDecoder;

#[derive(Debug, Clone, Copy)]
pub struct RawFrameDecoder {
    layout: FrameLayout,
}

impl RawFrameDecoder {
    pub fn new(layout: FrameLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }
}

impl FrameDecoder for RawFrameDecoder {
    fn decode(&self, data: &[u8]) -> Result<DecodedFrame> {
        debug!("Decoding raw frame, {} bytes", data.len());

        let expected = self.layout.byte_len()?;
        if data.len() != expected {
            return Err(PipelineError::DecodeError(format!(
                "{}x{}x{} frame needs {} bytes, got {}",
                self.layout.width,
                self.layout.height,
                self.layout.channels,
                expected,
                data.len()
            )));
        }

        Ok(DecodedFrame {
            width: self.layout.width,
            height: self.layout.height,
            channels: self.layout.channels,
            data: data.to_vec(),
            origin: self.layout.origin,
        })
    }
}
