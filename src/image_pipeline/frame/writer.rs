use std::io::Write;
use crate::image_pipeline::buffer::ImageBuffer;
use crate::image_pipeline::common::error::Result;

/// Receives RGBA buffers stored top row first.
pub trait FrameEncoder {
    fn encode(&self, image: &ImageBuffer, output: &mut dyn Write) -> Result<()>;
}
