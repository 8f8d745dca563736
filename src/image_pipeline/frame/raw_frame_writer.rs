use std::io::Write;
use tracing::debug;
use crate::image_pipeline::buffer::{ImageBuffer, Origin};
use crate::image_pipeline::common::error::{Result, PipelineError};
use crate::image_pipeline::frame::writer::FrameEncoder;

/// Writes interleaved RGBA bytes, top row first, with no header.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawFrameEncoder;

impl FrameEncoder for RawFrameEncoder {
    fn encode(&self, image: &ImageBuffer, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding raw RGBA frame: {}x{}", image.width(), image.height());

        if image.origin() != Origin::TopLeft {
            return Err(PipelineError::OrientationMismatch(Origin::TopLeft, image.origin()));
        }

        output.write_all(&image.to_rgba_bytes())?;

        debug!("Raw frame encoding complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::buffer::Pixel;

    #[test]
    fn test_encode_writes_rgba_rows() {
        let pixels = vec![Pixel::new(1, 2, 3, 4), Pixel::new(5, 6, 7, 8)];
        let image = ImageBuffer::from_pixels(1, 2, Origin::TopLeft, pixels).unwrap();

        let mut output = Vec::new();
        RawFrameEncoder.encode(&image, &mut output).unwrap();
        assert_eq!(output, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_encode_rejects_bottom_up_buffers() {
        let image = ImageBuffer::new(1, 1, Origin::BottomLeft).unwrap();
        let result = RawFrameEncoder.encode(&image, &mut Vec::new());
        assert!(matches!(
            result,
            Err(PipelineError::OrientationMismatch(Origin::TopLeft, Origin::BottomLeft))
        ));
    }
}
