//! "Over" compositing of two RGBA buffers.
//!
//! Every channel, alpha included, is blended as
//!
//! ```text
//! out = round(((aA / 255) * (A / 255) + (1 - aA / 255) * (aB / 255) * (B / 255)) * 255)
//! ```
//!
//! The result is not divided by the output alpha, so colours darken as the
//! foreground alpha drops. Existing outputs depend on this exact arithmetic.

use rayon::prelude::*;
use tracing::debug;

use crate::image_pipeline::buffer::{ImageBuffer, Pixel};
use crate::image_pipeline::common::error::{PipelineError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct Compositor {
    parallel: bool,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits the work across rows with rayon. Output is identical.
    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = enable;
        self
    }

    /// Composites `fg` over `bg` into a new buffer.
    pub fn over(&self, fg: &ImageBuffer, bg: &ImageBuffer) -> Result<ImageBuffer> {
        if fg.dimensions() != bg.dimensions() {
            return Err(PipelineError::IncompatibleDimensions(
                fg.width(),
                fg.height(),
                bg.width(),
                bg.height(),
            ));
        }
        if fg.origin() != bg.origin() {
            return Err(PipelineError::OrientationMismatch(fg.origin(), bg.origin()));
        }

        let (width, height) = fg.dimensions();
        debug!("Compositing {}x{} buffers", width, height);

        let mut out = ImageBuffer::new(width, height, fg.origin())?;
        let row_len = width.max(1);

        if self.parallel {
            out.pixels_mut()
                .par_chunks_mut(row_len)
                .zip(fg.pixels().par_chunks(row_len))
                .zip(bg.pixels().par_chunks(row_len))
                .for_each(|((dst, a), b)| over_row(dst, a, b));
        } else {
            out.pixels_mut()
                .chunks_mut(row_len)
                .zip(fg.pixels().chunks(row_len))
                .zip(bg.pixels().chunks(row_len))
                .for_each(|((dst, a), b)| over_row(dst, a, b));
        }

        Ok(out)
    }
}

/// Composites `fg` over `bg` sequentially.
pub fn over(fg: &ImageBuffer, bg: &ImageBuffer) -> Result<ImageBuffer> {
    Compositor::new().over(fg, bg)
}

fn over_row(dst: &mut [Pixel], fg: &[Pixel], bg: &[Pixel]) {
    for ((out, a), b) in dst.iter_mut().zip(fg).zip(bg) {
        *out = over_pixel(*a, *b);
    }
}

#[inline]
pub fn over_pixel(fg: Pixel, bg: Pixel) -> Pixel {
    let blend = |ca: u8, cb: u8| blend_channel(ca, cb, fg.a, bg.a);
    Pixel {
        r: blend(fg.r, bg.r),
        g: blend(fg.g, bg.g),
        b: blend(fg.b, bg.b),
        a: blend(fg.a, bg.a),
    }
}

#[inline]
fn blend_channel(ca: u8, cb: u8, alpha_a: u8, alpha_b: u8) -> u8 {
    let aa = alpha_a as f64 / 255.0;
    let ab = alpha_b as f64 / 255.0;
    let value = (aa * (ca as f64 / 255.0) + (1.0 - aa) * ab * (cb as f64 / 255.0)) * 255.0;
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::buffer::Origin;

    fn single(px: Pixel) -> ImageBuffer {
        ImageBuffer::from_pixels(1, 1, Origin::TopLeft, vec![px]).unwrap()
    }

    #[test]
    fn test_half_red_over_blue() {
        let a = single(Pixel::new(255, 0, 0, 128));
        let b = single(Pixel::new(0, 0, 255, 255));

        // r = 128/255 * 255; b = 127/255 * 255; a = 128*128/255 + 127
        let out = over(&a, &b).unwrap();
        assert_eq!(out.pixels()[0], Pixel::new(128, 0, 127, 191));
    }

    #[test]
    fn test_opaque_over_itself_is_identity() {
        let pixels = (0..64u32)
            .map(|i| Pixel::new((i * 4) as u8, (255 - i * 3) as u8, (i * 11) as u8, 255))
            .collect();
        let a = ImageBuffer::from_pixels(8, 8, Origin::TopLeft, pixels).unwrap();

        assert_eq!(over(&a, &a).unwrap(), a);
    }

    #[test]
    fn test_opaque_foreground_occludes_background() {
        let a = single(Pixel::new(10, 20, 30, 255));
        let b = single(Pixel::new(200, 150, 100, 255));
        assert_eq!(over(&a, &b).unwrap().pixels()[0], Pixel::new(10, 20, 30, 255));
    }

    #[test]
    fn test_transparent_foreground_scales_background_by_its_alpha() {
        let a = single(Pixel::new(90, 90, 90, 0));

        let opaque_bg = single(Pixel::new(200, 100, 50, 255));
        assert_eq!(over(&a, &opaque_bg).unwrap().pixels()[0], Pixel::new(200, 100, 50, 255));

        // not un-premultiplied: 128*200/255 = 100.39, 128*128/255 = 64.25
        let half_bg = single(Pixel::new(200, 100, 50, 128));
        assert_eq!(over(&a, &half_bg).unwrap().pixels()[0], Pixel::new(100, 50, 25, 64));

        let clear_bg = single(Pixel::new(200, 100, 50, 0));
        assert_eq!(over(&a, &clear_bg).unwrap().pixels()[0], Pixel::new(0, 0, 0, 0));
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = ImageBuffer::new(2, 2, Origin::TopLeft).unwrap();
        let b = ImageBuffer::new(2, 3, Origin::TopLeft).unwrap();

        let result = over(&a, &b);
        assert!(matches!(result, Err(PipelineError::IncompatibleDimensions(2, 2, 2, 3))));
    }

    #[test]
    fn test_origin_mismatch() {
        let a = ImageBuffer::new(2, 2, Origin::TopLeft).unwrap();
        let b = ImageBuffer::new(2, 2, Origin::BottomLeft).unwrap();

        let result = over(&a, &b);
        assert!(matches!(
            result,
            Err(PipelineError::OrientationMismatch(Origin::TopLeft, Origin::BottomLeft))
        ));
    }

    #[test]
    fn test_output_keeps_origin() {
        let a = ImageBuffer::new(3, 1, Origin::BottomLeft).unwrap();
        let b = ImageBuffer::new(3, 1, Origin::BottomLeft).unwrap();
        assert_eq!(over(&a, &b).unwrap().origin(), Origin::BottomLeft);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (width, height) = (19, 31);
        let make = |seed: usize| {
            let pixels = (0..width * height)
                .map(|i| {
                    let v = i * seed;
                    Pixel::new(v as u8, (v >> 3) as u8, (v * 5) as u8, (v * 17) as u8)
                })
                .collect();
            ImageBuffer::from_pixels(width, height, Origin::TopLeft, pixels).unwrap()
        };
        let (a, b) = (make(3), make(7));

        let sequential = Compositor::new().over(&a, &b).unwrap();
        let parallel = Compositor::new().parallel(true).over(&a, &b).unwrap();
        assert_eq!(sequential, parallel);
    }
}
