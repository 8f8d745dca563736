//! Hue-band alpha masking.

use rayon::prelude::*;
use tracing::debug;

use crate::image_pipeline::buffer::{ImageBuffer, OPAQUE, Origin, Pixel};
use crate::image_pipeline::chroma_key::types::HueRange;
use crate::image_pipeline::color::rgb_to_hsv;
use crate::image_pipeline::common::error::Result;

const TRANSPARENT: u8 = 0;

/// Counts gathered while masking a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaskStats {
    /// Pixels whose alpha was set to transparent
    pub keyed: usize,
    /// Pixels visited
    pub total: usize,
}

/// Rewrites the alpha channel of every pixel from its hue.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromaKeyMasker {
    hue_range: HueRange,
    parallel: bool,
}

impl ChromaKeyMasker {
    pub fn new(hue_range: HueRange) -> Self {
        Self {
            hue_range,
            parallel: false,
        }
    }

    /// Splits the work across rows with rayon. Output is identical.
    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = enable;
        self
    }

    pub fn hue_range(&self) -> &HueRange {
        &self.hue_range
    }

    pub fn apply(&self, buffer: ImageBuffer) -> ImageBuffer {
        self.apply_with_stats(buffer).0
    }

    pub fn apply_with_stats(&self, mut buffer: ImageBuffer) -> (ImageBuffer, MaskStats) {
        let range = self.hue_range;
        let width = buffer.width().max(1);
        let total = buffer.pixels().len();

        let keyed = if self.parallel {
            buffer
                .pixels_mut()
                .par_chunks_mut(width)
                .map(|row| mask_row(row, &range))
                .sum::<usize>()
        } else {
            buffer
                .pixels_mut()
                .chunks_mut(width)
                .map(|row| mask_row(row, &range))
                .sum::<usize>()
        };

        let stats = MaskStats { keyed, total };
        debug!(
            "Masked {} of {} pixels with hue range ({}, {})",
            stats.keyed,
            stats.total,
            range.low(),
            range.high()
        );
        (buffer, stats)
    }
}

/// Masks `buffer` in place with the sequential masker and returns it.
pub fn apply_mask(buffer: ImageBuffer, hue_range: &HueRange) -> ImageBuffer {
    ChromaKeyMasker::new(*hue_range).apply(buffer)
}

/// Validates interleaved 3- or 4-channel samples and masks them.
pub fn mask_interleaved(
    width: usize,
    height: usize,
    channels: usize,
    data: &[u8],
    origin: Origin,
    hue_range: &HueRange,
) -> Result<ImageBuffer> {
    let buffer = ImageBuffer::from_interleaved(width, height, channels, data, origin)?;
    Ok(apply_mask(buffer, hue_range))
}

fn mask_row(row: &mut [Pixel], range: &HueRange) -> usize {
    row.iter_mut().map(|px| mask_pixel(px, range) as usize).sum()
}

/// Returns true when the pixel was keyed out.
#[inline]
fn mask_pixel(px: &mut Pixel, range: &HueRange) -> bool {
    let hue = rgb_to_hsv(px.r, px.g, px.b).hue;
    let keyed = range.contains(hue);
    px.a = if keyed { TRANSPARENT } else { OPAQUE };
    keyed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::common::error::PipelineError;

    fn single(px: Pixel) -> ImageBuffer {
        ImageBuffer::from_pixels(1, 1, Origin::TopLeft, vec![px]).unwrap()
    }

    #[test]
    fn test_boundary_hues_stay_opaque() {
        // (0, 250, 75) sits at hue ~138
        let px = Pixel::opaque(0, 250, 75);
        let hue = rgb_to_hsv(px.r, px.g, px.b).hue;
        assert!((hue - 138.0).abs() < 1e-9);

        let inside = apply_mask(single(px), &HueRange::new(131.0, 145.0).unwrap());
        assert_eq!(inside.pixels()[0].a, 0);

        let at_low = apply_mask(single(px), &HueRange::new(hue, hue + 7.0).unwrap());
        assert_eq!(at_low.pixels()[0].a, 255);

        let at_high = apply_mask(single(px), &HueRange::new(hue - 7.0, hue).unwrap());
        assert_eq!(at_high.pixels()[0].a, 255);
    }

    #[test]
    fn test_exact_integer_boundaries() {
        let range = HueRange::new(120.0, 180.0).unwrap();
        let pixels = vec![
            Pixel::opaque(0, 255, 0),   // 120
            Pixel::opaque(0, 255, 255), // 180
            Pixel::opaque(0, 255, 128), // ~150
        ];
        let image = ImageBuffer::from_pixels(3, 1, Origin::TopLeft, pixels).unwrap();

        let masked = apply_mask(image, &range);
        let alphas: Vec<u8> = masked.pixels().iter().map(|px| px.a).collect();
        assert_eq!(alphas, vec![255, 255, 0]);
    }

    #[test]
    fn test_rgb_passes_through_and_alpha_is_overwritten() {
        let range = HueRange::new(100.0, 140.0).unwrap();
        let pixels = vec![Pixel::new(0, 255, 0, 17), Pixel::new(255, 0, 0, 3)];
        let image = ImageBuffer::from_pixels(2, 1, Origin::TopLeft, pixels).unwrap();

        let masked = apply_mask(image, &range);
        assert_eq!(masked.pixels(), &[Pixel::new(0, 255, 0, 0), Pixel::new(255, 0, 0, 255)]);
    }

    #[test]
    fn test_two_pixel_rgb_scenario() {
        let data = [255, 0, 0, 0, 255, 0];
        let range = HueRange::new(100.0, 140.0).unwrap();

        let masked = mask_interleaved(2, 1, 3, &data, Origin::TopLeft, &range).unwrap();
        assert_eq!(masked.pixels(), &[Pixel::new(255, 0, 0, 255), Pixel::new(0, 255, 0, 0)]);
    }

    #[test]
    fn test_rgb_input_is_opaque_outside_range() {
        // hues 0, 60 and 240: none fall in the green band
        let data = [255, 0, 0, 255, 255, 0, 0, 0, 255, 40, 40, 40];
        let range = HueRange::new(100.0, 140.0).unwrap();

        let masked = mask_interleaved(2, 2, 3, &data, Origin::TopLeft, &range).unwrap();
        assert!(masked.pixels().iter().all(|px| px.a == 255));
    }

    #[test]
    fn test_unsupported_channels() {
        let range = HueRange::default();
        let result = mask_interleaved(1, 1, 2, &[0, 0], Origin::TopLeft, &range);
        assert!(matches!(result, Err(PipelineError::UnsupportedChannelCount(2))));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (width, height) = (37, 23);
        let pixels = (0..width * height)
            .map(|i| Pixel::new((i * 13) as u8, (i * 29) as u8, (i * 7) as u8, 128))
            .collect();
        let image = ImageBuffer::from_pixels(width, height, Origin::BottomLeft, pixels).unwrap();
        let range = HueRange::new(60.0, 200.0).unwrap();

        let (sequential, seq_stats) = ChromaKeyMasker::new(range).apply_with_stats(image.clone());
        let masker = ChromaKeyMasker::new(range).parallel(true);
        assert_eq!(masker.hue_range(), &range);
        let (parallel, par_stats) = masker.apply_with_stats(image);

        assert_eq!(sequential, parallel);
        assert_eq!(seq_stats, par_stats);
        assert_eq!(seq_stats.total, width * height);
        assert!(seq_stats.keyed > 0 && seq_stats.keyed < seq_stats.total);
        assert_eq!(parallel.origin(), Origin::BottomLeft);
    }

    #[test]
    fn test_empty_buffer() {
        let image = ImageBuffer::new(0, 0, Origin::TopLeft).unwrap();
        let (masked, stats) = ChromaKeyMasker::default().apply_with_stats(image);
        assert_eq!(stats, MaskStats::default());
        assert!(masked.pixels().is_empty());
    }
}
