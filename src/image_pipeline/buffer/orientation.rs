//! Conversion between top-left and bottom-left row conventions.

use tracing::debug;

use crate::image_pipeline::buffer::types::{ImageBuffer, Origin};

/// Reverses the row order of `buffer`.
///
/// Row `i` of the result is row `height - 1 - i` of the input. Pixels within a
/// row are untouched and the origin tag is toggled, so the result describes the
/// same visual image stored in the opposite convention.
pub fn flip_vertical(mut buffer: ImageBuffer) -> ImageBuffer {
    let (width, height) = buffer.dimensions();
    debug!("Flipping {}x{} buffer vertically", width, height);

    let pixels = buffer.pixels_mut();
    for top in 0..height / 2 {
        let bottom = height - 1 - top;
        let (upper, lower) = pixels.split_at_mut(bottom * width);
        upper[top * width..(top + 1) * width].swap_with_slice(&mut lower[..width]);
    }

    let origin = buffer.origin().flipped();
    buffer.set_origin(origin);
    buffer
}

/// Returns `buffer` stored in the `target` convention, flipping only when needed.
pub fn into_origin(buffer: ImageBuffer, target: Origin) -> ImageBuffer {
    if buffer.origin() == target {
        return buffer;
    }
    flip_vertical(buffer)
}
