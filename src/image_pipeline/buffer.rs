//! Pixel buffer module
//!
//! Owned RGBA buffers with an explicit origin convention, plus the row-order
//! adapter used to move between file order and bottom-up surface order.

pub mod types;
pub mod orientation;

pub use types::{ImageBuffer, Origin, Pixel, OPAQUE, sample_count};
pub use orientation::{flip_vertical, into_origin};
