//! Colour model conversions

pub mod hsv;

pub use hsv::{Hsv, rgb_to_hsv};
