//! Chroma key module
//!
//! Marks pixels whose hue falls inside a configured band as fully transparent
//! and everything else as fully opaque.

pub mod types;
mod masker;

pub use types::{HueRange, HUE_LIMIT};
pub use masker::{ChromaKeyMasker, MaskStats, apply_mask, mask_interleaved};
