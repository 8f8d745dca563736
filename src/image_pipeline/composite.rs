//! Compositing module

mod porter_duff;

pub use porter_duff::{Compositor, over, over_pixel};
