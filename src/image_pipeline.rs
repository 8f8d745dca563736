//! Image processing pipeline module
//!
//! Pixel-level operations on owned RGBA buffers (chroma key masking and "over"
//! compositing), the row-order adapter between file and surface conventions,
//! and the pipelines that connect them to frame decoders and encoders.

pub mod buffer;
pub mod color;
pub mod chroma_key;
pub mod composite;
pub mod frame;
pub mod conversions;
pub mod common;

pub use common::{
    PipelineError,
    Result,
};

pub use buffer::{
    ImageBuffer,
    Origin,
    Pixel,
    flip_vertical,
    into_origin,
};

pub use color::{
    Hsv,
    rgb_to_hsv,
};

pub use chroma_key::{
    ChromaKeyMasker,
    HueRange,
    MaskStats,
    apply_mask,
    mask_interleaved,
};

pub use composite::{
    Compositor,
    over,
};

pub use frame::{
    DecodedFrame,
    FrameDecoder,
    FrameEncoder,
    FrameLayout,
    RawFrameDecoder,
    RawFrameEncoder,
};

pub use conversions::{
    ChromaKeyPipeline,
    CompositePipeline,
    PipelineConfig,
    PipelineConfigBuilder,
    Mode,
    PipelineTimings,
    Settings,
};
