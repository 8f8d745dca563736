//! Pipeline conversions module
//!
//! This module contains the orchestration logic that wires frame decoders and
//! encoders around the masking and compositing operations.

pub mod config;
pub mod settings;
mod timing;
mod chroma_key_pipeline;
mod composite_pipeline;


pub use config::{PipelineConfig, PipelineConfigBuilder, DEFAULT_MAX_DIMENSION};
pub use settings::{HueBounds, Mode, Settings};
pub use timing::{PipelineTimings, StepTiming, Timer};
pub use chroma_key_pipeline::ChromaKeyPipeline;
pub use composite_pipeline::CompositePipeline;
