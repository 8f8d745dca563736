//! Frame collaborator module
//!
//! Boundary traits for the decoder and encoder that sit on either side of the
//! pixel operations, plus implementations for headerless interleaved frames.

mod reader;
mod writer;
mod raw_frame_reader;
mod raw_frame_writer;
pub mod types;

pub use reader::FrameDecoder;
pub use writer::FrameEncoder;
pub use raw_frame_reader::RawFrameDecoder;
pub use raw_frame_writer::RawFrameEncoder;
pub use types::{DecodedFrame, FrameLayout};
