use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::frame::types::DecodedFrame;

pub trait FrameDecoder {
    fn decode(&self, data: &[u8]) -> Result<DecodedFrame>;
}
