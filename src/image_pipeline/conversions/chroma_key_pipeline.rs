use tracing::{info, instrument};
use std::io::Write;
use std::path::Path;

use crate::image_pipeline::{
    buffer::{ImageBuffer, Origin, into_origin},
    chroma_key::{ChromaKeyMasker, MaskStats},
    common::error::{PipelineError, Result},
    conversions::{config::PipelineConfig, timing::PipelineTimings},
    frame::{FrameDecoder, FrameEncoder, FrameLayout, RawFrameDecoder, RawFrameEncoder},
};

/// Decode → chroma key mask → top-left row order → encode.
pub struct ChromaKeyPipeline<D: FrameDecoder, E: FrameEncoder> {
    decoder: D,
    encoder: E,
    config: PipelineConfig,
}

impl ChromaKeyPipeline<RawFrameDecoder, RawFrameEncoder> {
    pub fn new(config: PipelineConfig, layout: FrameLayout) -> Self {
        Self {
            decoder: RawFrameDecoder::new(layout),
            encoder: RawFrameEncoder,
            config,
        }
    }
}

impl<D: FrameDecoder, E: FrameEncoder> ChromaKeyPipeline<D, E> {
    pub fn with_custom(decoder: D, encoder: E, config: PipelineConfig) -> Self {
        Self {
            decoder,
            encoder,
            config,
        }
    }

    fn masker(&self) -> ChromaKeyMasker {
        ChromaKeyMasker::new(self.config.hue_range).parallel(self.config.parallel)
    }

    fn run(
        &self,
        input_data: &[u8],
        output: &mut dyn Write,
        timings: &mut PipelineTimings,
    ) -> Result<(ImageBuffer, MaskStats)> {
        let frame = timings.time("decode", || self.decoder.decode(input_data))?;

        let image = timings.time("validate_dimensions", || {
            self.config.check_dimensions(frame.width, frame.height)?;
            ImageBuffer::from_frame(frame)
        })?;

        let (masked, stats) = timings.time("mask", || self.masker().apply_with_stats(image));

        let masked = timings.time("orient", || into_origin(masked, Origin::TopLeft));

        timings.time("encode", || self.encoder.encode(&masked, output))?;

        Ok((masked, stats))
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<()> {
        self.convert_with_timings(input_data, output).map(|_| ())
    }

    pub fn convert_with_timings(
        &self,
        input_data: &[u8],
        output: &mut dyn Write,
    ) -> Result<PipelineTimings> {
        let mut timings = PipelineTimings::new();
        info!("Starting chroma key masking");

        let (image, stats) = self.run(input_data, output, &mut timings)?;

        info!(
            width = image.width(),
            height = image.height(),
            keyed = stats.keyed,
            total = stats.total,
            "Masking complete in {:.3}ms",
            timings.total_duration().as_secs_f64() * 1000.0
        );
        timings.log_summary();
        Ok(timings)
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<()> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Masking file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                PipelineError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let mut output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                PipelineError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };

        self.convert(&input_data, &mut output_file)?;

        Ok(())
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PipelineConfig) {
        self.config = config;
    }
}
