use tracing::{debug, info, instrument};
use std::io::Write;
use std::path::Path;

use crate::image_pipeline::{
    buffer::{ImageBuffer, Origin, into_origin},
    common::error::{PipelineError, Result},
    composite::Compositor,
    conversions::{config::PipelineConfig, timing::PipelineTimings},
    frame::{FrameDecoder, FrameEncoder, FrameLayout, RawFrameDecoder, RawFrameEncoder},
};

/// Decode foreground and background → top-left row order → A over B → encode.
pub struct CompositePipeline<D: FrameDecoder, E: FrameEncoder> {
    foreground: D,
    background: D,
    encoder: E,
    config: PipelineConfig,
}

impl CompositePipeline<RawFrameDecoder, RawFrameEncoder> {
    pub fn new(config: PipelineConfig, foreground: FrameLayout, background: FrameLayout) -> Self {
        Self {
            foreground: RawFrameDecoder::new(foreground),
            background: RawFrameDecoder::new(background),
            encoder: RawFrameEncoder,
            config,
        }
    }
}

impl<D: FrameDecoder, E: FrameEncoder> CompositePipeline<D, E> {
    pub fn with_custom(foreground: D, background: D, encoder: E, config: PipelineConfig) -> Self {
        Self {
            foreground,
            background,
            encoder,
            config,
        }
    }

    fn decode(&self, decoder: &D, data: &[u8]) -> Result<ImageBuffer> {
        let frame = decoder.decode(data)?;
        self.config.check_dimensions(frame.width, frame.height)?;
        ImageBuffer::from_frame(frame)
    }

    fn run(
        &self,
        fg_data: &[u8],
        bg_data: &[u8],
        output: &mut dyn Write,
        timings: &mut PipelineTimings,
    ) -> Result<ImageBuffer> {
        let fg = timings.time("decode_foreground", || self.decode(&self.foreground, fg_data))?;
        let bg = timings.time("decode_background", || self.decode(&self.background, bg_data))?;

        let (fg, bg) = timings.time("orient", || {
            if fg.origin() != bg.origin() {
                debug!("Inputs differ in row order ({:?} vs {:?})", fg.origin(), bg.origin());
            }
            (into_origin(fg, Origin::TopLeft), into_origin(bg, Origin::TopLeft))
        });

        let compositor = Compositor::new().parallel(self.config.parallel);
        let image = timings.time("composite", || compositor.over(&fg, &bg))?;

        timings.time("encode", || self.encoder.encode(&image, output))?;

        Ok(image)
    }

    #[instrument(
        skip(self, fg_data, bg_data, output),
        fields(fg_size = fg_data.len(), bg_size = bg_data.len())
    )]
    pub fn convert(&self, fg_data: &[u8], bg_data: &[u8], output: &mut dyn Write) -> Result<()> {
        self.convert_with_timings(fg_data, bg_data, output).map(|_| ())
    }

    pub fn convert_with_timings(
        &self,
        fg_data: &[u8],
        bg_data: &[u8],
        output: &mut dyn Write,
    ) -> Result<PipelineTimings> {
        let mut timings = PipelineTimings::new();
        info!("Starting over composite");

        let image = self.run(fg_data, bg_data, output, &mut timings)?;

        info!(
            width = image.width(),
            height = image.height(),
            "Composite complete in {:.3}ms",
            timings.total_duration().as_secs_f64() * 1000.0
        );
        timings.log_summary();
        Ok(timings)
    }

    #[instrument(skip(self, fg_path, bg_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>, R: AsRef<Path>>(
        &self,
        fg_path: P,
        bg_path: Q,
        output_path: R,
    ) -> Result<()> {
        let fg_path = fg_path.as_ref();
        let bg_path = bg_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            foreground = %fg_path.display(),
            background = %bg_path.display(),
            output = %output_path.display(),
            "Compositing files"
        );

        let read = |path: &Path| {
            let _span = tracing::info_span!("read_input_file", path = %path.display()).entered();
            std::fs::read(path).map_err(|e| {
                PipelineError::InputReadError(format!("{}: {}", path.display(), e))
            })
        };
        let fg_data = read(fg_path)?;
        let bg_data = read(bg_path)?;

        let mut output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                PipelineError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };

        self.convert(&fg_data, &bg_data, &mut output_file)?;

        Ok(())
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PipelineConfig) {
        self.config = config;
    }
}
