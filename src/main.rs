use anyhow::Context;
use chromakey_rs::image_pipeline::{
    ChromaKeyPipeline, CompositePipeline, Mode, PipelineConfig, Settings,
};
use chromakey_rs::logger;

use tracing::{error, info};

const SETTINGS_ENV: &str = "CHROMAKEY_SETTINGS";
const DEFAULT_SETTINGS: &str = "chromakey.toml";

fn log_config(config: &PipelineConfig) {
    info!("Hue range: ({}, {})", config.hue_range.low(), config.hue_range.high());
    info!(
        "Row parallelism: {}",
        if config.parallel {
            "enabled"
        } else {
            "disabled"
        }
    );
}

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting chromakey...");

    let settings_path =
        std::env::var(SETTINGS_ENV).unwrap_or_else(|_| DEFAULT_SETTINGS.to_string());
    let settings = Settings::load_or_default(&settings_path)
        .with_context(|| format!("loading settings from {}", settings_path))?;
    let config = settings.to_config().context("invalid pipeline settings")?;
    let layout = settings
        .frame_layout()
        .with_context(|| format!("{} must describe the input [frame]", settings_path))?;

    match settings.mode() {
        Mode::Mask => {
            let pipeline = ChromaKeyPipeline::new(config, layout);

            info!("Chroma key pipeline initialized");
            log_config(pipeline.config());
            info!(
                "Input frame: {}x{}x{} ({:?})",
                layout.width, layout.height, layout.channels, layout.origin
            );

            match pipeline.convert_file("input.raw", "output.rgba") {
                Ok(_) => info!("Masking successful!"),
                Err(e) => error!("Masking failed: {}", e),
            }
        }
        Mode::Composite => {
            let background = settings
                .background_layout()
                .with_context(|| format!("{} must describe the [background]", settings_path))?;
            let pipeline = CompositePipeline::new(config, layout, background);

            info!("Composite pipeline initialized");
            log_config(pipeline.config());
            info!(
                "Foreground frame: {}x{}x{} ({:?})",
                layout.width, layout.height, layout.channels, layout.origin
            );
            info!(
                "Background frame: {}x{}x{} ({:?})",
                background.width, background.height, background.channels, background.origin
            );

            match pipeline.convert_file("foreground.raw", "background.raw", "output.rgba") {
                Ok(_) => info!("Compositing successful!"),
                Err(e) => error!("Compositing failed: {}", e),
            }
        }
    }

    Ok(())
}
