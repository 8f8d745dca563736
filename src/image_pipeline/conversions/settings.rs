//! TOML settings source for pipeline options.
//!
//! Every key is optional; missing keys fall back to [`PipelineConfig`]
//! defaults.
//!
//! ```toml
//! mode = "mask"
//! parallel = true
//! max_dimension = 20000
//!
//! [hue_range]
//! low = 131.0
//! high = 145.0
//!
//! [frame]
//! width = 640
//! height = 480
//! channels = 3
//! origin = "top_left"
//!
//! # background layout for `mode = "composite"`, defaults to [frame]
//! [background]
//! width = 640
//! height = 480
//! channels = 4
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::image_pipeline::chroma_key::HueRange;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::conversions::config::PipelineConfig;
use crate::image_pipeline::frame::FrameLayout;

/// Hue bounds as written in the settings file, validated by [`Settings::to_config`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HueBounds {
    pub low: f64,
    pub high: f64,
}

/// Which pipeline the binary runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Chroma key one frame
    #[default]
    Mask,
    /// Composite a foreground frame over a background frame
    Composite,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub mode: Option<Mode>,
    pub hue_range: Option<HueBounds>,
    pub parallel: Option<bool>,
    pub validate_dimensions: Option<bool>,
    pub max_dimension: Option<usize>,
    pub frame: Option<FrameLayout>,
    pub background: Option<FrameLayout>,
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| PipelineError::SettingsError(e.to_string()))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading settings from {}", path.display());

        let text = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::InputReadError(format!("{}: {}", path.display(), e))
        })?;
        toml::from_str(&text)
            .map_err(|e| PipelineError::SettingsError(format!("{}: {}", path.display(), e)))
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn to_config(&self) -> Result<PipelineConfig> {
        let mut builder = PipelineConfig::builder();

        if let Some(bounds) = self.hue_range {
            builder = builder.hue_range(HueRange::new(bounds.low, bounds.high)?);
        }
        if let Some(parallel) = self.parallel {
            builder = builder.parallel(parallel);
        }
        if let Some(validate) = self.validate_dimensions {
            builder = builder.validate_dimensions(validate);
        }
        if let Some(max) = self.max_dimension {
            builder = builder.max_dimension(Some(max));
        }

        Ok(builder.build())
    }

    pub fn mode(&self) -> Mode {
        self.mode.unwrap_or_default()
    }

    pub fn frame_layout(&self) -> Option<FrameLayout> {
        self.frame
    }

    /// Layout of the composite background, falling back to `[frame]`.
    pub fn background_layout(&self) -> Option<FrameLayout> {
        self.background.or(self.frame)
    }
}
