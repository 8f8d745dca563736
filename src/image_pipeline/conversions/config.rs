//! Pipeline configuration types

use tracing::warn;

use crate::image_pipeline::chroma_key::HueRange;
use crate::image_pipeline::common::error::{PipelineError, Result};

/// Largest width or height accepted when dimension validation is on
pub const DEFAULT_MAX_DIMENSION: usize = 50_000;

/// Configuration shared by the mask and composite pipelines
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Hue band keyed out by the mask pipeline
    pub hue_range: HueRange,
    /// Whether to reject empty or oversized images before processing
    pub validate_dimensions: bool,
    /// Upper bound on either side when validating; `None` disables the bound
    pub max_dimension: Option<usize>,
    /// Process rows on the rayon thread pool
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            hue_range: HueRange::default(),
            validate_dimensions: true,
            max_dimension: Some(DEFAULT_MAX_DIMENSION),
            parallel: false,
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    pub(crate) fn check_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.max_dimension {
            if width > max || height > max {
                warn!("Image dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(PipelineError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }
}

/// Builder for PipelineConfig
#[derive(Default)]
pub struct PipelineConfigBuilder {
    hue_range: Option<HueRange>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
    parallel: Option<bool>,
}

impl PipelineConfigBuilder {
    pub fn hue_range(mut self, hue_range: HueRange) -> Self {
        self.hue_range = Some(hue_range);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = Some(enable);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig {
            hue_range: self.hue_range.unwrap_or(default.hue_range),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            parallel: self.parallel.unwrap_or(default.parallel),
        }
    }
}
