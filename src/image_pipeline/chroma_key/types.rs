//! Chroma key configuration types

use std::str::FromStr;

use crate::image_pipeline::common::error::{PipelineError, Result};

/// Upper (exclusive) bound of the hue circle in degrees.
pub const HUE_LIMIT: f64 = 360.0;

/// Open hue interval `(low, high)` in degrees whose pixels are keyed out.
///
/// Always satisfies `0 <= low < high < 360`. Ranges wrapping through 0 are not
/// representable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueRange {
    low: f64,
    high: f64,
}

impl HueRange {
    pub fn new(low: f64, high: f64) -> Result<Self> {
        let in_bounds = |h: f64| h.is_finite() && (0.0..HUE_LIMIT).contains(&h);
        if !in_bounds(low) || !in_bounds(high) || low >= high {
            return Err(PipelineError::InvalidHueRange(low, high));
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Whether `hue` lies strictly between the bounds.
    pub fn contains(&self, hue: f64) -> bool {
        self.low < hue && hue < self.high
    }
}

impl Default for HueRange {
    fn default() -> Self {
        Self {
            low: 131.0,
            high: 145.0,
        }
    }
}

/// Parses `"low,high"` or `"low high"`.
impl FromStr for HueRange {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        let bounds: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();

        let [low, high] = bounds.as_slice() else {
            return Err(PipelineError::SettingsError(format!(
                "expected two hue bounds, got {:?}",
                s
            )));
        };

        let parse = |part: &str| {
            part.parse::<f64>()
                .map_err(|e| PipelineError::SettingsError(format!("hue bound {:?}: {}", part, e)))
        };

        HueRange::new(parse(*low)?, parse(*high)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_range() {
        let range = HueRange::new(131.0, 145.0).unwrap();
        assert_eq!(range.low(), 131.0);
        assert_eq!(range.high(), 145.0);
        assert_eq!(range, HueRange::default());
    }

    #[test]
    fn test_invalid_ranges() {
        for (low, high) in [
            (145.0, 131.0),
            (100.0, 100.0),
            (-1.0, 10.0),
            (10.0, 360.0),
            (f64::NAN, 10.0),
            (0.0, f64::INFINITY),
        ] {
            assert!(
                matches!(HueRange::new(low, high), Err(PipelineError::InvalidHueRange(_, _))),
                "({low}, {high}) should be rejected"
            );
        }
    }

    #[test]
    fn test_contains_is_exclusive() {
        let range = HueRange::new(131.0, 145.0).unwrap();
        assert!(!range.contains(131.0));
        assert!(!range.contains(145.0));
        assert!(range.contains(138.0));
        assert!(range.contains(131.000001));
        assert!(!range.contains(0.0));
    }

    #[test]
    fn test_parse() {
        let expected = HueRange::new(100.0, 140.5).unwrap();
        assert_eq!("100,140.5".parse::<HueRange>().unwrap(), expected);
        assert_eq!("100 140.5".parse::<HueRange>().unwrap(), expected);
        assert_eq!("  100 ,  140.5 \n".parse::<HueRange>().unwrap(), expected);
    }

    #[test]
    fn test_parse_failures() {
        assert!(matches!("100".parse::<HueRange>(), Err(PipelineError::SettingsError(_))));
        assert!(matches!("1 2 3".parse::<HueRange>(), Err(PipelineError::SettingsError(_))));
        assert!(matches!("green 140".parse::<HueRange>(), Err(PipelineError::SettingsError(_))));
        assert!(matches!("140 100".parse::<HueRange>(), Err(PipelineError::InvalidHueRange(_, _))));
    }
}
