//! Surface configuration.

use crate::eraser::DEFAULT_ERASER_MULTIPLIER;
use crate::types::Rgba;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest width or height, in pixels, a surface may have.
pub const MAX_SURFACE_DIMENSION: u32 = 16384;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Eraser width multiplier must be greater than 1, got {0}")]
    InvalidEraserMultiplier(f64),
    #[error("Line width must be positive, got {0}")]
    InvalidLineWidth(f64),
    #[error("Surface size out of range: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("History limit must allow at least one stroke")]
    ZeroHistoryLimit,
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Initial settings for a [`DrawingSurface`](crate::DrawingSurface).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub line_width: f64,
    pub color: Rgba,
    pub fill_color: Rgba,
    pub background_color: Rgba,
    pub eraser_width_multiplier: f64,
    /// Maximum number of strokes kept in history (`None` = unbounded).
    pub max_strokes: Option<usize>,
    pub width: u32,
    pub height: u32,
    /// Outline redraw regions in previews.
    pub debug: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            line_width: 4.0,
            color: Rgba::BLACK,
            fill_color: Rgba::TRANSPARENT,
            background_color: Rgba::WHITE,
            eraser_width_multiplier: DEFAULT_ERASER_MULTIPLIER,
            max_strokes: None,
            width: 1024,
            height: 768,
            debug: false,
        }
    }
}

impl SurfaceConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.eraser_width_multiplier.is_finite() && self.eraser_width_multiplier > 1.0) {
            return Err(ConfigError::InvalidEraserMultiplier(self.eraser_width_multiplier));
        }
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(ConfigError::InvalidLineWidth(self.line_width));
        }
        if !valid_dimension(self.width) || !valid_dimension(self.height) {
            return Err(ConfigError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_strokes == Some(0) {
            return Err(ConfigError::ZeroHistoryLimit);
        }
        Ok(())
    }
}

fn valid_dimension(pixels: u32) -> bool {
    (1..=MAX_SURFACE_DIMENSION).contains(&pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SurfaceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = SurfaceConfig::from_json(r#"{ "line_width": 2.5, "width": 64 }"#).unwrap();
        assert!((config.line_width - 2.5).abs() < f64::EPSILON);
        assert_eq!(config.width, 64);
        assert_eq!(config.height, 768);
        assert_eq!(config.background_color, Rgba::WHITE);
        assert!(!config.debug);
    }

    #[test]
    fn test_rejects_small_multiplier() {
        let config = SurfaceConfig {
            eraser_width_multiplier: 1.0,
            ..SurfaceConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEraserMultiplier(_))
        ));
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad_width = SurfaceConfig {
            line_width: f64::NAN,
            ..SurfaceConfig::default()
        };
        assert!(matches!(bad_width.validate(), Err(ConfigError::InvalidLineWidth(_))));

        let empty = SurfaceConfig {
            height: 0,
            ..SurfaceConfig::default()
        };
        assert!(matches!(empty.validate(), Err(ConfigError::InvalidSize { .. })));

        let huge = SurfaceConfig {
            width: u32::MAX,
            ..SurfaceConfig::default()
        };
        assert!(matches!(huge.validate(), Err(ConfigError::InvalidSize { .. })));

        let largest = SurfaceConfig {
            width: MAX_SURFACE_DIMENSION,
            height: MAX_SURFACE_DIMENSION,
            ..SurfaceConfig::default()
        };
        assert!(largest.validate().is_ok());

        let no_history = SurfaceConfig {
            max_strokes: Some(0),
            ..SurfaceConfig::default()
        };
        assert!(matches!(no_history.validate(), Err(ConfigError::ZeroHistoryLimit)));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            SurfaceConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
