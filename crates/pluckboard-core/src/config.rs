//! Canvas configuration.

use crate::shapes::SerializableColor;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunable canvas settings. Every field has a default, so partial JSON
/// documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Background grid spacing in world units.
    pub grid_spacing: f64,
    /// Background grid line color.
    pub grid_color: SerializableColor,
    /// Stroke color selected at startup.
    pub default_color: SerializableColor,
    /// Stroke width selected at startup.
    pub default_stroke_width: f64,
    /// Lower zoom bound.
    pub min_zoom: f64,
    /// Upper zoom bound.
    pub max_zoom: f64,
    /// Distance a single pointer must travel before a drag starts.
    pub touch_slop: f64,
    /// Initial opacity of replay copies.
    pub replay_alpha: f32,
    /// Colors offered by the toolbar.
    pub palette: Vec<SerializableColor>,
    /// Stroke widths offered by the toolbar.
    pub stroke_widths: Vec<f64>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            grid_spacing: 40.0,
            grid_color: SerializableColor::new(200, 200, 200, 100),
            default_color: SerializableColor::black(),
            default_stroke_width: 5.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
            touch_slop: 8.0,
            replay_alpha: 1.0,
            palette: vec![
                SerializableColor::black(),
                SerializableColor::new(239, 68, 68, 255),  // Red
                SerializableColor::new(34, 197, 94, 255),  // Green
                SerializableColor::new(59, 130, 246, 255), // Blue
                SerializableColor::new(234, 179, 8, 255),  // Yellow
            ],
            stroke_widths: vec![2.0, 5.0, 10.0, 20.0],
        }
    }
}

impl CanvasConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded canvas config from {}", path.display());
        Ok(config)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive, got {value}"),
                })
            }
        }

        positive("grid_spacing", self.grid_spacing)?;
        positive("default_stroke_width", self.default_stroke_width)?;
        positive("min_zoom", self.min_zoom)?;
        positive("max_zoom", self.max_zoom)?;
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::Invalid {
                field: "min_zoom",
                reason: format!("{} exceeds max_zoom {}", self.min_zoom, self.max_zoom),
            });
        }
        if !(self.touch_slop.is_finite() && self.touch_slop >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "touch_slop",
                reason: format!("must be non-negative, got {}", self.touch_slop),
            });
        }
        if !(0.0..=1.0).contains(&self.replay_alpha) {
            return Err(ConfigError::Invalid {
                field: "replay_alpha",
                reason: format!("must be within [0, 1], got {}", self.replay_alpha),
            });
        }
        for &width in &self.stroke_widths {
            positive("stroke_widths", width)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_valid() {
        assert!(CanvasConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = CanvasConfig::from_json(r#"{ "grid_spacing": 25.0 }"#).unwrap();
        assert!((config.grid_spacing - 25.0).abs() < f64::EPSILON);
        assert!((config.touch_slop - 8.0).abs() < f64::EPSILON);
        assert_eq!(config.palette, CanvasConfig::default().palette);
    }

    #[test]
    fn test_rejects_inverted_zoom_limits() {
        let err = CanvasConfig::from_json(r#"{ "min_zoom": 4.0, "max_zoom": 2.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "min_zoom", .. }));
    }

    #[test]
    fn test_rejects_bad_alpha() {
        let err = CanvasConfig::from_json(r#"{ "replay_alpha": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "replay_alpha", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = CanvasConfig::from_json("{ grid_spacing: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "default_stroke_width": 3.0, "touch_slop": 0.0 }}"#).unwrap();

        let config = CanvasConfig::load(file.path()).unwrap();
        assert!((config.default_stroke_width - 3.0).abs() < f64::EPSILON);
        assert!(config.touch_slop.abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_missing_file() {
        let err = CanvasConfig::load("/nonexistent/pluckboard.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = CanvasConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(CanvasConfig::from_json(&json).unwrap(), config);
    }
}
