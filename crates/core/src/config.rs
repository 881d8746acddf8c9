//! Timeline configuration.
//!
//! Every field has a default, so a host only overrides what it needs:
//!
//! ```json
//! { "start_year": 1700, "max_scale": 8.0 }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::YEARS;

/// End year used when the host does not supply the current year.
pub const DEFAULT_END_YEAR: i32 = 2025;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("start year {start} must be before end year {end}")]
    EmptyYearRange { start: i32, end: i32 },
    #[error("year {0} is outside {min}..={max}", min = YEARS.start(), max = YEARS.end())]
    YearOutOfRange(i32),
    #[error("scale limits must satisfy 0 < min <= max (got {min}..{max})")]
    ScaleLimits { min: f64, max: f64 },
    #[error("height limits must satisfy 0 < min <= initial <= max")]
    HeightLimits,
    #[error("`{0}` must be positive")]
    NotPositive(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    // Axis
    pub start_year: i32,
    pub end_year: i32,
    /// Canvas is at least this many viewport widths wide.
    pub canvas_width_factor: f64,
    /// Minimum pixels per year on the canvas.
    pub pixels_per_year: f64,

    // Viewport
    pub min_scale: f64,
    pub max_scale: f64,
    pub zoom_step: f64,
    pub drag_threshold: f64,
    /// Largest pan distance a single wheel event may cause.
    pub wheel_pan_cap: f64,

    // Item sizes (px)
    pub photo_size: f64,
    pub publication_size: f64,
    pub discovery_size: f64,

    // Vertical placement, as fractions of the axis height
    pub photo_base_offset: f64,
    pub photo_vertical_stagger: f64,
    pub discovery_base_offset: f64,
    pub event_base_offset: f64,

    /// Horizontal gap between staggered discovery markers (px).
    pub discovery_stagger_padding: f64,

    // Event boxes
    pub event_text_size: f64,
    pub event_line_height: f64,
    pub event_box_padding: f64,
    pub event_vertical_padding: f64,

    // Timeline height control
    pub initial_height: f64,
    pub min_height: f64,
    pub max_height: f64,
    pub height_step: f64,

    pub resize_debounce_ms: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            start_year: 1600,
            end_year: DEFAULT_END_YEAR,
            canvas_width_factor: 2.0,
            pixels_per_year: 5.0,
            min_scale: 0.2,
            max_scale: 5.0,
            zoom_step: 0.1,
            drag_threshold: 5.0,
            wheel_pan_cap: 50.0,
            photo_size: 50.0,
            publication_size: 12.0,
            discovery_size: 24.0,
            photo_base_offset: 0.4,
            photo_vertical_stagger: 0.2,
            discovery_base_offset: 0.15,
            event_base_offset: 0.1,
            discovery_stagger_padding: 5.0,
            event_text_size: 15.0,
            event_line_height: 1.2,
            event_box_padding: 5.0,
            event_vertical_padding: 15.0,
            initial_height: 450.0,
            min_height: 200.0,
            max_height: 800.0,
            height_step: 50.0,
            resize_debounce_ms: 250.0,
        }
    }
}

impl TimelineConfig {
    /// Parse overrides from JSON and validate the result.
    pub fn from_json(data: &[u8]) -> Result<Self, ConfigError> {
        let config: TimelineConfig = serde_json::from_slice(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_end_year(mut self, end_year: i32) -> Self {
        self.end_year = end_year;
        self
    }

    pub fn year_span(&self) -> i32 {
        self.end_year.saturating_sub(self.start_year)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(&year) = [self.start_year, self.end_year]
            .iter()
            .find(|year| !YEARS.contains(year))
        {
            return Err(ConfigError::YearOutOfRange(year));
        }
        if self.start_year >= self.end_year {
            return Err(ConfigError::EmptyYearRange {
                start: self.start_year,
                end: self.end_year,
            });
        }
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale) {
            return Err(ConfigError::ScaleLimits {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if !(self.min_height > 0.0
            && self.min_height <= self.initial_height
            && self.initial_height <= self.max_height)
        {
            return Err(ConfigError::HeightLimits);
        }
        let positive = [
            ("canvas_width_factor", self.canvas_width_factor),
            ("pixels_per_year", self.pixels_per_year),
            ("zoom_step", self.zoom_step),
            ("photo_size", self.photo_size),
            ("publication_size", self.publication_size),
            ("discovery_size", self.discovery_size),
            ("event_text_size", self.event_text_size),
            ("event_line_height", self.event_line_height),
            ("wheel_pan_cap", self.wheel_pan_cap),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive(name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = TimelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.year_span(), DEFAULT_END_YEAR - 1600);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = TimelineConfig::from_json(br#"{"start_year": 1700, "max_scale": 8.0}"#)
            .unwrap_or_default();
        assert_eq!(config.start_year, 1700);
        assert_eq!(config.max_scale, 8.0);
        assert_eq!(config.photo_size, 50.0);
    }

    #[test]
    fn rejects_inverted_ranges() {
        let err = TimelineConfig::from_json(br#"{"start_year": 2100}"#);
        assert!(matches!(err, Err(ConfigError::EmptyYearRange { .. })));

        let err = TimelineConfig::from_json(br#"{"min_scale": 3.0, "max_scale": 2.0}"#);
        assert!(matches!(err, Err(ConfigError::ScaleLimits { .. })));

        let err = TimelineConfig::from_json(br#"{"initial_height": 900}"#);
        assert!(matches!(err, Err(ConfigError::HeightLimits)));
    }

    #[test]
    fn rejects_extreme_years() {
        let err = TimelineConfig::from_json(br#"{"start_year": -2147483648}"#);
        assert!(matches!(err, Err(ConfigError::YearOutOfRange(i32::MIN))));

        let err = TimelineConfig::from_json(br#"{"end_year": 50000}"#);
        assert!(matches!(err, Err(ConfigError::YearOutOfRange(50000))));

        let config = TimelineConfig::default().with_end_year(i32::MAX);
        assert_eq!(config.year_span(), i32::MAX - 1600);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_sizes() {
        let err = TimelineConfig::from_json(br#"{"photo_size": 0}"#);
        assert!(matches!(err, Err(ConfigError::NotPositive("photo_size"))));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            TimelineConfig::from_json(b"{"),
            Err(ConfigError::Json(_))
        ));
    }
}
