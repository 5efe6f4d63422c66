//! Tunable parameters for the widget's motion, layout and paging.
//!
//! Every field has a default, so a config file only needs to list the values
//! it overrides.

use kurbo::Rect;
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
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Spring and timing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Shortest fling settle duration in seconds.
    pub min_duration: f64,
    /// Longest fling settle duration in seconds.
    pub max_duration: f64,
    /// Lowest spring damping ratio a fling can use.
    pub min_damping: f64,
    /// Highest spring damping ratio a fling can use.
    pub max_damping: f64,
    /// Speed (px/s) at which the duration/damping ramps reach one unit of range.
    pub reference_speed: f64,
    /// Duration of the post-fling bounds correction.
    pub correction_duration: f64,
    /// Damping of the post-fling bounds correction.
    pub correction_damping: f64,
    /// Duration of the open/expand/close transitions.
    pub transition_duration: f64,
    /// Damping of the open/expand/close transitions.
    pub transition_damping: f64,
    /// Duration of the drag-follow and grow requests.
    pub follow_duration: f64,
    /// Scale applied while the bubble is held.
    pub drag_scale: f64,
    /// Release speeds at or below this (px/s) count as a stationary release.
    pub tap_velocity_epsilon: f64,
}

/// Check that `min..=max` is a usable range.
fn check_range(name: &str, min: f64, max: f64) -> ConfigResult<()> {
    if min.is_nan() || max.is_nan() || min > max {
        return Err(ConfigError::Invalid(format!("{name}: min {min} exceeds max {max}")));
    }
    Ok(())
}

impl MotionConfig {
    /// Reject ranges the fling ramps cannot clamp into.
    pub fn validate(&self) -> ConfigResult<()> {
        check_range("duration", self.min_duration, self.max_duration)?;
        check_range("damping", self.min_damping, self.max_damping)?;
        if self.reference_speed.is_nan() || self.reference_speed <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "reference_speed must be positive, got {}",
                self.reference_speed
            )));
        }
        Ok(())
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            min_duration: 0.3,
            max_duration: 0.6,
            min_damping: 0.3,
            max_damping: 0.5,
            reference_speed: 2000.0,
            correction_duration: 0.2,
            correction_damping: 0.6,
            transition_duration: 0.3,
            transition_damping: 0.8,
            follow_duration: 0.0,
            drag_scale: 1.1,
            tap_velocity_epsilon: 5.0,
        }
    }
}

/// Frame layout parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal inset of the open card from the safe area.
    pub open_padding_x: f64,
    /// Vertical inset of the open card from the safe area.
    pub open_padding_y: f64,
    /// Gap kept between the closed bubble and the safe area edges.
    pub edge_margin: f64,
    /// Frame of the bubble when the widget is created.
    pub initial_frame: Rect,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            open_padding_x: 20.0,
            open_padding_y: 20.0,
            edge_margin: 0.0,
            initial_frame: Rect::new(100.0, 100.0, 180.0, 180.0),
        }
    }
}

/// Paged content parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    pub page_count: usize,
    /// Corner radius cap for the rubber-band effect.
    pub max_corner_radius: f64,
    /// Corner radius gained per unit of overscroll.
    pub rubber_band_rate: f64,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            page_count: 3,
            max_corner_radius: 20.0,
            rubber_band_rate: 0.25,
        }
    }
}

/// Haptic trigger parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HapticsConfig {
    /// Drag speed (px/s) that fires a light tap when crossed upward.
    pub drag_speed_threshold: f64,
}

impl Default for HapticsConfig {
    fn default() -> Self {
        Self {
            drag_speed_threshold: 1500.0,
        }
    }
}

/// Complete widget configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub motion: MotionConfig,
    pub layout: LayoutConfig,
    pub pages: PagesConfig,
    pub haptics: HapticsConfig,
}

impl WidgetConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.motion.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
