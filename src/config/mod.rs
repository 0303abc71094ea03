// SPDX-License-Identifier: MPL-2.0
//! Engine configuration.
//!
//! `TouchConfig` collects everything a host decides at construction time:
//! the hard zoom bounds, the bounce-back multipliers, which gestures are
//! enabled, what a fling does, and the gesture tuning thresholds.
//! The struct round-trips through TOML so hosts can keep it in a
//! user-editable settings file.
//!
//! # Examples
//!
//! ```
//! use touch_lens::config::{FlingBehavior, TouchConfig};
//!
//! let mut config = TouchConfig::default();
//! config.max_scale = 5.0;
//! config.fling_behavior = FlingBehavior::Listener;
//!
//! let text = toml::to_string_pretty(&config).unwrap();
//! let loaded: TouchConfig = toml::from_str(&text).unwrap();
//! assert_eq!(loaded, config);
//! ```

pub mod defaults;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use defaults::{
    DEFAULT_FLING_FRICTION, DEFAULT_MAX_BOUNCE_MULTIPLIER, DEFAULT_MAX_FLING_VELOCITY,
    DEFAULT_MAX_SCALE, DEFAULT_MIN_BOUNCE_MULTIPLIER, DEFAULT_MIN_FLING_VELOCITY,
    DEFAULT_MIN_SCALE, DEFAULT_PAGING_TOUCH_SLOP,
};

/// What a detected fling gesture does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlingBehavior {
    /// Scroll the content with a decelerating trajectory.
    #[default]
    Scroll,
    /// Forward classified directional flings to a registered listener
    /// instead of moving the content.
    Listener,
    /// Ignore fling gestures entirely.
    Disabled,
}

/// Thresholds for gesture classification and fling physics.
///
/// The defaults follow common platform conventions; hosts with unusual
/// display densities can scale them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureTuning {
    /// Swipe travel below this is zeroed during fling classification.
    pub paging_touch_slop: f32,
    /// Velocities below this do not count as a fling.
    pub min_fling_velocity: f32,
    /// Velocities above this do not count as a fling.
    pub max_fling_velocity: f32,
    /// Deceleration coefficient for scroll-mode flings.
    pub fling_friction: f32,
}

impl Default for GestureTuning {
    fn default() -> Self {
        Self {
            paging_touch_slop: DEFAULT_PAGING_TOUCH_SLOP,
            min_fling_velocity: DEFAULT_MIN_FLING_VELOCITY,
            max_fling_velocity: DEFAULT_MAX_FLING_VELOCITY,
            fling_friction: DEFAULT_FLING_FRICTION,
        }
    }
}

/// Construction-time configuration for [`TouchEngine`](crate::TouchEngine).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchConfig {
    /// Minimum zoom relative to the fit scale.
    pub min_scale: f32,
    /// Maximum zoom relative to the fit scale.
    pub max_scale: f32,
    /// Multiplier widening the lower zoom bound during a live pinch.
    pub min_bounce_multiplier: f32,
    /// Multiplier widening the upper zoom bound during a live pinch.
    pub max_bounce_multiplier: f32,
    /// Whether one-finger panning is enabled.
    pub allow_drag: bool,
    /// Whether double-tap zoom toggling is enabled.
    pub allow_double_tap: bool,
    /// Whether pinch zooming is enabled.
    pub allow_scale: bool,
    /// Whether replacing the content keeps the current zoom level instead of
    /// re-fitting and re-centering.
    pub maintain_zoom_after_image_change: bool,
    /// What a fling gesture does.
    pub fling_behavior: FlingBehavior,
    /// Gesture classification and physics thresholds.
    pub tuning: GestureTuning,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            min_bounce_multiplier: DEFAULT_MIN_BOUNCE_MULTIPLIER,
            max_bounce_multiplier: DEFAULT_MAX_BOUNCE_MULTIPLIER,
            allow_drag: true,
            allow_double_tap: true,
            allow_scale: true,
            maintain_zoom_after_image_change: true,
            fling_behavior: FlingBehavior::default(),
            tuning: GestureTuning::default(),
        }
    }
}

/// Loads a configuration from a TOML file, falling back to defaults for
/// unknown or missing fields.
pub fn load_from_path(path: &Path) -> Result<TouchConfig> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

/// Saves a configuration as pretty-printed TOML, creating parent
/// directories as needed.
pub fn save_to_path(config: &TouchConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
