//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::draw::DEFAULT_FONT;
use serde::{Deserialize, Serialize};

/// Initial surface geometry and appearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Fixed surface width in pixels; the viewport width when unset
    #[serde(default)]
    pub width: Option<u32>,

    /// Fixed surface height in pixels; the viewport height when unset
    #[serde(default)]
    pub height: Option<u32>,

    /// Follow viewport resizes
    #[serde(default = "default_fill_screen")]
    pub fill_screen: bool,

    /// Background shown behind all shapes; transparent when unset
    #[serde(default)]
    pub background: Option<ColorSpec>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            fill_screen: default_fill_screen(),
            background: None,
        }
    }
}

/// Text defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    /// Font used when a label has no `font` option (CSS shorthand, e.g. "30px Arial")
    #[serde(default = "default_font")]
    pub font: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font: default_font(),
        }
    }
}

/// Frame loop tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Display refresh rate the second scheduling phase aligns to (valid range: 1.0 - 1000.0)
    #[serde(default = "default_refresh_rate")]
    pub refresh_rate_hz: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            refresh_rate_hz: default_refresh_rate(),
        }
    }
}

fn default_fill_screen() -> bool {
    true
}

fn default_font() -> String {
    DEFAULT_FONT.to_string()
}

fn default_refresh_rate() -> f64 {
    60.0
}
