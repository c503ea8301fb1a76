//! Configuration file support.
//!
//! Settings are read from `~/.config/playit/config.toml` when present. They
//! cover the initial surface size and background, the default label font and
//! the refresh rate the frame loop aligns to.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{SchedulerConfig, SurfaceConfig, TextConfig};

use crate::draw::FontDescriptor;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all settings.
///
/// # Example TOML
/// ```toml
/// [surface]
/// width = 640
/// height = 480
/// fill_screen = false
/// background = "#202830"
///
/// [text]
/// font = "bold 24px Sans"
///
/// [scheduler]
/// refresh_rate_hz = 60.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Initial surface size and background
    #[serde(default)]
    pub surface: SurfaceConfig,

    /// Text defaults
    #[serde(default)]
    pub text: TextConfig,

    /// Frame loop tuning
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped or replaced with defaults and a warning is logged.
    ///
    /// Validated ranges:
    /// - `refresh_rate_hz`: 1.0 - 1000.0
    /// - `width` / `height`: non-zero when set
    /// - `font`: must parse as CSS font shorthand
    fn validate_and_clamp(&mut self) {
        let rate = self.scheduler.refresh_rate_hz;
        if !rate.is_finite() {
            warn!("Invalid refresh_rate_hz {}, using 60", rate);
            self.scheduler.refresh_rate_hz = 60.0;
        } else if !(1.0..=1000.0).contains(&rate) {
            warn!(
                "Invalid refresh_rate_hz {:.1}, clamping to 1.0-1000.0 range",
                rate
            );
            self.scheduler.refresh_rate_hz = rate.clamp(1.0, 1000.0);
        }

        if self.surface.width == Some(0) {
            warn!("Surface width 0 ignored, following viewport");
            self.surface.width = None;
        }
        if self.surface.height == Some(0) {
            warn!("Surface height 0 ignored, following viewport");
            self.surface.height = None;
        }

        if FontDescriptor::parse(&self.text.font).is_none() {
            warn!(
                "Invalid font '{}', falling back to '{}'",
                self.text.font,
                crate::draw::DEFAULT_FONT
            );
            self.text.font = crate::draw::DEFAULT_FONT.to_string();
        }
    }

    /// Font descriptor for labels without a `font` option.
    pub fn default_font(&self) -> FontDescriptor {
        FontDescriptor::parse(&self.text.font).unwrap_or_default()
    }

    /// Returns the path to the configuration file (`~/.config/playit/config.toml`).
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("playit");

        Ok(config_dir.join("config.toml"))
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(source).context("Failed to parse config")?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `path`, or returns defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Writes the documented example config to `path`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A config file already exists at the target path
    /// - The parent directory cannot be created
    /// - The file cannot be written
    pub fn create_default_file(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                path.display()
            ));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(path, default_config)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Created default config at {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert!(config.surface.fill_screen);
        assert_eq!(config.surface.width, None);
        assert_eq!(config.scheduler.refresh_rate_hz, 60.0);
        assert_eq!(config.default_font(), FontDescriptor::default());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = Config::from_toml_str(
            "[surface]\nwidth = 0\n[scheduler]\nrefresh_rate_hz = 5000.0\n[text]\nfont = \"Arial\"\n",
        )
        .unwrap();
        assert_eq!(config.surface.width, None);
        assert_eq!(config.scheduler.refresh_rate_hz, 1000.0);
        assert_eq!(config.text.font, crate::draw::DEFAULT_FONT);
    }

    #[test]
    fn background_accepts_hex_and_rgb() {
        let config = Config::from_toml_str("[surface]\nbackground = [10, 20, 30]\n").unwrap();
        assert_eq!(
            config.surface.background.and_then(|c| c.to_color()),
            Some(crate::draw::Color::from_rgb8(10, 20, 30))
        );
    }

    #[test]
    fn load_from_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(config.surface.fill_screen);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[surface\nwidth = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn example_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        Config::create_default_file(&path).unwrap();
        assert!(Config::create_default_file(&path).is_err());

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.scheduler.refresh_rate_hz, 60.0);
        assert_eq!(config.text.font, "30px Arial");
    }
}
