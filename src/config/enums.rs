//! Configuration enum types.

use crate::draw::Color;
use log::warn;
use serde::{Deserialize, Serialize};

/// Color specification - a named color, a hex string, or RGB values.
///
/// The same type is used by the config file and by draw options.
///
/// # Examples
/// ```toml
/// # Named color
/// background = "white"
///
/// # Hex notation
/// background = "#202830"
///
/// # Custom RGB color (0-255 per component)
/// background = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (red, green, blue, ...) or `#rgb` / `#rrggbb`
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
    /// Exact color supplied from code
    #[serde(skip)]
    Exact(Color),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`].
    ///
    /// Unknown names yield `None` with a warning so callers can fall back to
    /// their own default.
    pub fn to_color(&self) -> Option<Color> {
        match self {
            ColorSpec::Name(name) => {
                let color = Color::parse(name);
                if color.is_none() {
                    warn!("Unknown color '{}', using default", name);
                }
                color
            }
            ColorSpec::Rgb([r, g, b]) => Some(Color::from_rgb8(*r, *g, *b)),
            ColorSpec::Exact(color) => Some(*color),
        }
    }
}

impl From<&str> for ColorSpec {
    fn from(name: &str) -> Self {
        ColorSpec::Name(name.to_string())
    }
}

impl From<String> for ColorSpec {
    fn from(name: String) -> Self {
        ColorSpec::Name(name)
    }
}

impl From<[u8; 3]> for ColorSpec {
    fn from(rgb: [u8; 3]) -> Self {
        ColorSpec::Rgb(rgb)
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        ColorSpec::Exact(color)
    }
}
