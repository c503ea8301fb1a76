//! Draw options and their per-kind defaults.
//!
//! Options are deliberately loose: every field is optional and values that
//! cannot be understood are dropped with a warning, so the draw falls back to
//! the kind default. The single exception is the text `filled` flag, which must
//! be a boolean when present.

use super::color::{BLACK, Color};
use super::command::{ShapeStyle, TextStyle};
use super::font::FontDescriptor;
use crate::config::ColorSpec;
use crate::error::{DrawError, OptionsError};
use log::warn;
use serde::{Deserialize, Deserializer};

/// Optional style settings accepted by the draw helpers and shape constructors.
///
/// | kind | recognized options | default when absent |
/// |---|---|---|
/// | rectangle/square | `fillColor`, `borderColor` | no fill; border black |
/// | circle | `fillColor`, `borderColor` | no fill; border black |
/// | text | `font`, `filled`, `fillColor`, `borderColor` | default font; filled; fill and border black |
/// | line | `lineColor` | black |
///
/// Options deserialize from a TOML table using the camelCase keys above, which
/// lets callers pass loosely typed values through to the validator:
///
/// ```
/// use playit::draw::DrawOptions;
/// let options = DrawOptions::from_toml("fillColor = \"red\"\nfilled = false").unwrap();
/// assert!(options.fill_color.is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DrawOptions {
    /// Interior color; shapes without one are outline-only
    #[serde(deserialize_with = "lenient")]
    pub fill_color: Option<ColorSpec>,

    /// Outline color
    #[serde(deserialize_with = "lenient")]
    pub border_color: Option<ColorSpec>,

    /// Stroke color for lines
    #[serde(deserialize_with = "lenient")]
    pub line_color: Option<ColorSpec>,

    /// CSS-like font shorthand, e.g. `"bold 24px Sans"`
    #[serde(deserialize_with = "lenient")]
    pub font: Option<String>,

    /// Fill (`true`) or outline (`false`) text glyphs; kept untyped until the
    /// text draw validates it
    pub filled: Option<toml::Value>,

    /// Replacement text for [`Label::update`](crate::shape::Label::update)
    #[serde(deserialize_with = "lenient")]
    pub text: Option<String>,
}

impl DrawOptions {
    /// Creates an empty option set (every kind default applies).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from a TOML document of `key = value` pairs.
    pub fn from_toml(source: &str) -> Result<Self, OptionsError> {
        Ok(toml::from_str(source)?)
    }

    pub fn fill_color(mut self, color: impl Into<ColorSpec>) -> Self {
        self.fill_color = Some(color.into());
        self
    }

    pub fn border_color(mut self, color: impl Into<ColorSpec>) -> Self {
        self.border_color = Some(color.into());
        self
    }

    pub fn line_color(mut self, color: impl Into<ColorSpec>) -> Self {
        self.line_color = Some(color.into());
        self
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn filled(mut self, filled: bool) -> Self {
        self.filled = Some(toml::Value::Boolean(filled));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Resolves the style for rectangles, squares and circles.
    pub fn shape_style(&self) -> ShapeStyle {
        ShapeStyle {
            fill: resolve(&self.fill_color),
            border: resolve(&self.border_color).unwrap_or(BLACK),
        }
    }

    /// Resolves the style for text.
    ///
    /// A fill color without a border color also colors the border; shapes do
    /// not share this rule.
    ///
    /// # Errors
    /// Returns [`DrawError::InvalidOption`] when `filled` is present but not a boolean.
    pub fn text_style(&self, default_font: &FontDescriptor) -> Result<TextStyle, DrawError> {
        let filled = match &self.filled {
            None => true,
            Some(toml::Value::Boolean(filled)) => *filled,
            Some(other) => {
                return Err(DrawError::InvalidOption {
                    key: "filled",
                    expected: "a boolean",
                    found: other.type_str().to_string(),
                });
            }
        };

        let font = match &self.font {
            Some(spec) => FontDescriptor::parse(spec).unwrap_or_else(|| {
                warn!("Unrecognised font '{}', using {:?}", spec, default_font.family);
                default_font.clone()
            }),
            None => default_font.clone(),
        };

        let fill = resolve(&self.fill_color);
        let border = resolve(&self.border_color).or(fill);

        Ok(TextStyle {
            font,
            filled,
            fill: fill.unwrap_or(BLACK),
            border: border.unwrap_or(BLACK),
        })
    }

    /// Resolves the stroke color for lines.
    pub fn resolved_line_color(&self) -> Color {
        resolve(&self.line_color).unwrap_or(BLACK)
    }
}

fn resolve(spec: &Option<ColorSpec>) -> Option<Color> {
    spec.as_ref().and_then(ColorSpec::to_color)
}

/// Deserializes an optional field, dropping values of the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Option::<toml::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| {
        let type_name = value.type_str();
        value
            .try_into::<T>()
            .map_err(|err| warn!("Ignoring {} option value: {}", type_name, err))
            .ok()
    }))
}
