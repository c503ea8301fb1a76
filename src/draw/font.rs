//! Font descriptor for text rendering.

/// Font used when a text draw carries no `font` option.
pub const DEFAULT_FONT: &str = "30px Arial";

/// Font configuration for text rendering.
///
/// Describes which font to use, including family name, weight, style and size.
/// Descriptors are parsed from CSS-like shorthand strings such as
/// `"bold 24px Sans"` and converted to Pango descriptions at paint time.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "Monospace", "JetBrains Mono")
    pub family: String,

    /// Font weight (e.g., "normal", "bold", "light" or numeric 100-900)
    pub weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    pub style: String,

    /// Size in pixels
    pub size: f64,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self::new("Arial", "normal", "normal", 30.0)
    }
}

impl FontDescriptor {
    /// Creates a new font descriptor with the specified parameters.
    pub fn new(
        family: impl Into<String>,
        weight: impl Into<String>,
        style: impl Into<String>,
        size: f64,
    ) -> Self {
        Self {
            family: family.into(),
            weight: weight.into(),
            style: style.into(),
            size,
        }
    }

    /// Parses CSS font shorthand: `[style] [weight] <size>px <family>`.
    ///
    /// Returns `None` when no size token or no family is present.
    pub fn parse(spec: &str) -> Option<Self> {
        let tokens: Vec<&str> = spec.split_whitespace().collect();
        let size_index = tokens.iter().position(|t| parse_size(t).is_some())?;
        let size = parse_size(tokens[size_index])?;

        let family = tokens[size_index + 1..]
            .join(" ")
            .trim_matches(|c| c == '"' || c == '\'')
            .to_string();
        if family.is_empty() {
            return None;
        }

        let mut weight = "normal".to_string();
        let mut style = "normal".to_string();
        for token in &tokens[..size_index] {
            let lower = token.to_lowercase();
            match lower.as_str() {
                "italic" | "oblique" => style = lower,
                "normal" => {}
                _ if is_weight(&lower) => weight = lower,
                _ => {}
            }
        }

        Some(Self {
            family,
            weight,
            style,
            size,
        })
    }

    /// Converts this font descriptor to a Pango font description string.
    ///
    /// Format: "Family Style Weight Size"
    /// Example: "Sans Bold 32px" or "Monospace Italic 24px"
    pub fn to_pango_string(&self) -> String {
        let mut parts = vec![self.family.clone()];

        if self.style.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.style));
        }

        if self.weight.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.weight));
        }

        // Absolute size; Pango reads the `px` suffix as device units
        parts.push(format!("{}px", self.size.round() as i32));

        parts.join(" ")
    }
}

fn parse_size(token: &str) -> Option<f64> {
    let number = token
        .strip_suffix("px")
        .or_else(|| token.strip_suffix("pt"))?;
    number.parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0)
}

fn is_weight(token: &str) -> bool {
    matches!(
        token,
        "bold" | "bolder" | "light" | "lighter" | "ultralight" | "heavy" | "ultrabold"
    ) || token.parse::<u32>().is_ok_and(|w| (100..=900).contains(&w))
}

/// Capitalizes the first letter of a string.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
