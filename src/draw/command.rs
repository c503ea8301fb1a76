//! Paint commands: immutable snapshots of what one registry entry draws.

use super::color::Color;
use super::font::FontDescriptor;

/// A position on the surface, in pixels from the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Resolved style for rectangles, squares and circles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeStyle {
    /// Interior color; `None` paints the outline only
    pub fill: Option<Color>,
    /// Outline color
    pub border: Color,
}

/// Resolved style for text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font: FontDescriptor,
    /// Fill glyphs when `true`, stroke glyph outlines when `false`
    pub filled: bool,
    pub fill: Color,
    pub border: Color,
}

/// One drawable entry of the registry.
///
/// Each variant carries its geometry and a fully resolved style, so replaying a
/// command always produces the same pixels regardless of what happened to the
/// options it was built from.
#[derive(Clone, Debug, PartialEq)]
pub enum PaintCommand {
    /// Axis-aligned rectangle (squares use this with equal sides)
    Rectangle {
        /// Top-left X coordinate
        x: f64,
        /// Top-left Y coordinate
        y: f64,
        width: f64,
        height: f64,
        style: ShapeStyle,
    },
    /// Full circle
    Circle {
        /// Center X coordinate
        x: f64,
        /// Center Y coordinate
        y: f64,
        radius: f64,
        style: ShapeStyle,
    },
    /// Single run of text
    Text {
        text: String,
        /// Baseline X coordinate
        x: f64,
        /// Baseline Y coordinate
        y: f64,
        style: TextStyle,
    },
    /// Straight line segment
    Line { from: Point, to: Point, color: Color },
}

impl PaintCommand {
    /// Short name of the command kind, used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            PaintCommand::Rectangle { .. } => "rectangle",
            PaintCommand::Circle { .. } => "circle",
            PaintCommand::Text { .. } => "text",
            PaintCommand::Line { .. } => "line",
        }
    }

    /// Anchor point of the command: top-left for rectangles, center for
    /// circles, baseline start for text and the end point for lines.
    pub fn origin(&self) -> Point {
        match self {
            PaintCommand::Rectangle { x, y, .. }
            | PaintCommand::Circle { x, y, .. }
            | PaintCommand::Text { x, y, .. } => Point::new(*x, *y),
            PaintCommand::Line { to, .. } => *to,
        }
    }
}
