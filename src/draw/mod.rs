//! Paint commands, the draw registry and rendering backends.
//!
//! This module defines the core drawing types:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`PaintCommand`]: one immutable drawable (rectangle, circle, text, line)
//! - [`DrawOptions`]: loosely typed style options with per-kind defaults
//! - [`DrawRegistry`]: ordered id → command map with full clear-and-replay
//! - [`Renderer`]: the pixel sink, with Cairo and recording implementations

pub mod color;
pub mod command;
pub mod font;
pub mod options;
pub mod record;
pub mod registry;
pub mod render;

// Re-export commonly used types at module level
pub use color::Color;
pub use command::{PaintCommand, Point, ShapeStyle, TextStyle};
pub use font::{DEFAULT_FONT, FontDescriptor};
pub use options::DrawOptions;
pub use record::{RecordingRenderer, RenderLog, RenderOp};
pub use registry::DrawRegistry;
pub use render::{CairoRenderer, Renderer};

pub use color::{BLACK, BLUE, GRAY, GREEN, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW};
