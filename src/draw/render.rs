//! Rendering backends for paint commands.
//!
//! [`Renderer`] is the contract the registry replays against. [`CairoRenderer`]
//! paints into an offscreen Cairo image surface, using Pango for text.

use super::color::Color;
use super::command::{PaintCommand, Point, ShapeStyle, TextStyle};
use crate::error::RenderError;
use log::{debug, warn};

/// Pixel sink the registry paints into.
///
/// Implementations are infallible from the caller's point of view: a failed
/// primitive leaves the pixels as they were.
pub trait Renderer {
    /// Wipes every pixel back to the background.
    fn clear(&mut self);

    /// Paints a single command on top of the current pixels.
    fn paint(&mut self, command: &PaintCommand);

    /// Resizes the pixel buffer. The buffer is blank afterwards.
    fn resize(&mut self, width: u32, height: u32);

    /// Sets the color shown behind all painted content, or none for transparent.
    fn set_background(&mut self, color: Option<Color>);
}

/// Cairo-backed renderer drawing into an ARGB32 image surface.
pub struct CairoRenderer {
    surface: cairo::ImageSurface,
    ctx: cairo::Context,
    width: u32,
    height: u32,
    background: Option<Color>,
}

impl CairoRenderer {
    /// Creates a transparent image surface of the given size.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let (surface, ctx) = create_surface(width, height)?;
        Ok(Self {
            surface,
            ctx,
            width,
            height,
            background: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The image surface painted into.
    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }

    /// Copies the current pixels (premultiplied ARGB32, native endian, row stride
    /// as reported by the surface).
    pub fn pixels(&self) -> Result<Vec<u8>, RenderError> {
        let mut copy = cairo::ImageSurface::create(
            cairo::Format::ARgb32,
            self.surface.width(),
            self.surface.height(),
        )?;
        {
            let ctx = cairo::Context::new(&copy)?;
            ctx.set_source_surface(&self.surface, 0.0, 0.0)?;
            ctx.paint()?;
        }
        copy.flush();
        let data = copy.data()?;
        Ok(data.to_vec())
    }

    /// Reads one pixel as `0xAARRGGBB` (premultiplied). Out-of-bounds reads yield 0.
    pub fn argb_at(&self, x: u32, y: u32) -> Result<u32, RenderError> {
        if x >= self.width || y >= self.height {
            return Ok(0);
        }
        let pixels = self.pixels()?;
        let offset = y as usize * self.surface.stride() as usize + x as usize * 4;
        let bytes = [
            pixels[offset],
            pixels[offset + 1],
            pixels[offset + 2],
            pixels[offset + 3],
        ];
        Ok(u32::from_ne_bytes(bytes))
    }
}

impl Renderer for CairoRenderer {
    fn clear(&mut self) {
        let ctx = &self.ctx;
        ctx.save().ok();
        ctx.set_operator(cairo::Operator::Clear);
        let _ = ctx.paint();
        ctx.restore().ok();

        // Board-style background: painted under everything after each clear
        if let Some(bg) = self.background {
            ctx.set_source_rgba(bg.r, bg.g, bg.b, bg.a);
            let _ = ctx.paint();
        }
    }

    fn paint(&mut self, command: &PaintCommand) {
        match command {
            PaintCommand::Rectangle {
                x,
                y,
                width,
                height,
                style,
            } => render_rectangle(&self.ctx, *x, *y, *width, *height, style),
            PaintCommand::Circle {
                x,
                y,
                radius,
                style,
            } => render_circle(&self.ctx, *x, *y, *radius, style),
            PaintCommand::Text { text, x, y, style } => render_text(&self.ctx, *x, *y, text, style),
            PaintCommand::Line { from, to, color } => render_line(&self.ctx, *from, *to, *color),
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        match create_surface(width, height) {
            Ok((surface, ctx)) => {
                debug!(
                    "Resized cairo surface {}x{} -> {}x{}",
                    self.width, self.height, width, height
                );
                self.surface = surface;
                self.ctx = ctx;
                self.width = width;
                self.height = height;
                self.clear();
            }
            Err(e) => warn!("Failed to resize surface to {}x{}: {}", width, height, e),
        }
    }

    fn set_background(&mut self, color: Option<Color>) {
        self.background = color;
    }
}

fn create_surface(
    width: u32,
    height: u32,
) -> Result<(cairo::ImageSurface, cairo::Context), RenderError> {
    let w = i32::try_from(width.max(1)).unwrap_or(i32::MAX);
    let h = i32::try_from(height.max(1)).unwrap_or(i32::MAX);
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, w, h)?;
    let ctx = cairo::Context::new(&surface)?;
    ctx.set_antialias(cairo::Antialias::Best);
    Ok((surface, ctx))
}

/// Fill (if any) then stroke the current path.
fn finish_path(ctx: &cairo::Context, style: &ShapeStyle) {
    if let Some(fill) = style.fill {
        ctx.set_source_rgba(fill.r, fill.g, fill.b, fill.a);
        let _ = ctx.fill_preserve();
    }
    let border = style.border;
    ctx.set_source_rgba(border.r, border.g, border.b, border.a);
    ctx.set_line_width(1.0);
    let _ = ctx.stroke();
}

fn render_rectangle(ctx: &cairo::Context, x: f64, y: f64, w: f64, h: f64, style: &ShapeStyle) {
    ctx.new_path();
    ctx.set_line_join(cairo::LineJoin::Miter);
    ctx.rectangle(x, y, w, h);
    ctx.close_path();
    finish_path(ctx, style);
}

fn render_circle(ctx: &cairo::Context, x: f64, y: f64, radius: f64, style: &ShapeStyle) {
    if radius <= 0.0 || !radius.is_finite() {
        debug!("Skipping circle with radius {}", radius);
        return;
    }
    ctx.new_path();
    ctx.arc(x, y, radius, 0.0, 2.0 * std::f64::consts::PI);
    ctx.close_path();
    finish_path(ctx, style);
}

fn render_line(ctx: &cairo::Context, from: Point, to: Point, color: Color) {
    ctx.new_path();
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(1.0);
    ctx.set_line_cap(cairo::LineCap::Butt);
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    let _ = ctx.stroke();
}

/// Renders text with its baseline starting at (x, y).
///
/// Filled text uses the fill color; outline text strokes the glyph paths with
/// the border color.
fn render_text(ctx: &cairo::Context, x: f64, y: f64, text: &str, style: &TextStyle) {
    // Save context state to prevent settings from leaking to other drawing operations
    ctx.save().ok();
    ctx.new_path();

    let layout = pangocairo::functions::create_layout(ctx);
    let font_desc = pango::FontDescription::from_string(&style.font.to_pango_string());
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text);

    // Pango measures from top-left, the anchor is the baseline
    let baseline = layout.baseline() as f64 / pango::SCALE as f64;
    ctx.move_to(x, y - baseline);

    if style.filled {
        let fill = style.fill;
        ctx.set_source_rgba(fill.r, fill.g, fill.b, fill.a);
        pangocairo::functions::show_layout(ctx, &layout);
    } else {
        pangocairo::functions::layout_path(ctx, &layout);
        let border = style.border;
        ctx.set_source_rgba(border.r, border.g, border.b, border.a);
        ctx.set_line_width(1.0);
        ctx.set_line_join(cairo::LineJoin::Round);
        let _ = ctx.stroke();
    }

    ctx.restore().ok();
}
