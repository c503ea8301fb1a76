//! Drawing surface: pixel buffer, size, background, pointer state and registry.

use crate::config::{ColorSpec, Config};
use crate::draw::{
    Color, DrawOptions, DrawRegistry, FontDescriptor, PaintCommand, Point, Renderer,
};
use crate::error::DrawError;
use crate::ids::IdSource;
use log::{debug, info, warn};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

/// Default width, height, side length and radius for draws that omit them.
pub const DEFAULT_SIZE: f64 = 10.0;

/// How a surface reacts to viewport resize notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeMode {
    /// Resize notifications are ignored
    Fixed,
    /// The surface is resized to the viewport on every notification
    FillViewport,
}

/// A drawing surface and the registry of everything visible on it.
///
/// Every mutation of the visible content goes through the registry: drawing
/// registers a command and paints it, removing one clears all pixels and
/// replays the rest.
///
/// After [`reset`](Self::reset) the surface is terminal: shape moves become
/// no-ops. The draw helpers still paint into a reset surface.
pub struct Surface {
    id: String,
    renderer: Box<dyn Renderer>,
    ids: Rc<dyn IdSource>,
    default_font: FontDescriptor,
    registry: DrawRegistry,
    width: u32,
    height: u32,
    viewport: (u32, u32),
    background: Option<Color>,
    resize_mode: ResizeMode,
    reset: bool,
    pointer: Option<Point>,
    pointer_down: bool,
}

impl Surface {
    /// Creates a surface sized and styled from `config`.
    ///
    /// `viewport` is the host's current size, used for dimensions the config
    /// leaves unset.
    pub fn new(
        id: String,
        renderer: Box<dyn Renderer>,
        ids: Rc<dyn IdSource>,
        config: &Config,
        viewport: (u32, u32),
    ) -> Self {
        let mut surface = Self {
            id,
            renderer,
            ids,
            default_font: config.default_font(),
            registry: DrawRegistry::new(),
            width: viewport.0,
            height: viewport.1,
            viewport,
            background: None,
            resize_mode: ResizeMode::Fixed,
            reset: false,
            pointer: None,
            pointer_down: false,
        };

        if let Some(spec) = &config.surface.background {
            surface.set_background_color(spec.clone());
        }
        surface.set_screen_size(
            config.surface.width,
            config.surface.height,
            config.surface.fill_screen,
        );
        surface
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn resize_mode(&self) -> ResizeMode {
        self.resize_mode
    }

    /// Whether [`reset`](Self::reset) has been called. Never goes back to `false`.
    pub fn is_reset(&self) -> bool {
        self.reset
    }

    /// Last pointer position, or `None` before the first pointer event.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    pub fn registry(&self) -> &DrawRegistry {
        &self.registry
    }

    pub fn default_font(&self) -> &FontDescriptor {
        &self.default_font
    }

    /// Allocates a fresh id from the surface's id source.
    pub fn next_id(&self) -> String {
        self.ids.next_id()
    }

    /// Sets the color shown behind all shapes and repaints.
    ///
    /// The background lives in the pixel buffer, so applying it replays the
    /// registry and emits one clear. Unrecognised colors are ignored with a
    /// warning.
    pub fn set_background_color(&mut self, color: impl Into<ColorSpec>) {
        let spec = color.into();
        let Some(color) = spec.to_color() else {
            warn!("Ignoring background color {:?}", spec);
            return;
        };
        self.background = Some(color);
        self.renderer.set_background(Some(color));
        self.registry.replay(self.renderer.as_mut());
    }

    /// Resizes the surface; `None` dimensions take the viewport size.
    ///
    /// With `fill_screen` the surface keeps following the viewport on every
    /// resize notification; without it, resize notifications are inert.
    pub fn set_screen_size(&mut self, width: Option<u32>, height: Option<u32>, fill_screen: bool) {
        let width = width.unwrap_or(self.viewport.0);
        let height = height.unwrap_or(self.viewport.1);
        self.apply_size(width, height);

        self.resize_mode = if fill_screen {
            ResizeMode::FillViewport
        } else {
            ResizeMode::Fixed
        };
        debug!(
            "Surface '{}' sized {}x{} ({:?})",
            self.id, width, height, self.resize_mode
        );
    }

    /// Delivers a viewport resize notification.
    pub fn on_viewport_resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        match self.resize_mode {
            ResizeMode::FillViewport => self.set_screen_size(None, None, true),
            ResizeMode::Fixed => debug!("Surface '{}' ignores resize", self.id),
        }
    }

    fn apply_size(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.renderer.resize(width, height);
        // A resized pixel buffer starts blank
        self.registry.replay(self.renderer.as_mut());
    }

    /// Wipes the pixels. The registry is untouched.
    pub fn clear(&mut self) {
        self.renderer.clear();
    }

    /// Clears the pixels, empties the registry and marks the surface terminal.
    pub fn reset(&mut self) {
        self.renderer.clear();
        self.registry.clear();
        self.reset = true;
        info!("Surface '{}' reset", self.id);
    }

    /// Does nothing. The frame loop has no cancellation.
    pub fn stop(&mut self) {
        debug!("stop() called on surface '{}'; frame loop keeps running", self.id);
    }

    pub(crate) fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Some(Point::new(x, y));
    }

    pub(crate) fn set_pointer_down(&mut self, down: bool) {
        self.pointer_down = down;
    }

    /// Stores `command` under `id` on top of the paint order and paints it.
    pub fn register(&mut self, id: &str, command: PaintCommand) {
        self.registry.register(id, command, self.renderer.as_mut());
    }

    /// Removes the entry for `id`, clearing the surface and replaying the rest.
    pub fn remove(&mut self, id: &str) -> bool {
        self.registry.remove(id, self.renderer.as_mut())
    }

    fn register_as(&mut self, id: Option<&str>, command: PaintCommand) -> String {
        let id = id.map_or_else(|| self.next_id(), str::to_string);
        self.register(&id, command);
        id
    }

    /// Draws a rectangle with its top-left corner at (x, y). Returns the entry id.
    pub fn draw_rectangle(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        options: &DrawOptions,
        id: Option<&str>,
    ) -> String {
        let command = PaintCommand::Rectangle {
            x,
            y,
            width,
            height,
            style: options.shape_style(),
        };
        self.register_as(id, command)
    }

    /// Draws a square through the rectangle primitive. Returns the entry id.
    pub fn draw_square(
        &mut self,
        x: f64,
        y: f64,
        side: f64,
        options: &DrawOptions,
        id: Option<&str>,
    ) -> String {
        self.draw_rectangle(x, y, side, side, options, id)
    }

    /// Draws a circle centered at (x, y). Returns the entry id.
    pub fn draw_circle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        options: &DrawOptions,
        id: Option<&str>,
    ) -> String {
        let command = PaintCommand::Circle {
            x,
            y,
            radius,
            style: options.shape_style(),
        };
        self.register_as(id, command)
    }

    /// Draws text with its baseline starting at (x, y). Returns the entry id.
    ///
    /// # Errors
    /// [`DrawError::InvalidOption`] when `filled` is not a boolean; nothing is
    /// registered or painted in that case.
    pub fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        options: &DrawOptions,
        id: Option<&str>,
    ) -> Result<String, DrawError> {
        let style = options.text_style(&self.default_font)?;
        let command = PaintCommand::Text {
            text: text.to_string(),
            x,
            y,
            style,
        };
        Ok(self.register_as(id, command))
    }

    /// Draws a line from `from` (the origin when `None`) to `to`. Returns the
    /// entry id.
    pub fn draw_line(
        &mut self,
        to: Point,
        from: impl Into<Option<Point>>,
        options: &DrawOptions,
        id: Option<&str>,
    ) -> String {
        let command = PaintCommand::Line {
            from: from.into().unwrap_or_default(),
            to,
            color: options.resolved_line_color(),
        };
        self.register_as(id, command)
    }
}

/// Shared handle to a [`Surface`].
///
/// Borrows are short-lived: do not hold one across shape operations, which
/// borrow the surface themselves.
#[derive(Clone)]
pub struct SurfaceHandle(Rc<RefCell<Surface>>);

impl SurfaceHandle {
    pub fn new(surface: Surface) -> Self {
        Self(Rc::new(RefCell::new(surface)))
    }

    pub fn borrow(&self) -> Ref<'_, Surface> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Surface> {
        self.0.borrow_mut()
    }

    /// Non-owning back-reference, as held by shapes.
    pub fn downgrade(&self) -> WeakSurface {
        WeakSurface(Rc::downgrade(&self.0))
    }

    /// Whether both handles point at the same surface.
    pub fn ptr_eq(&self, other: &SurfaceHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Weak back-reference from a shape to its surface.
#[derive(Clone, Debug, Default)]
pub struct WeakSurface(Weak<RefCell<Surface>>);

impl WeakSurface {
    /// Returns the surface if it is still alive.
    pub fn upgrade(&self) -> Option<SurfaceHandle> {
        self.0.upgrade().map(SurfaceHandle)
    }
}
