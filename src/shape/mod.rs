//! Shapes: positioned drawables that keep one registry entry up to date.
//!
//! Every shape owns its attribute snapshot and a weak back-reference to the
//! surface holding its registry entry. Moving a shape removes the entry
//! (clearing and replaying the surface), updates the position and registers it
//! again on top of the paint order.

mod kinds;

pub use kinds::{AnyShape, Circle, Label, Rectangle, Square};

use crate::draw::{DrawOptions, FontDescriptor, PaintCommand, Point};
use crate::error::DrawError;
use crate::surface::WeakSurface;
use log::debug;

/// Distance covered by a directional move when none is given.
pub const DEFAULT_STEP: f64 = 10.0;

/// State shared by every shape kind.
#[derive(Debug, Clone)]
pub struct ShapeCore {
    id: String,
    position: Point,
    options: DrawOptions,
    surface: WeakSurface,
}

impl ShapeCore {
    pub(crate) fn new(id: String, position: Point, options: DrawOptions, surface: WeakSurface) -> Self {
        Self {
            id,
            position,
            options,
            surface,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn options(&self) -> &DrawOptions {
        &self.options
    }
}

/// Move, remove and directional helpers shared by all shapes.
///
/// Implementors only describe how their current attributes compile into a
/// [`PaintCommand`]; everything else is provided.
pub trait Movable {
    fn core(&self) -> &ShapeCore;

    fn core_mut(&mut self) -> &mut ShapeCore;

    /// Builds the command for the current attributes.
    fn paint_command(&self, default_font: &FontDescriptor) -> Result<PaintCommand, DrawError>;

    fn id(&self) -> &str {
        self.core().id()
    }

    fn position(&self) -> Point {
        self.core().position()
    }

    /// Options the shape was created with.
    fn options(&self) -> &DrawOptions {
        self.core().options()
    }

    /// Registers the current attributes on the surface and paints them.
    fn draw(&self) -> Result<(), DrawError> {
        let core = self.core();
        let Some(surface) = core.surface.upgrade() else {
            debug!("Shape '{}' has no surface; draw skipped", core.id);
            return Ok(());
        };
        let mut surface = surface.borrow_mut();
        let command = self.paint_command(surface.default_font())?;
        surface.register(&core.id, command);
        Ok(())
    }

    /// Deletes this shape's entry, clears the surface and replays the others.
    ///
    /// The shape itself stays usable; drawing or moving it registers it again.
    fn remove(&self) {
        let core = self.core();
        match core.surface.upgrade() {
            Some(surface) => {
                surface.borrow_mut().remove(&core.id);
            }
            None => debug!("Shape '{}' has no surface; remove skipped", core.id),
        }
    }

    /// Moves the shape to (x, y), redrawing the whole surface and placing the
    /// shape on top. Does nothing once the surface has been reset.
    fn move_to(&mut self, x: f64, y: f64) -> Result<(), DrawError> {
        let Some(surface) = self.core().surface.upgrade() else {
            debug!("Shape '{}' has no surface; move skipped", self.id());
            return Ok(());
        };
        if surface.borrow().is_reset() {
            debug!("Surface reset; ignoring move of '{}'", self.id());
            return Ok(());
        }
        self.remove();
        self.core_mut().position = Point::new(x, y);
        self.draw()
    }

    fn left(&mut self, distance: impl Into<Option<f64>>) -> Result<(), DrawError>
    where
        Self: Sized,
    {
        let d = distance.into().unwrap_or(DEFAULT_STEP);
        let p = self.position();
        self.move_to(p.x - d, p.y)
    }

    fn right(&mut self, distance: impl Into<Option<f64>>) -> Result<(), DrawError>
    where
        Self: Sized,
    {
        let d = distance.into().unwrap_or(DEFAULT_STEP);
        let p = self.position();
        self.move_to(p.x + d, p.y)
    }

    fn up(&mut self, distance: impl Into<Option<f64>>) -> Result<(), DrawError>
    where
        Self: Sized,
    {
        let d = distance.into().unwrap_or(DEFAULT_STEP);
        let p = self.position();
        self.move_to(p.x, p.y - d)
    }

    fn down(&mut self, distance: impl Into<Option<f64>>) -> Result<(), DrawError>
    where
        Self: Sized,
    {
        let d = distance.into().unwrap_or(DEFAULT_STEP);
        let p = self.position();
        self.move_to(p.x, p.y + d)
    }

    // Diagonals are two single-axis moves, so each one redraws the surface twice.

    fn northeast(&mut self, distance: impl Into<Option<f64>>) -> Result<(), DrawError>
    where
        Self: Sized,
    {
        let d = distance.into();
        self.up(d)?;
        self.right(d)
    }

    fn northwest(&mut self, distance: impl Into<Option<f64>>) -> Result<(), DrawError>
    where
        Self: Sized,
    {
        let d = distance.into();
        self.up(d)?;
        self.left(d)
    }

    fn southeast(&mut self, distance: impl Into<Option<f64>>) -> Result<(), DrawError>
    where
        Self: Sized,
    {
        let d = distance.into();
        self.down(d)?;
        self.right(d)
    }

    fn southwest(&mut self, distance: impl Into<Option<f64>>) -> Result<(), DrawError>
    where
        Self: Sized,
    {
        let d = distance.into();
        self.down(d)?;
        self.left(d)
    }
}
