use super::{Movable, ShapeCore};
use crate::connector::Connector;
use crate::draw::{DrawOptions, FontDescriptor, PaintCommand, Point};
use crate::error::DrawError;
use crate::surface::DEFAULT_SIZE;

fn core_on(connector: &Connector, x: f64, y: f64, options: DrawOptions) -> ShapeCore {
    let surface = connector.surface();
    let id = surface.borrow().next_id();
    ShapeCore::new(id, Point::new(x, y), options, surface.downgrade())
}

/// Circle centered on its position.
#[derive(Debug, Clone)]
pub struct Circle {
    core: ShapeCore,
    radius: f64,
}

impl Circle {
    /// Creates and draws a circle. `radius` defaults to 10.
    pub fn new(
        connector: &Connector,
        x: f64,
        y: f64,
        radius: impl Into<Option<f64>>,
        options: DrawOptions,
    ) -> Result<Self, DrawError> {
        let circle = Self {
            core: core_on(connector, x, y, options),
            radius: radius.into().unwrap_or(DEFAULT_SIZE),
        };
        circle.draw()?;
        Ok(circle)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Movable for Circle {
    fn core(&self) -> &ShapeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ShapeCore {
        &mut self.core
    }

    fn paint_command(&self, _default_font: &FontDescriptor) -> Result<PaintCommand, DrawError> {
        let p = self.core.position;
        Ok(PaintCommand::Circle {
            x: p.x,
            y: p.y,
            radius: self.radius,
            style: self.core.options.shape_style(),
        })
    }
}

/// Rectangle anchored at its top-left corner.
#[derive(Debug, Clone)]
pub struct Rectangle {
    core: ShapeCore,
    width: f64,
    height: f64,
}

impl Rectangle {
    /// Creates and draws a rectangle. `width` and `height` default to 10.
    pub fn new(
        connector: &Connector,
        x: f64,
        y: f64,
        width: impl Into<Option<f64>>,
        height: impl Into<Option<f64>>,
        options: DrawOptions,
    ) -> Result<Self, DrawError> {
        let rectangle = Self {
            core: core_on(connector, x, y, options),
            width: width.into().unwrap_or(DEFAULT_SIZE),
            height: height.into().unwrap_or(DEFAULT_SIZE),
        };
        rectangle.draw()?;
        Ok(rectangle)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

impl Movable for Rectangle {
    fn core(&self) -> &ShapeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ShapeCore {
        &mut self.core
    }

    fn paint_command(&self, _default_font: &FontDescriptor) -> Result<PaintCommand, DrawError> {
        let p = self.core.position;
        Ok(PaintCommand::Rectangle {
            x: p.x,
            y: p.y,
            width: self.width,
            height: self.height,
            style: self.core.options.shape_style(),
        })
    }
}

/// Square anchored at its top-left corner, painted as a rectangle.
#[derive(Debug, Clone)]
pub struct Square {
    core: ShapeCore,
    side: f64,
}

impl Square {
    /// Creates and draws a square. `side` defaults to 10.
    pub fn new(
        connector: &Connector,
        x: f64,
        y: f64,
        side: impl Into<Option<f64>>,
        options: DrawOptions,
    ) -> Result<Self, DrawError> {
        let square = Self {
            core: core_on(connector, x, y, options),
            side: side.into().unwrap_or(DEFAULT_SIZE),
        };
        square.draw()?;
        Ok(square)
    }

    pub fn side(&self) -> f64 {
        self.side
    }
}

impl Movable for Square {
    fn core(&self) -> &ShapeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ShapeCore {
        &mut self.core
    }

    fn paint_command(&self, _default_font: &FontDescriptor) -> Result<PaintCommand, DrawError> {
        let p = self.core.position;
        Ok(PaintCommand::Rectangle {
            x: p.x,
            y: p.y,
            width: self.side,
            height: self.side,
            style: self.core.options.shape_style(),
        })
    }
}

/// Text anchored at its baseline start.
#[derive(Debug, Clone)]
pub struct Label {
    core: ShapeCore,
    text: String,
}

impl Label {
    /// Creates and draws a label.
    ///
    /// # Errors
    /// [`DrawError::InvalidOption`] when `filled` is not a boolean; no entry is
    /// registered.
    pub fn new(
        connector: &Connector,
        text: impl Into<String>,
        x: f64,
        y: f64,
        options: DrawOptions,
    ) -> Result<Self, DrawError> {
        let label = Self {
            core: core_on(connector, x, y, options),
            text: text.into(),
        };
        label.draw()?;
        Ok(label)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Takes the new text from `options.text` (if set) and redraws in place.
    ///
    /// Other option fields are ignored; the label keeps the style it was
    /// created with.
    pub fn update(&mut self, options: &DrawOptions) -> Result<(), DrawError> {
        if let Some(text) = &options.text {
            self.text = text.clone();
        }
        let p = self.core.position;
        self.move_to(p.x, p.y)
    }
}

impl Movable for Label {
    fn core(&self) -> &ShapeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ShapeCore {
        &mut self.core
    }

    fn paint_command(&self, default_font: &FontDescriptor) -> Result<PaintCommand, DrawError> {
        let p = self.core.position;
        Ok(PaintCommand::Text {
            text: self.text.clone(),
            x: p.x,
            y: p.y,
            style: self.core.options.text_style(default_font)?,
        })
    }
}

/// Any of the four shape kinds, for heterogeneous collections.
#[derive(Debug, Clone)]
pub enum AnyShape {
    Circle(Circle),
    Rectangle(Rectangle),
    Square(Square),
    Label(Label),
}

impl Movable for AnyShape {
    fn core(&self) -> &ShapeCore {
        match self {
            AnyShape::Circle(s) => s.core(),
            AnyShape::Rectangle(s) => s.core(),
            AnyShape::Square(s) => s.core(),
            AnyShape::Label(s) => s.core(),
        }
    }

    fn core_mut(&mut self) -> &mut ShapeCore {
        match self {
            AnyShape::Circle(s) => s.core_mut(),
            AnyShape::Rectangle(s) => s.core_mut(),
            AnyShape::Square(s) => s.core_mut(),
            AnyShape::Label(s) => s.core_mut(),
        }
    }

    fn paint_command(&self, default_font: &FontDescriptor) -> Result<PaintCommand, DrawError> {
        match self {
            AnyShape::Circle(s) => s.paint_command(default_font),
            AnyShape::Rectangle(s) => s.paint_command(default_font),
            AnyShape::Square(s) => s.paint_command(default_font),
            AnyShape::Label(s) => s.paint_command(default_font),
        }
    }
}

impl From<Circle> for AnyShape {
    fn from(shape: Circle) -> Self {
        AnyShape::Circle(shape)
    }
}

impl From<Rectangle> for AnyShape {
    fn from(shape: Rectangle) -> Self {
        AnyShape::Rectangle(shape)
    }
}

impl From<Square> for AnyShape {
    fn from(shape: Square) -> Self {
        AnyShape::Square(shape)
    }
}

impl From<Label> for AnyShape {
    fn from(shape: Label) -> Self {
        AnyShape::Label(shape)
    }
}
