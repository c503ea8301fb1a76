//! Retained-mode 2D drawing on a replayable surface.
//!
//! Every visible drawable lives in the surface's [`DrawRegistry`]. Removing
//! or moving a shape clears the pixels and replays the registry, so what is
//! on screen always matches the registry contents. A [`Connector`] owns the
//! active surface, routes pointer and key input and drives the user's
//! [`Sketch`] through a two-phase frame loop.
//!
//! ```no_run
//! use playit::{CairoHost, Circle, DrawOptions, FnSketch, Movable, connect};
//!
//! let connector = connect(
//!     |connector| {
//!         let mut ball =
//!             Circle::new(connector, 20.0, 20.0, 8.0, DrawOptions::new().fill_color("red"))
//!                 .expect("circle options are valid");
//!         FnSketch(move || {
//!             let _ = ball.southeast(2.0);
//!             Some(0.05)
//!         })
//!     },
//!     CairoHost::new(320, 240),
//! )?;
//! connector.run()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod connector;
pub mod draw;
pub mod error;
pub mod host;
pub mod ids;
pub mod input;
pub mod shape;
pub mod surface;

pub use config::Config;
pub use connector::{Connector, FnSketch, Sketch, connect, connect_with};
pub use draw::{Color, DrawOptions, DrawRegistry, PaintCommand, Point, Renderer};
pub use error::{DrawError, OptionsError, RenderError};
pub use host::{CairoHost, Host, RecordingHost};
pub use ids::{IdSource, SequentialIds, UuidSource};
pub use input::{EventOutcome, InputEvent};
pub use shape::{AnyShape, Circle, Label, Movable, Rectangle, Square};
pub use surface::{Surface, SurfaceHandle};
