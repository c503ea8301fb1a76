//! Visual hosts: where surfaces get their pixel buffers and are shown.
//!
//! A [`Host`] plays the part of the container a surface is attached to. It
//! reports the viewport size, creates a renderer per surface and is told when
//! surfaces are attached or detached.

use crate::draw::record::{RecordingRenderer, RenderLog};
use crate::draw::{CairoRenderer, Color, PaintCommand, Renderer};
use anyhow::{Context, Result};
use log::{debug, info};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Container surfaces are attached to.
pub trait Host {
    /// Current viewport size in pixels.
    fn viewport_size(&self) -> (u32, u32);

    /// Creates the pixel buffer for a new surface.
    fn create_renderer(
        &mut self,
        surface_id: &str,
        width: u32,
        height: u32,
    ) -> Result<Box<dyn Renderer>>;

    /// Makes the surface visible in this host.
    fn attach(&mut self, surface_id: &str);

    /// Removes the surface from this host.
    fn detach(&mut self, surface_id: &str);
}

impl<R: Renderer + ?Sized> Renderer for Rc<RefCell<R>> {
    fn clear(&mut self) {
        self.borrow_mut().clear();
    }

    fn paint(&mut self, command: &PaintCommand) {
        self.borrow_mut().paint(command);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.borrow_mut().resize(width, height);
    }

    fn set_background(&mut self, color: Option<Color>) {
        self.borrow_mut().set_background(color);
    }
}

// ============================================================================
// Cairo host
// ============================================================================

#[derive(Default)]
struct CairoHostState {
    viewport: (u32, u32),
    renderers: HashMap<String, Rc<RefCell<CairoRenderer>>>,
    attached: Option<String>,
}

/// Offscreen host backed by Cairo image surfaces.
///
/// Cloning yields another handle to the same host, so callers can keep one to
/// read pixels after handing a clone to [`connect`](crate::connect).
#[derive(Clone, Default)]
pub struct CairoHost {
    state: Rc<RefCell<CairoHostState>>,
}

impl CairoHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            state: Rc::new(RefCell::new(CairoHostState {
                viewport: (width, height),
                ..Default::default()
            })),
        }
    }

    /// Updates the reported viewport size. Surfaces follow it once the matching
    /// resize event is delivered through the connector.
    pub fn set_viewport(&self, width: u32, height: u32) {
        self.state.borrow_mut().viewport = (width, height);
    }

    /// Id of the currently attached surface.
    pub fn attached(&self) -> Option<String> {
        self.state.borrow().attached.clone()
    }

    /// Renderer of the currently attached surface.
    pub fn attached_renderer(&self) -> Option<Rc<RefCell<CairoRenderer>>> {
        let state = self.state.borrow();
        let id = state.attached.as_ref()?;
        state.renderers.get(id).cloned()
    }

    /// Renderer of any surface created by this host.
    pub fn renderer(&self, surface_id: &str) -> Option<Rc<RefCell<CairoRenderer>>> {
        self.state.borrow().renderers.get(surface_id).cloned()
    }
}

impl Host for CairoHost {
    fn viewport_size(&self) -> (u32, u32) {
        self.state.borrow().viewport
    }

    fn create_renderer(
        &mut self,
        surface_id: &str,
        width: u32,
        height: u32,
    ) -> Result<Box<dyn Renderer>> {
        let renderer = CairoRenderer::new(width, height)
            .with_context(|| format!("Failed to create {}x{} cairo surface", width, height))?;
        let renderer = Rc::new(RefCell::new(renderer));
        self.state
            .borrow_mut()
            .renderers
            .insert(surface_id.to_string(), Rc::clone(&renderer));
        debug!("Created cairo surface '{}' ({}x{})", surface_id, width, height);
        Ok(Box::new(renderer))
    }

    fn attach(&mut self, surface_id: &str) {
        info!("Attaching surface '{}'", surface_id);
        self.state.borrow_mut().attached = Some(surface_id.to_string());
    }

    fn detach(&mut self, surface_id: &str) {
        let mut state = self.state.borrow_mut();
        if state.attached.as_deref() == Some(surface_id) {
            info!("Detaching surface '{}'", surface_id);
            state.attached = None;
        }
        state.renderers.remove(surface_id);
    }
}

// ============================================================================
// Recording host
// ============================================================================

/// Attach/detach notification received by a [`RecordingHost`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostEvent {
    Attached(String),
    Detached(String),
}

#[derive(Default)]
struct RecordingHostState {
    viewport: (u32, u32),
    logs: HashMap<String, RenderLog>,
    events: Vec<HostEvent>,
}

/// Headless host handing out [`RecordingRenderer`]s.
///
/// Every surface gets its own [`RenderLog`]; attach and detach calls are
/// recorded in order. Cloning shares the same state.
#[derive(Clone, Default)]
pub struct RecordingHost {
    state: Rc<RefCell<RecordingHostState>>,
}

impl RecordingHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            state: Rc::new(RefCell::new(RecordingHostState {
                viewport: (width, height),
                ..Default::default()
            })),
        }
    }

    pub fn set_viewport(&self, width: u32, height: u32) {
        self.state.borrow_mut().viewport = (width, height);
    }

    /// Render log of the given surface.
    pub fn log(&self, surface_id: &str) -> Option<RenderLog> {
        self.state.borrow().logs.get(surface_id).cloned()
    }

    /// Attach/detach calls so far, oldest first.
    pub fn events(&self) -> Vec<HostEvent> {
        self.state.borrow().events.clone()
    }
}

impl Host for RecordingHost {
    fn viewport_size(&self) -> (u32, u32) {
        self.state.borrow().viewport
    }

    fn create_renderer(
        &mut self,
        surface_id: &str,
        _width: u32,
        _height: u32,
    ) -> Result<Box<dyn Renderer>> {
        let log = RenderLog::new();
        self.state
            .borrow_mut()
            .logs
            .insert(surface_id.to_string(), log.clone());
        Ok(Box::new(RecordingRenderer::new(log)))
    }

    fn attach(&mut self, surface_id: &str) {
        self.state
            .borrow_mut()
            .events
            .push(HostEvent::Attached(surface_id.to_string()));
    }

    fn detach(&mut self, surface_id: &str) {
        self.state
            .borrow_mut()
            .events
            .push(HostEvent::Detached(surface_id.to_string()));
    }
}
