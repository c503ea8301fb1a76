//! Headless renderer that records every call instead of painting pixels.
//!
//! Useful for hosts that forward paint traffic elsewhere and for asserting
//! redraw behaviour (number of clears, replay order) in tests.

use super::color::Color;
use super::command::PaintCommand;
use super::render::Renderer;
use std::cell::RefCell;
use std::rc::Rc;

/// One call received by a [`RecordingRenderer`].
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOp {
    Clear,
    Paint(PaintCommand),
    Resize { width: u32, height: u32 },
    Background(Option<Color>),
}

/// Shared, cloneable view of the calls a recording renderer has seen.
#[derive(Clone, Debug, Default)]
pub struct RenderLog {
    ops: Rc<RefCell<Vec<RenderOp>>>,
}

impl RenderLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, op: RenderOp) {
        self.ops.borrow_mut().push(op);
    }

    /// Snapshot of every recorded call, oldest first.
    pub fn ops(&self) -> Vec<RenderOp> {
        self.ops.borrow().clone()
    }

    /// Drains the log, returning what was recorded so far.
    pub fn take(&self) -> Vec<RenderOp> {
        std::mem::take(&mut *self.ops.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.ops.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.borrow().is_empty()
    }

    /// Number of full clears recorded.
    pub fn clear_count(&self) -> usize {
        self.ops
            .borrow()
            .iter()
            .filter(|op| matches!(op, RenderOp::Clear))
            .count()
    }

    /// Commands painted since the most recent clear, in paint order.
    pub fn painted_since_clear(&self) -> Vec<PaintCommand> {
        let ops = self.ops.borrow();
        let start = ops
            .iter()
            .rposition(|op| matches!(op, RenderOp::Clear))
            .map_or(0, |i| i + 1);
        ops[start..]
            .iter()
            .filter_map(|op| match op {
                RenderOp::Paint(command) => Some(command.clone()),
                _ => None,
            })
            .collect()
    }
}

/// [`Renderer`] that appends each call to a [`RenderLog`].
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    log: RenderLog,
}

impl RecordingRenderer {
    pub fn new(log: RenderLog) -> Self {
        Self { log }
    }

    pub fn log(&self) -> &RenderLog {
        &self.log
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self) {
        self.log.push(RenderOp::Clear);
    }

    fn paint(&mut self, command: &PaintCommand) {
        self.log.push(RenderOp::Paint(command.clone()));
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.log.push(RenderOp::Resize { width, height });
    }

    fn set_background(&mut self, color: Option<Color>) {
        self.log.push(RenderOp::Background(color));
    }
}
