//! Ordered registry of paint commands and the full clear-and-replay redraw.

use super::command::PaintCommand;
use super::render::Renderer;
use log::debug;

/// Every visible paint command of a surface, keyed by id.
///
/// Entries are kept in paint order (first = bottom layer, last = top layer).
/// Re-registering an id moves it to the top. There is no incremental repaint:
/// any removal clears the whole surface and replays every remaining entry.
#[derive(Debug, Clone, Default)]
pub struct DrawRegistry {
    entries: Vec<(String, PaintCommand)>,
}

impl DrawRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Stores `command` under `id` on top of the paint order and paints it once.
    ///
    /// An existing entry for the same id is replaced; the replacement is painted
    /// over the current pixels without clearing.
    pub fn register(&mut self, id: &str, command: PaintCommand, renderer: &mut dyn Renderer) {
        if let Some(index) = self.position(id) {
            self.entries.remove(index);
        }
        debug!("Registering {} '{}'", command.kind(), id);
        renderer.paint(&command);
        self.entries.push((id.to_string(), command));
    }

    /// Deletes the entry for `id`, then clears and replays the rest.
    ///
    /// The redraw happens even when no entry existed. Returns whether one was
    /// removed.
    pub fn remove(&mut self, id: &str, renderer: &mut dyn Renderer) -> bool {
        let removed = match self.position(id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        };
        debug!("Removing '{}' (present: {})", id, removed);
        self.replay(renderer);
        removed
    }

    /// Clears the surface and repaints every entry in paint order.
    pub fn replay(&self, renderer: &mut dyn Renderer) {
        renderer.clear();
        for (_, command) in &self.entries {
            renderer.paint(command);
        }
        debug!("Replayed {} entries", self.entries.len());
    }

    /// Drops every entry without touching the pixels.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&PaintCommand> {
        self.entries
            .iter()
            .find(|(entry_id, _)| entry_id == id)
            .map(|(_, command)| command)
    }

    /// Ids in paint order.
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|(id, _)| id.as_str()).collect()
    }

    /// Entries in paint order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PaintCommand)> {
        self.entries
            .iter()
            .map(|(id, command)| (id.as_str(), command))
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|(entry_id, _)| entry_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::BLACK;
    use crate::draw::command::ShapeStyle;
    use crate::draw::record::{RecordingRenderer, RenderLog, RenderOp};

    fn rect(x: f64) -> PaintCommand {
        PaintCommand::Rectangle {
            x,
            y: 0.0,
            width: 10.0,
            height: 10.0,
            style: ShapeStyle {
                fill: None,
                border: BLACK,
            },
        }
    }

    fn recorder() -> (RecordingRenderer, RenderLog) {
        let log = RenderLog::new();
        (RecordingRenderer::new(log.clone()), log)
    }

    #[test]
    fn register_paints_immediately_without_clearing() {
        let (mut renderer, log) = recorder();
        let mut registry = DrawRegistry::new();
        registry.register("a", rect(1.0), &mut renderer);

        assert_eq!(log.ops(), vec![RenderOp::Paint(rect(1.0))]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn reregister_moves_entry_to_top() {
        let (mut renderer, _log) = recorder();
        let mut registry = DrawRegistry::new();
        registry.register("a", rect(1.0), &mut renderer);
        registry.register("b", rect(2.0), &mut renderer);
        registry.register("a", rect(3.0), &mut renderer);

        assert_eq!(registry.ids(), vec!["b", "a"]);
        assert_eq!(registry.get("a"), Some(&rect(3.0)));
    }

    #[test]
    fn remove_clears_then_replays_remaining_in_order() {
        let (mut renderer, log) = recorder();
        let mut registry = DrawRegistry::new();
        registry.register("a", rect(1.0), &mut renderer);
        registry.register("b", rect(2.0), &mut renderer);
        registry.register("c", rect(3.0), &mut renderer);
        log.take();

        assert!(registry.remove("b", &mut renderer));
        assert_eq!(
            log.ops(),
            vec![
                RenderOp::Clear,
                RenderOp::Paint(rect(1.0)),
                RenderOp::Paint(rect(3.0)),
            ]
        );
        assert_eq!(registry.ids(), vec!["a", "c"]);
    }

    #[test]
    fn removing_unknown_id_still_redraws() {
        let (mut renderer, log) = recorder();
        let mut registry = DrawRegistry::new();
        registry.register("a", rect(1.0), &mut renderer);
        log.take();

        assert!(!registry.remove("missing", &mut renderer));
        assert_eq!(log.clear_count(), 1);
        assert_eq!(log.painted_since_clear(), vec![rect(1.0)]);
    }
}
