//! Platform input events consumed by the connector.
//!
//! Backends translate their native pointer, keyboard and resize notifications
//! into these values and hand them to
//! [`Connector::handle_event`](crate::Connector::handle_event).

/// A pointer, keyboard or viewport notification.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to (x, y)
    PointerMove { x: f64, y: f64 },
    /// Primary button pressed at (x, y)
    PointerDown { x: f64, y: f64 },
    /// Primary button released at (x, y)
    PointerUp { x: f64, y: f64 },
    /// Key pressed; `key` is the key's name or the character it produces
    KeyDown { key: String },
    /// Viewport resized
    Resize { width: u32, height: u32 },
}

/// What the platform should do with an event after the connector saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Continue with the platform's default handling
    Default,
    /// Suppress the platform's default handling
    DefaultPrevented,
}
