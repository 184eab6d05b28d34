//! Input abstraction layer.
//!
//! Normalizes host pointer and keyboard events into a unified
//! `InputEvent` consumed by the drag controller and shortcut map.
//! Positions are viewport coordinates straight from the host.

use fb_core::model::Position;

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// The platform command key: ⌘ on macOS, Ctrl elsewhere.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A normalized input event from the host.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start).
    PointerDown { x: f32, y: f32, modifiers: Modifiers },
    /// Pointer moved while tracked.
    PointerMove { x: f32, y: f32, modifiers: Modifiers },
    /// Pointer released.
    PointerUp { x: f32, y: f32, modifiers: Modifiers },
    /// Keyboard event, resolved through the shortcut map.
    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    pub fn from_pointer_down(x: f32, y: f32, modifiers: Modifiers) -> Self {
        Self::PointerDown { x, y, modifiers }
    }

    pub fn from_pointer_move(x: f32, y: f32, modifiers: Modifiers) -> Self {
        Self::PointerMove { x, y, modifiers }
    }

    pub fn from_pointer_up(x: f32, y: f32, modifiers: Modifiers) -> Self {
        Self::PointerUp { x, y, modifiers }
    }

    /// Extract the viewport position if this is a pointer event.
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. } => Some(Position::new(*x, *y)),
            Self::Key { .. } => None,
        }
    }
}
