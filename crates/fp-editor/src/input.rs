//! Input abstraction layer.
//!
//! Normalizes what the canvas host sees (pointer, keyboard, palette drops,
//! handle-to-handle connect gestures, renderer measurements) into a single
//! `InputEvent` enum consumed by the controller.
//!
//! Pointer and drop coordinates are **screen** space; the controller maps
//! them to canvas space through the current [`crate::Viewport`].

use fp_core::{NodeId, Point, Size};

/// Keyboard modifier state at the time of the event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    /// ⌘ on macOS.
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    /// Platform command key: ⌘ on macOS, Ctrl elsewhere.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed over the canvas.
    PointerDown { x: f64, y: f64 },

    /// Pointer moved.
    PointerMove { x: f64, y: f64 },

    /// Pointer released.
    PointerUp { x: f64, y: f64 },

    /// A connection was drawn from `source`'s output handle to `target`'s
    /// input handle.
    Connect { source: NodeId, target: NodeId },

    /// A palette entry was dropped on the canvas.
    Drop {
        /// Machine template label carried by the drag payload.
        label: String,
        /// Backend machine id, when the template came from the catalog.
        machine_id: Option<String>,
        x: f64,
        y: f64,
    },

    /// The renderer measured a node after painting it.
    Measured { id: NodeId, size: Size },

    /// Key pressed.
    Key {
        key: String,
        modifiers: Modifiers,
        /// Focus is inside a text input; canvas shortcuts must not fire.
        in_text_input: bool,
    },
}

impl InputEvent {
    /// Extract the screen position if this is a pointer or drop event.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y }
            | Self::PointerMove { x, y }
            | Self::PointerUp { x, y }
            | Self::Drop { x, y, .. } => Some(Point::new(*x, *y)),
            _ => None,
        }
    }

    /// Convenience constructor for a key press outside any text input.
    pub fn key(key: &str, modifiers: Modifiers) -> Self {
        Self::Key {
            key: key.to_string(),
            modifiers,
            in_text_input: false,
        }
    }
}
