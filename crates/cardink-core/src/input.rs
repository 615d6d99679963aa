//! Pointer/keyboard event types and history hotkey decoding.
//!
//! Positions are in screen pixels; the editor converts them to logical
//! canvas coordinates through its [`crate::viewport::Viewport`].

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event for unified mouse/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: PointerButton,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
    },
    /// The pointer stream was interrupted (capture lost, touch
    /// cancelled). Treated as a clean drag end.
    Cancel,
}

/// A key-down event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Key value, e.g. "z", "Enter", "Escape".
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }
}

/// History shortcuts recognized by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryShortcut {
    Undo,
    Redo,
}

impl HistoryShortcut {
    /// Decode Ctrl/Cmd+Z (undo) and Ctrl/Cmd+Shift+Z or Ctrl/Cmd+Y
    /// (redo). While focus is inside a text input the shortcuts are
    /// suppressed entirely, deferring to the input's native undo.
    pub fn from_key(event: &KeyEvent, text_input_focused: bool) -> Option<Self> {
        if text_input_focused || !event.modifiers.command() {
            return None;
        }
        match event.key.to_lowercase().as_str() {
            "z" if !event.modifiers.shift => Some(Self::Undo),
            "z" => Some(Self::Redo),
            "y" => Some(Self::Redo),
            _ => None,
        }
    }
}
