//! Input model: modifier keys, mouse buttons, key names, and the gesture state machine.
//!
//! `Modifiers` and `Key` capture what the host reported for an event.
//! [`Gesture`] is the interaction in progress between pointer-down and
//! pointer-up (or between starting and finishing a text edit). It is never
//! part of the undo history: aborting a gesture only drops this state.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::slot::SlotId;
use crate::transform::{Direction, Point};

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Whether a click should toggle the slot in the selection instead of replacing it.
    #[must_use]
    pub fn multi_select(self) -> bool {
        self.ctrl || self.shift
    }

    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"ArrowUp"`, `"Escape"`, `"z"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Nudge direction for arrow keys.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        match self.0.as_str() {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_enter(&self) -> bool {
        self.0 == "Enter"
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }

    /// Case-insensitive match for single-letter shortcuts; shift reports `"Z"`.
    #[must_use]
    pub fn is_letter(&self, letter: char) -> bool {
        let mut chars = self.0.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.eq_ignore_ascii_case(&letter))
    }
}

/// Keyboard command resolved from a key and its modifiers, outside text editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Undo,
    Redo,
    Nudge { direction: Direction, coarse: bool },
}

impl KeyCommand {
    /// Map `key` with `modifiers` to a command.
    ///
    /// Ctrl/Meta+Z undoes; Ctrl/Meta+Shift+Z and Ctrl/Meta+Y redo. Arrow keys
    /// nudge, ten units at a time with Shift.
    #[must_use]
    pub fn from_key(key: &Key, modifiers: Modifiers) -> Option<Self> {
        if modifiers.command() {
            if key.is_letter('z') {
                return Some(if modifiers.shift { Self::Redo } else { Self::Undo });
            }
            if key.is_letter('y') {
                return Some(Self::Redo);
            }
            return None;
        }
        key.direction().map(|direction| Self::Nudge { direction, coarse: modifiers.shift })
    }
}

/// Gesture in progress.
///
/// Each active variant carries the context needed to compute the next
/// mutation without reading back intermediate state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A slot body is being moved. Nothing is committed until release.
    Dragging {
        /// Id of the slot being dragged.
        id: SlotId,
        /// Screen position of the pointer at pointer-down.
        start: Point,
        /// Screen position of the slot center at pointer-down.
        origin: Point,
        /// Latest pointer position.
        current: Point,
    },
    /// A slot's text is open in the host's inline editor.
    Editing {
        /// Id of the slot being edited.
        id: SlotId,
        /// Uncommitted text.
        draft: String,
    },
    /// A corner handle is being dragged. Each move commits a font size.
    Resizing {
        /// Id of the slot being resized.
        id: SlotId,
        /// Screen center of the slot; distances are measured from here.
        center: Point,
        /// Font size at pointer-down.
        initial_font: i32,
        /// Screen position of the pointer at pointer-down.
        start: Point,
    },
    /// The rotate handle is being dragged. Each move commits a rotation.
    Rotating {
        /// Id of the slot being rotated.
        id: SlotId,
        /// Screen center of the slot; the rotation pivot.
        center: Point,
    },
}

impl Gesture {
    /// Slot the gesture acts on, if any.
    #[must_use]
    pub fn slot_id(&self) -> Option<SlotId> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::Editing { id, .. } | Self::Resizing { id, .. } | Self::Rotating { id, .. } => {
                Some(*id)
            }
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
