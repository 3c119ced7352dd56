//! Pointer events as seen by the document and its listeners.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

/// A pointer-down at a terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub position: Position,
    pub button: MouseButton,
}

impl PointerEvent {
    /// Left-button pointer-down at `(x, y)`
    pub fn at(x: u16, y: u16) -> Self {
        Self {
            position: Position::new(x, y),
            button: MouseButton::Left,
        }
    }

    /// Convert a crossterm mouse event. Only button presses count as
    /// pointer-down; moves, drags, releases and scrolls yield `None`.
    pub fn from_mouse(event: &MouseEvent) -> Option<Self> {
        match event.kind {
            MouseEventKind::Down(button) => Some(Self {
                position: Position::new(event.column, event.row),
                button,
            }),
            _ => None,
        }
    }
}
