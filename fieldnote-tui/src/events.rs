//! Event types for the TUI event loop.

use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Input(KeyEvent),
    /// Pointer-down only; the dismiss-on-outside-click contract needs no
    /// other mouse events.
    MouseDown { column: u16, row: u16 },
    Tick,
    Resize { width: u16, height: u16 },
}
