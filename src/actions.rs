//! Window manager actions.
//!
//! Every key and mouse binding resolves to one of these closed variants,
//! carrying its argument as payload. Nothing is dispatched by name.

use serde::{Deserialize, Serialize};

use crate::layout::TilePattern;

/// Direction for cycling through ordered sets (focus, virtual screens).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum CycleDir {
    Forward,
    Backward,
}

impl CycleDir {
    pub fn delta(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// Half of a window rectangle, for the halve-window operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Side {
    Left,
    Right,
    Upper,
    Lower,
}

/// All actions the window manager can perform.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum Action {
    /// Cycle focus through the visible windows.
    FocusNext(CycleDir),
    /// Tile the focused window's monitor with the given pattern.
    TileWindows(TilePattern),
    /// Switch to the given virtual screen.
    SelectVscreen(usize),
    /// Send the focused window to an adjacent virtual screen.
    SendWindowToVscreen(CycleDir),
    /// Move the focused window to the next monitor, rescaling its geometry.
    MoveWindowToNextMonitor,
    /// Shrink the focused window to the named half of its rectangle.
    HalveWindow(Side),
    /// Start a pointer move gesture (mouse bindings only).
    WindowMove,
    /// Start a pointer resize gesture (mouse bindings only).
    WindowResize,
    /// Spawn an external command.
    Spawn(String),
}
