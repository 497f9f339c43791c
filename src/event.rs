//! Inbound event stream consumed by the window manager.

use crate::display::WindowId;

/// Events delivered by the window system, already translated to core types.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub enum Event {
    Unknown,

    WindowMapped(WindowId),
    WindowDestroyed(WindowId),

    ButtonPressed {
        window: WindowId,
        button: u32,
        state: u32,
        root_x: i32,
        root_y: i32,
    },
    ButtonReleased {
        window: WindowId,
    },
    PointerMoved {
        root_x: i32,
        root_y: i32,
    },
    KeyPressed {
        keysym: u32,
        state: u32,
    },
}
