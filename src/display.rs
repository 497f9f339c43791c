//! Traits at the window-system boundary.
//!
//! The decision core never holds a live window-system object; windows are
//! identified by an opaque [`WindowId`] and all queries and commands go
//! through [`DisplayControl`]. Queries return `Option` so callers branch on
//! absence when a window vanished between event read and command issue.
//! Commands are fire-and-forget: a command against a vanished window must be
//! a no-op on the implementation side.

use crate::event::Event;
use crate::focus::FrameGeometry;
use crate::geometry::Rect;
use crate::monitor::Monitor;

/// Opaque window identity (the X window id in the real backend).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u64);

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Attributes relevant to the management decision for a window.
#[derive(Debug, Clone, Default)]
pub struct WindowAttributes {
    /// The window opted out of management.
    pub override_redirect: bool,
    /// Whether the window is currently mapped.
    pub mapped: bool,
    /// WM_CLASS, when the window provides one.
    pub class: Option<String>,
}

/// A partial geometry change. Unset fields are left unchanged, mirroring a
/// configure request's value mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeometryUpdate {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl GeometryUpdate {
    /// Update position only.
    pub fn position(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Update size only.
    pub fn size(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Update all four fields.
    pub fn rect(rect: Rect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            width: Some(rect.width),
            height: Some(rect.height),
        }
    }

    /// The rectangle resulting from applying this update to `base`.
    pub fn apply_to(&self, base: Rect) -> Rect {
        Rect {
            x: self.x.unwrap_or(base.x),
            y: self.y.unwrap_or(base.y),
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
        }
    }
}

/// Outbound window-control sink plus the probes the core needs.
pub trait DisplayControl {
    /// Current geometry of a window, or `None` if it vanished.
    fn query_geometry(&mut self, window: WindowId) -> Option<Rect>;

    /// Management-relevant attributes of a window, or `None` if it vanished.
    fn query_attributes(&mut self, window: WindowId) -> Option<WindowAttributes>;

    /// Apply a partial geometry change.
    fn apply_geometry(&mut self, window: WindowId, update: GeometryUpdate);

    /// Raise the window above its siblings and give it input focus.
    fn raise_and_focus(&mut self, window: WindowId);

    /// Make the window visible.
    fn show(&mut self, window: WindowId);

    /// Make the window invisible.
    fn hide(&mut self, window: WindowId);

    /// Move the pointer to `(x, y)` relative to the window's origin.
    fn warp_pointer(&mut self, window: WindowId, x: i32, y: i32);

    /// Draw the focus frame with the given geometry.
    fn show_frame(&mut self, frame: &FrameGeometry);

    /// Remove the focus frame.
    fn hide_frame(&mut self);

    /// Probe the hardware for the current monitor list. May be empty.
    fn probe_monitors(&mut self) -> Vec<Monitor>;
}

/// Inbound event source.
pub trait EventSource {
    /// Block until the next event arrives.
    fn next_event(&mut self) -> Event;
}
