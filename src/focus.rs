//! Focus frame geometry.
//!
//! The focused window is surrounded by four independent border rectangles.
//! Computing them is pure; drawing is left to the display backend.

use crate::geometry::Rect;

/// The four border rectangles around a focused window, plus their color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    pub left: Rect,
    pub right: Rect,
    pub top: Rect,
    pub bottom: Rect,
    /// Pixel value for all four borders.
    pub color: u64,
}

impl FrameGeometry {
    /// Frame of `thickness` pixels hugging the outside of `rect`.
    ///
    /// The top and bottom bars span the full frame width including the
    /// corners; the side bars fill the remaining height.
    pub fn around(rect: &Rect, thickness: u32, color: u64) -> Self {
        let t = thickness as i32;
        let outer_width = rect.width + 2 * thickness;

        Self {
            top: Rect::new(rect.x - t, rect.y - t, outer_width, thickness),
            bottom: Rect::new(rect.x - t, rect.y + rect.height as i32, outer_width, thickness),
            left: Rect::new(rect.x - t, rect.y, thickness, rect.height),
            right: Rect::new(rect.x + rect.width as i32, rect.y, thickness, rect.height),
            color,
        }
    }
}
