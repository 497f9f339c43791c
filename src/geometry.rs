//! Rectangle math shared by the monitor, drag and tiling code.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in the virtual (root) coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }

    /// Intersection area with another rectangle. Zero when disjoint.
    pub fn overlap_area(&self, other: &Rect) -> i64 {
        let x0 = self.x.max(other.x) as i64;
        let x1 = (self.x as i64 + i64::from(self.width)).min(other.x as i64 + i64::from(other.width));
        let y0 = self.y.max(other.y) as i64;
        let y1 =
            (self.y as i64 + i64::from(self.height)).min(other.y as i64 + i64::from(other.height));

        (x1 - x0).max(0) * (y1 - y0).max(0)
    }

    /// Whether `other` lies entirely within this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        self.overlap_area(other) == other.area()
    }
}

/// Translate a rectangle from one monitor's coordinate space to another's,
/// preserving its relative position and scaling its size proportionally.
pub fn scale_between(rect: &Rect, from: &Rect, to: &Rect) -> Rect {
    let sx = f64::from(to.width) / f64::from(from.width.max(1));
    let sy = f64::from(to.height) / f64::from(from.height.max(1));

    Rect {
        x: (f64::from(rect.x - from.x) * sx) as i32 + to.x,
        y: (f64::from(rect.y - from.y) * sy) as i32 + to.y,
        width: (f64::from(rect.width) * sx) as u32,
        height: (f64::from(rect.height) * sy) as u32,
    }
}

/// Split `[origin, origin + extent)` into `count` contiguous bands.
/// Returned boundaries have length `count + 1` and cover the extent exactly.
pub fn split_axis(origin: i32, extent: u32, count: usize) -> Vec<i32> {
    (0..=count)
        .map(|i| origin + (i64::from(extent) * i as i64 / count as i64) as i32)
        .collect()
}
