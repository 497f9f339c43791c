//! Tiling layout computation.
//!
//! Layouts are pure: given the monitor rectangle and the number of windows,
//! each pattern produces one cell per window. Cells always partition the
//! monitor exactly, with no gaps or overlap.

use serde::{Deserialize, Serialize};

use crate::geometry::{split_axis, Rect};

/// Deterministic tiling patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum TilePattern {
    Grid,
    Horizontal,
    Vertical,
}

impl TilePattern {
    /// Compute the cell rectangles for `n` windows on `monitor`.
    ///
    /// Cells are in placement order: the window at index `i` of the ordered
    /// visible set takes `cells[i]`.
    pub fn cells(self, monitor: &Rect, n: usize) -> Vec<Rect> {
        if n == 0 {
            return vec![];
        }
        match self {
            Self::Grid => grid_cells(monitor, n),
            Self::Horizontal => horizontal_cells(monitor, n),
            Self::Vertical => vertical_cells(monitor, n),
        }
    }

    /// Window-list index of the primary slot, where the priority window is
    /// swapped before placement.
    pub fn priority_slot(self, n: usize) -> usize {
        match self {
            // Last slot of the second-to-last row of the full grid. When the
            // grid has offcuts this index falls on a bottom-row
            // double-height cell near the left edge.
            Self::Grid => {
                let (rows, cols) = tile_layout(n);
                if rows >= 2 {
                    (cols * (rows - 1) - 1).min(n - 1)
                } else {
                    0
                }
            }
            // Top band / leftmost column.
            Self::Horizontal | Self::Vertical => 0,
        }
    }
}

/// Grid dimensions `(rows, cols)` for `n` windows: the smallest grid fitting
/// all windows, preferring wider-than-tall on ties.
pub fn tile_layout(n: usize) -> (usize, usize) {
    if n == 0 {
        return (0, 0);
    }

    let mut side = 1;
    while side * side < n {
        side += 1;
    }

    if side * (side - 1) >= n {
        (side - 1, side)
    } else {
        (side, side)
    }
}

/// Grid cells in row-major order.
///
/// `offcuts = rows * cols - n` leftover cells are reclaimed by the bottom
/// row: its first `offcuts` cells double their height upward, consuming the
/// matching cells of the second-to-last row.
fn grid_cells(monitor: &Rect, n: usize) -> Vec<Rect> {
    let (rows, cols) = tile_layout(n);
    let offcuts = rows * cols - n;

    let xs = split_axis(monitor.x, monitor.width, cols);
    let ys = split_axis(monitor.y, monitor.height, rows);

    let mut cells = Vec::with_capacity(n);
    for row in 0..rows {
        for col in 0..cols {
            // Consumed by the double-height cell below.
            if offcuts > 0 && row + 2 == rows && col < offcuts {
                continue;
            }

            let top = if offcuts > 0 && row + 1 == rows && col < offcuts {
                ys[row - 1]
            } else {
                ys[row]
            };

            cells.push(Rect::new(
                xs[col],
                top,
                (xs[col + 1] - xs[col]) as u32,
                (ys[row + 1] - top) as u32,
            ));
        }
    }

    cells
}

/// Equal-height bands stacked top to bottom.
fn horizontal_cells(monitor: &Rect, n: usize) -> Vec<Rect> {
    let ys = split_axis(monitor.y, monitor.height, n);
    (0..n)
        .map(|i| Rect::new(monitor.x, ys[i], monitor.width, (ys[i + 1] - ys[i]) as u32))
        .collect()
}

/// Equal-width columns left to right.
fn vertical_cells(monitor: &Rect, n: usize) -> Vec<Rect> {
    let xs = split_axis(monitor.x, monitor.width, n);
    (0..n)
        .map(|i| Rect::new(xs[i], monitor.y, (xs[i + 1] - xs[i]) as u32, monitor.height))
        .collect()
}
