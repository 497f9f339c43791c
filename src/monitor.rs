//! Monitor geometry tracking and selection.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::prelude::*;

/// A physical display, as a rectangle in the shared virtual coordinate space.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Monitor {
    pub name: String,
    pub rect: Rect,
}

impl Monitor {
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            name: name.into(),
            rect,
        }
    }
}

/// The set of currently known monitors, in registration order.
///
/// The set is rebuilt wholesale from each hardware probe. Windows reference
/// monitors by index; indices that no longer resolve fall back to the first
/// monitor.
#[derive(Debug, Default)]
pub struct MonitorRegistry {
    monitors: Vec<Monitor>,
}

impl MonitorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the monitor set with a fresh probe result.
    ///
    /// An empty probe is treated as a transient hardware failure: the
    /// previous set is retained.
    pub fn refresh(&mut self, probed: Vec<Monitor>) {
        if probed.is_empty() {
            warn!("Monitor probe returned nothing, keeping {} known monitors", self.len());
            return;
        }

        debug!("Monitor set: {:?}", probed);
        self.monitors = probed;
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Monitor> {
        self.monitors.iter()
    }

    /// Look up a monitor by index, falling back to the first monitor for
    /// stale indices (e.g. after a disconnect).
    pub fn get(&self, index: usize) -> Option<&Monitor> {
        self.monitors.get(index).or_else(|| self.monitors.first())
    }

    /// Index of the monitor best covering `rect`.
    ///
    /// Overlap is scored as `coverage * (coverage / monitor_area)` so that a
    /// small monitor fully behind a window does not outrank a large monitor
    /// showing most of it. Ties keep the earlier monitor. A rectangle
    /// overlapping nothing lands on the first monitor.
    pub fn best_monitor_for(&self, rect: &Rect) -> Option<usize> {
        if self.monitors.is_empty() {
            return None;
        }

        let mut best = 0;
        let mut best_score = f64::MIN;
        for (i, monitor) in self.monitors.iter().enumerate() {
            let coverage = monitor.rect.overlap_area(rect) as f64;
            let score = coverage * (coverage / monitor.rect.area() as f64);
            if score > best_score && coverage > 0.0 {
                best = i;
                best_score = score;
            }
        }

        Some(best)
    }

    /// Index of the cyclic successor of `current` in registration order.
    /// Unknown indices fall back to the first monitor.
    pub fn next_monitor(&self, current: usize) -> Option<usize> {
        if self.monitors.is_empty() {
            return None;
        }
        if current >= self.monitors.len() {
            return Some(0);
        }
        Some((current + 1) % self.monitors.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dual() -> MonitorRegistry {
        let mut registry = MonitorRegistry::new();
        registry.refresh(vec![
            Monitor::new("DP-1", Rect::new(0, 0, 1920, 1080)),
            Monitor::new("HDMI-1", Rect::new(1920, 0, 3840, 2160)),
        ]);
        registry
    }

    #[test]
    fn refresh_keeps_previous_set_on_empty_probe() {
        let mut registry = dual();
        registry.refresh(vec![]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn contained_window_picks_its_monitor_regardless_of_sizes() {
        let registry = dual();
        // Fully inside the small monitor; the large one never overlaps.
        let rect = Rect::new(100, 100, 600, 400);
        assert_eq!(registry.best_monitor_for(&rect), Some(0));

        // And the reverse.
        let rect = Rect::new(2000, 100, 600, 400);
        assert_eq!(registry.best_monitor_for(&rect), Some(1));
    }

    #[test]
    fn equal_overlap_prefers_higher_relative_coverage() {
        let mut registry = MonitorRegistry::new();
        registry.refresh(vec![
            Monitor::new("small", Rect::new(0, 0, 800, 600)),
            Monitor::new("large", Rect::new(800, 0, 3840, 2160)),
        ]);

        // 400x600 of overlap on each side of the seam. The raw areas tie;
        // the relative-coverage factor decides for the small monitor.
        let rect = Rect::new(400, 0, 800, 600);
        assert_eq!(registry.best_monitor_for(&rect), Some(0));
    }

    #[test]
    fn no_overlap_falls_back_to_first_monitor() {
        let registry = dual();
        let rect = Rect::new(-5000, -5000, 100, 100);
        assert_eq!(registry.best_monitor_for(&rect), Some(0));
    }

    #[test]
    fn next_monitor_cycles_in_registration_order() {
        let registry = dual();
        assert_eq!(registry.next_monitor(0), Some(1));
        assert_eq!(registry.next_monitor(1), Some(0));
        // Stale index falls back to the first monitor.
        assert_eq!(registry.next_monitor(7), Some(0));
    }

    #[test]
    fn stale_index_lookup_falls_back_to_first() {
        let registry = dual();
        assert_eq!(registry.get(5).map(|m| &m.name[..]), Some("DP-1"));
    }
}
