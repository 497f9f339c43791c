//! Pointer-driven move/resize gestures.
//!
//! A session is created on button press over a managed window and destroyed
//! on release. Motion updates are throttled to bound configure-request
//! frequency; the release always applies the final position regardless of
//! timing. At most one session exists at a time.

use std::time::{Duration, Instant};

use crate::display::WindowId;
use crate::geometry::Rect;

/// What the pointer delta is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Move,
    Resize,
}

/// Minimum window dimensions a resize must respect.
#[derive(Debug, Clone, Copy)]
pub struct SizeLimits {
    pub min_width: u32,
    pub min_height: u32,
}

/// State of one in-progress gesture.
#[derive(Debug)]
pub struct DragSession {
    window: WindowId,
    gesture: Gesture,
    anchor_pointer: (i32, i32),
    anchor_rect: Rect,
    last_pointer: (i32, i32),
    last_update: Instant,
}

impl DragSession {
    pub fn new(
        window: WindowId,
        gesture: Gesture,
        pointer: (i32, i32),
        rect: Rect,
        now: Instant,
    ) -> Self {
        Self {
            window,
            gesture,
            anchor_pointer: pointer,
            anchor_rect: rect,
            last_pointer: pointer,
            last_update: now,
        }
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Record a pointer motion. Returns the rectangle to apply, or `None`
    /// when the update is throttled or rejected.
    ///
    /// The pointer position is remembered even for skipped updates so the
    /// terminal release lands on the true final position.
    pub fn motion(
        &mut self,
        pointer: (i32, i32),
        now: Instant,
        interval: Duration,
        limits: SizeLimits,
    ) -> Option<Rect> {
        self.last_pointer = pointer;

        if now.duration_since(self.last_update) < interval {
            return None;
        }

        let target = self.target_rect(limits)?;
        self.last_update = now;
        Some(target)
    }

    /// Final rectangle on button release, bypassing the throttle.
    pub fn release(self, limits: SizeLimits) -> (WindowId, Gesture, Option<Rect>) {
        let target = self.target_rect(limits);
        (self.window, self.gesture, target)
    }

    /// Rectangle for the current pointer position.
    ///
    /// A resize that would push either dimension to or below the configured
    /// minimum is rejected wholesale, leaving the previous geometry intact.
    fn target_rect(&self, limits: SizeLimits) -> Option<Rect> {
        let dx = i64::from(self.last_pointer.0 - self.anchor_pointer.0);
        let dy = i64::from(self.last_pointer.1 - self.anchor_pointer.1);

        match self.gesture {
            Gesture::Move => Some(Rect {
                x: self.anchor_rect.x + dx as i32,
                y: self.anchor_rect.y + dy as i32,
                ..self.anchor_rect
            }),
            Gesture::Resize => {
                let width = i64::from(self.anchor_rect.width) + dx;
                let height = i64::from(self.anchor_rect.height) + dy;
                if width <= i64::from(limits.min_width) || height <= i64::from(limits.min_height) {
                    return None;
                }
                Some(Rect {
                    width: width as u32,
                    height: height as u32,
                    ..self.anchor_rect
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: SizeLimits = SizeLimits {
        min_width: 240,
        min_height: 160,
    };
    const INTERVAL: Duration = Duration::from_millis(16);

    fn session(gesture: Gesture, now: Instant) -> DragSession {
        DragSession::new(
            WindowId(1),
            gesture,
            (500, 500),
            Rect::new(100, 100, 400, 300),
            now,
        )
    }

    #[test]
    fn move_applies_pointer_delta_to_anchor_position() {
        let start = Instant::now();
        let mut session = session(Gesture::Move, start);

        let rect = session
            .motion((530, 480), start + INTERVAL, INTERVAL, LIMITS)
            .unwrap();
        assert_eq!(rect, Rect::new(130, 80, 400, 300));
    }

    #[test]
    fn move_is_unconstrained_off_screen() {
        let start = Instant::now();
        let mut session = session(Gesture::Move, start);

        let rect = session
            .motion((-1000, -1000), start + INTERVAL, INTERVAL, LIMITS)
            .unwrap();
        assert_eq!(rect.x, 100 - 1500);
        assert_eq!(rect.y, 100 - 1500);
    }

    #[test]
    fn resize_applies_pointer_delta_to_anchor_size() {
        let start = Instant::now();
        let mut session = session(Gesture::Resize, start);

        let rect = session
            .motion((600, 550), start + INTERVAL, INTERVAL, LIMITS)
            .unwrap();
        assert_eq!(rect, Rect::new(100, 100, 500, 350));
    }

    #[test]
    fn resize_at_or_below_minimum_is_rejected() {
        let start = Instant::now();
        let mut session = session(Gesture::Resize, start);

        // Width would land exactly on the minimum: rejected.
        let at_min = session.motion(
            (500 - (400 - 240), 500),
            start + INTERVAL,
            INTERVAL,
            LIMITS,
        );
        assert_eq!(at_min, None);

        // One violating dimension blocks the whole update.
        let tall_enough = session.motion(
            (500 - 300, 500 + 100),
            start + 2 * INTERVAL,
            INTERVAL,
            LIMITS,
        );
        assert_eq!(tall_enough, None);
    }

    #[test]
    fn motions_within_the_interval_are_throttled() {
        let start = Instant::now();
        let mut session = session(Gesture::Move, start);

        assert!(session
            .motion((510, 510), start + Duration::from_millis(5), INTERVAL, LIMITS)
            .is_none());

        // The next update past the interval includes the skipped delta.
        let rect = session
            .motion((520, 520), start + INTERVAL, INTERVAL, LIMITS)
            .unwrap();
        assert_eq!(rect, Rect::new(120, 120, 400, 300));
    }

    #[test]
    fn release_applies_the_final_position_despite_throttling() {
        let start = Instant::now();
        let mut session = session(Gesture::Move, start);

        // Throttled, but remembered.
        session.motion((700, 700), start + Duration::from_millis(1), INTERVAL, LIMITS);

        let (window, _, rect) = session.release(LIMITS);
        assert_eq!(window, WindowId(1));
        assert_eq!(rect, Some(Rect::new(300, 300, 400, 300)));
    }

    #[test]
    fn release_of_an_undersized_resize_keeps_previous_geometry() {
        let start = Instant::now();
        let mut session = session(Gesture::Resize, start);

        session.motion((0, 0), start + Duration::from_millis(1), INTERVAL, LIMITS);
        let (_, _, rect) = session.release(LIMITS);
        assert_eq!(rect, None);
    }
}
