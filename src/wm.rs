//! Window manager implementation.
//!
//! [`WindowManager`] is the single context object owning all mutable state:
//! the monitor and client registries, the active virtual screen, the focused
//! window and the drag session. Events and actions are processed one at a
//! time; nothing here suspends mid-handler.

use std::time::{Duration, Instant};

use crate::actions::{Action, CycleDir, Side};
use crate::client::{Client, ClientRegistry};
use crate::config::Config;
use crate::display::{DisplayControl, EventSource, GeometryUpdate, WindowId};
use crate::drag::{DragSession, Gesture, SizeLimits};
use crate::event::Event;
use crate::focus::FrameGeometry;
use crate::geometry::{scale_between, Rect};
use crate::layout::TilePattern;
use crate::monitor::MonitorRegistry;
use crate::prelude::*;

/// The window manager itself.
pub struct WindowManager<D: DisplayControl> {
    display: D,
    config: Config,
    monitors: MonitorRegistry,
    clients: ClientRegistry,
    current_vscreen: usize,
    focused: Option<WindowId>,
    drag: Option<DragSession>,
}

impl<D: DisplayControl> WindowManager<D> {
    pub fn new(display: D, config: Config) -> Self {
        let mut wm = Self {
            display,
            config,
            monitors: MonitorRegistry::new(),
            clients: ClientRegistry::new(),
            current_vscreen: 0,
            focused: None,
            drag: None,
        };

        wm.refresh_monitors();
        if wm.monitors.is_empty() {
            error!("No monitors detected");
        }
        wm
    }

    /// Runs the event loop.
    pub fn run(&mut self)
    where
        D: EventSource,
    {
        info!("Entering event loop");
        loop {
            let event = self.display.next_event();
            self.handle_event(event);
        }
    }

    /// Dispatch one inbound event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::WindowMapped(window) => self.manage_window(window),
            Event::WindowDestroyed(window) => self.unmanage_window(window),
            Event::ButtonPressed {
                window,
                button,
                state,
                root_x,
                root_y,
            } => self.on_button_press(window, button, state, root_x, root_y),
            Event::ButtonReleased { .. } => self.on_button_release(),
            Event::PointerMoved { root_x, root_y } => {
                self.pointer_motion_at(root_x, root_y, Instant::now());
            }
            Event::KeyPressed { keysym, state } => self.on_key_press(keysym, state),
            _ => {}
        }
    }

    /// Re-probe the hardware for monitors. An empty probe keeps the
    /// previous set.
    pub fn refresh_monitors(&mut self) {
        let probed = self.display.probe_monitors();
        self.monitors.refresh(probed);
    }

    // Window lifetime
    // ---------------

    /// Take responsibility for a newly mapped window.
    fn manage_window(&mut self, window: WindowId) {
        if self.clients.contains(window) {
            return;
        }

        let attrs = match self.display.query_attributes(window) {
            Some(attrs) => attrs,
            None => return,
        };
        if attrs.override_redirect {
            trace!("Not managing override-redirect window {}", window);
            return;
        }

        let rect = match self.display.query_geometry(window) {
            Some(rect) => rect,
            None => return,
        };

        let monitor = self.monitors.best_monitor_for(&rect).unwrap_or(0);
        let special = self.matches_priority_class(attrs.class.as_deref());

        self.clients.register(
            window,
            Client {
                monitor,
                vscreen: self.current_vscreen,
                special,
            },
        );
        self.clients.set_visible(window, true);
        self.display.show(window);

        debug!("Managing window {} on monitor {}", window, monitor);
    }

    /// Drop a destroyed window from every index before returning.
    fn unmanage_window(&mut self, window: WindowId) {
        if self.drag.as_ref().map(|d| d.window()) == Some(window) {
            self.drag = None;
        }
        if self.focused == Some(window) {
            self.clear_focus();
        }
        if self.clients.unregister(window).is_some() {
            debug!("Unmanaged window {}", window);
        }
    }

    // Pointer gestures
    // ----------------

    fn on_button_press(&mut self, window: WindowId, button: u32, state: u32, root_x: i32, root_y: i32) {
        // A second press while a gesture is armed keeps the original
        // session's anchor.
        if self.drag.is_some() {
            trace!("Ignoring button press during an active gesture");
            return;
        }
        if !self.clients.is_visible(window) {
            return;
        }

        self.focus_window(window);

        let gesture = match self.config.button_action(button, state) {
            Some(Action::WindowMove) => Gesture::Move,
            Some(Action::WindowResize) => Gesture::Resize,
            _ => return,
        };

        let rect = match self.display.query_geometry(window) {
            Some(rect) => rect,
            None => return,
        };

        self.drag = Some(DragSession::new(
            window,
            gesture,
            (root_x, root_y),
            rect,
            Instant::now(),
        ));
    }

    fn on_button_release(&mut self) {
        let session = match self.drag.take() {
            Some(session) => session,
            None => return,
        };

        let (window, gesture, target) = session.release(self.size_limits());
        if let Some(rect) = target {
            self.display.apply_geometry(window, Self::gesture_update(gesture, rect));
        }

        // The drag may have crossed onto another monitor.
        if let Some(rect) = self.display.query_geometry(window) {
            if let Some(best) = self.monitors.best_monitor_for(&rect) {
                if let Some(client) = self.clients.get_mut(window) {
                    client.monitor = best;
                }
            }
        }

        if self.focused == Some(window) {
            self.redraw_frame(window);
        }
    }

    /// Apply a motion event to the armed gesture, if any. Updates are
    /// throttled by the configured drag interval.
    pub fn pointer_motion_at(&mut self, root_x: i32, root_y: i32, now: Instant) {
        let limits = self.size_limits();
        let interval = Duration::from_millis(self.config.drag_interval_ms);

        let (window, gesture, target) = match self.drag.as_mut() {
            Some(session) => (
                session.window(),
                session.gesture(),
                session.motion((root_x, root_y), now, interval, limits),
            ),
            None => return,
        };

        if let Some(rect) = target {
            self.display.apply_geometry(window, Self::gesture_update(gesture, rect));
            if self.focused == Some(window) {
                self.redraw_frame(window);
            }
        }
    }

    /// One configure call per axis group: moves touch position only,
    /// resizes touch size only.
    fn gesture_update(gesture: Gesture, rect: Rect) -> GeometryUpdate {
        match gesture {
            Gesture::Move => GeometryUpdate::position(rect.x, rect.y),
            Gesture::Resize => GeometryUpdate::size(rect.width, rect.height),
        }
    }

    // Key bindings
    // ------------

    fn on_key_press(&mut self, keysym: u32, state: u32) {
        let action = self.config.key_action(keysym, state).cloned();
        if let Some(action) = action {
            trace!("Key press resolved to {:?}", action);
            self.handle_action(&action);
        }
    }

    /// Execute one action.
    pub fn handle_action(&mut self, action: &Action) {
        match action {
            Action::FocusNext(dir) => self.focus_next(*dir),
            Action::TileWindows(pattern) => self.tile_windows(*pattern),
            Action::SelectVscreen(index) => self.select_vscreen(*index),
            Action::SendWindowToVscreen(dir) => self.send_window_to_vscreen(*dir),
            Action::MoveWindowToNextMonitor => self.move_window_to_next_monitor(),
            Action::HalveWindow(side) => self.halve_window(*side),
            Action::Spawn(command) => spawn(command),
            // Mouse-only actions; meaningless without a button press.
            Action::WindowMove | Action::WindowResize => {}
        }
    }

    // Focus
    // -----

    /// Focus a window: raise it, take input focus, redraw the frame.
    /// No-op for windows that are not currently visible.
    pub fn focus_window(&mut self, window: WindowId) {
        if !self.clients.is_visible(window) {
            return;
        }

        self.display.raise_and_focus(window);
        self.focused = Some(window);
        self.redraw_frame(window);
    }

    fn clear_focus(&mut self) {
        self.focused = None;
        self.display.hide_frame();
    }

    /// Cycle focus through the visible windows in identity order.
    fn focus_next(&mut self, dir: CycleDir) {
        let visible = self.clients.visible_ids();
        if visible.is_empty() {
            return;
        }

        let next = match self.focused.and_then(|f| visible.iter().position(|w| *w == f)) {
            Some(pos) => {
                (pos as i64 + dir.delta()).rem_euclid(visible.len() as i64) as usize
            }
            None => 0,
        };

        self.focus_window(visible[next]);
    }

    fn redraw_frame(&mut self, window: WindowId) {
        let rect = match self.display.query_geometry(window) {
            Some(rect) => rect,
            None => return,
        };

        let special = self.clients.get(window).map(|c| c.special).unwrap_or(false);
        let color = if special {
            self.config.frame.special_color
        } else {
            self.config.frame.color
        };

        let frame = FrameGeometry::around(&rect, self.config.frame.thickness, color);
        self.display.show_frame(&frame);
    }

    // Virtual screens
    // ---------------

    /// Switch the active virtual screen, showing and hiding every managed
    /// window accordingly. Out-of-range indices are ignored.
    fn select_vscreen(&mut self, index: usize) {
        if index >= self.config.max_vscreen {
            debug!("Ignoring out-of-range virtual screen {}", index);
            return;
        }

        info!("Switching to virtual screen {}", index);
        self.current_vscreen = index;

        for window in self.clients.ids() {
            let on_screen = self.clients.get(window).map(|c| c.vscreen == index) == Some(true);
            self.clients.set_visible(window, on_screen);
            if on_screen {
                self.display.show(window);
            } else {
                self.display.hide(window);
            }
        }

        // The focused window may have just been hidden.
        if let Some(focused) = self.focused {
            if !self.clients.is_visible(focused) {
                self.clear_focus();
            }
        }
    }

    /// Move the focused window to an adjacent virtual screen. The window
    /// stays visible until the next switch.
    fn send_window_to_vscreen(&mut self, dir: CycleDir) {
        let window = match self.focused {
            Some(window) => window,
            None => return,
        };
        if !self.clients.is_visible(window) {
            return;
        }

        let max = self.config.max_vscreen as i64;
        if let Some(client) = self.clients.get_mut(window) {
            client.vscreen = (client.vscreen as i64 + dir.delta()).rem_euclid(max) as usize;
            debug!("Window {} now on virtual screen {}", window, client.vscreen);
        }
    }

    // Monitors
    // --------

    /// Move the focused window to the next monitor, rescaling its geometry
    /// into the target monitor's coordinate space.
    fn move_window_to_next_monitor(&mut self) {
        let window = match self.focused {
            Some(window) => window,
            None => return,
        };
        let current = match self.clients.get(window) {
            Some(client) => client.monitor,
            None => return,
        };
        let next = match self.monitors.next_monitor(current) {
            Some(next) if next != current => next,
            _ => return,
        };

        let from = match self.monitors.get(current) {
            Some(monitor) => monitor.rect,
            None => return,
        };
        let to = match self.monitors.get(next) {
            Some(monitor) => monitor.rect,
            None => return,
        };
        let rect = match self.display.query_geometry(window) {
            Some(rect) => rect,
            None => return,
        };

        let scaled = scale_between(&rect, &from, &to);
        self.display.apply_geometry(window, GeometryUpdate::rect(scaled));
        if let Some(client) = self.clients.get_mut(window) {
            client.monitor = next;
        }
        self.redraw_frame(window);
    }

    // Window geometry operations
    // --------------------------

    /// Shrink the focused window to the named half of its rectangle.
    /// Updates violating the minimum size are discarded.
    fn halve_window(&mut self, side: Side) {
        let window = match self.focused {
            Some(window) => window,
            None => return,
        };
        let rect = match self.display.query_geometry(window) {
            Some(rect) => rect,
            None => return,
        };

        let half_w = rect.width / 2;
        let half_h = rect.height / 2;
        let target = match side {
            Side::Left => Rect::new(rect.x, rect.y, half_w, rect.height),
            Side::Right => Rect::new(rect.x + half_w as i32, rect.y, rect.width - half_w, rect.height),
            Side::Upper => Rect::new(rect.x, rect.y, rect.width, half_h),
            Side::Lower => Rect::new(rect.x, rect.y + half_h as i32, rect.width, rect.height - half_h),
        };

        let limits = self.size_limits();
        if target.width <= limits.min_width || target.height <= limits.min_height {
            return;
        }

        self.display.apply_geometry(window, GeometryUpdate::rect(target));
        self.redraw_frame(window);
    }

    // Tiling
    // ------

    /// Tile the focused window's monitor with the given pattern, then warp
    /// the pointer into the focused window.
    fn tile_windows(&mut self, pattern: TilePattern) {
        let reference = match self.focused {
            Some(window) => window,
            None => return,
        };
        let monitor = match self.clients.get(reference) {
            Some(client) => client.monitor,
            None => return,
        };
        let monitor_rect = match self.monitors.get(monitor) {
            Some(monitor) => monitor.rect,
            None => return,
        };

        let mut windows = self.clients.visible_on_monitor(monitor);
        if windows.is_empty() {
            return;
        }

        // Pull the priority window into the primary slot.
        let priority = windows
            .iter()
            .position(|w| self.clients.get(*w).map(|c| c.special) == Some(true));
        if let Some(pos) = priority {
            let slot = pattern.priority_slot(windows.len());
            windows.swap(pos, slot);
        }

        let cells = pattern.cells(&monitor_rect, windows.len());
        for (window, cell) in windows.iter().zip(cells.iter()) {
            self.display.apply_geometry(*window, GeometryUpdate::rect(*cell));
        }

        debug!("Tiled {} windows as {:?} on monitor {}", windows.len(), pattern, monitor);

        let offset = self.config.pointer_warp_offset;
        self.display.warp_pointer(reference, offset, offset);
        self.focus_window(reference);
    }

    // Helpers and inspection
    // ----------------------

    fn size_limits(&self) -> SizeLimits {
        SizeLimits {
            min_width: self.config.window_min_width,
            min_height: self.config.window_min_height,
        }
    }

    fn matches_priority_class(&self, class: Option<&str>) -> bool {
        match (&self.config.priority_class, class) {
            (Some(priority), Some(class)) => class
                .to_ascii_lowercase()
                .contains(&priority.to_ascii_lowercase()),
            _ => false,
        }
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    pub fn current_vscreen(&self) -> usize {
        self.current_vscreen
    }

    pub fn is_managed(&self, window: WindowId) -> bool {
        self.clients.contains(window)
    }

    pub fn is_visible(&self, window: WindowId) -> bool {
        self.clients.is_visible(window)
    }

    pub fn vscreen_of(&self, window: WindowId) -> Option<usize> {
        self.clients.get(window).map(|c| c.vscreen)
    }

    pub fn monitor_of(&self, window: WindowId) -> Option<usize> {
        self.clients.get(window).map(|c| c.monitor)
    }

    pub fn visible_windows(&self) -> Vec<WindowId> {
        self.clients.visible_ids()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}

/// Run an external command, detached. Failures are logged only.
fn spawn(command: &str) {
    match std::process::Command::new("sh").arg("-c").arg(command).spawn() {
        Ok(child) => debug!("Spawned `{}` as pid {}", command, child.id()),
        Err(e) => error!("Failed to spawn `{}`: {}", command, e),
    }
}
