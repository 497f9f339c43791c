//! X11 implementation of the display boundary, via `x11-dl`.

#![allow(clippy::missing_safety_doc)]

use std::os::raw::{c_int, c_uint, c_ulong};

use x11_dl::xinerama;
use x11_dl::xlib;

use crate::config::Config;
use crate::display::{DisplayControl, EventSource, GeometryUpdate, WindowAttributes, WindowId};
use crate::event::Event;
use crate::focus::FrameGeometry;
use crate::geometry::Rect;
use crate::monitor::Monitor;
use crate::prelude::*;

/// Occurs if another WM is running.
extern "C" fn on_startup_error(_display: *mut xlib::Display, error: *mut xlib::XErrorEvent) -> i32 {
    let error = unsafe { *error };
    error!("X Error [{}] - {}", error.type_, error.error_code);
    std::process::exit(-1);
}

/// Occurs when the X server raises an error. Windows routinely vanish
/// between event read and command issue, so these are logged and dropped.
extern "C" fn on_x_error(_display: *mut xlib::Display, error: *mut xlib::XErrorEvent) -> i32 {
    let error = unsafe { *error };
    debug!("X Error [{}] - {}", error.type_, error.error_code);
    1
}

/// Safe wrapper around a connection to the X server.
pub struct DisplayManager {
    /// X context
    xlib: xlib::Xlib,
    /// Xinerama extension, when available.
    xinerama: Option<xinerama::Xlib>,
    /// Connection to the server
    display: *mut xlib::_XDisplay,
    /// Root window
    root: c_ulong,
    /// The four focus frame bars, created lazily.
    frames: Option<[c_ulong; 4]>,
}

impl DisplayManager {
    /// Open a connection to the X server.
    pub fn open() -> XdumonResult<Self> {
        let xl = xlib::Xlib::open().map_err(|_| Error::Display("could not load xlib"))?;
        let display = unsafe { (xl.XOpenDisplay)(std::ptr::null()) };

        if display.is_null() {
            return Err(Error::Display("could not connect to the X server"));
        }

        info!("Connected to X server");

        let root = unsafe { (xl.XDefaultRootWindow)(display) };
        let xin = xinerama::Xlib::open().ok();
        if xin.is_none() {
            warn!("Xinerama unavailable, multi-monitor probing disabled");
        }

        Ok(Self {
            xlib: xl,
            xinerama: xin,
            display,
            root,
            frames: None,
        })
    }

    /// Initialize the root window and grab the configured bindings.
    pub fn init(&mut self, config: &Config) {
        unsafe {
            // WM check
            (self.xlib.XSetErrorHandler)(Some(on_startup_error));

            // Substructure redirection allows the WM to intercept map and
            // configure requests for the root's children.
            (self.xlib.XSelectInput)(
                self.display,
                self.root,
                xlib::SubstructureRedirectMask | xlib::SubstructureNotifyMask,
            );

            self.flush();

            (self.xlib.XSetErrorHandler)(Some(on_x_error));
        }

        for bind in &config.keybinds {
            self.grab_key(u32::from(bind.bind), bind.get_mask());
        }
        for bind in &config.mousebinds {
            self.grab_button(u32::from(bind.bind), bind.get_mask());
        }
        self.flush();

        debug!("Initialized root window");
    }

    /// Flush the X command queue.
    fn flush(&self) {
        unsafe { (self.xlib.XSync)(self.display, xlib::False) };
    }

    /// Passively grab a keyboard key on the root window.
    fn grab_key(&self, keysym: u32, modifiers: u32) {
        unsafe {
            let keycode = (self.xlib.XKeysymToKeycode)(self.display, keysym as c_ulong);
            if keycode == 0 {
                warn!("No keycode for keysym {:#x}, binding skipped", keysym);
                return;
            }
            (self.xlib.XGrabKey)(
                self.display,
                c_int::from(keycode),
                modifiers,
                self.root,
                1, // owner events
                xlib::GrabModeAsync,
                xlib::GrabModeAsync,
            );
        }
    }

    /// Passively grab a mouse button on the root window.
    fn grab_button(&self, button: u32, modifiers: u32) {
        unsafe {
            (self.xlib.XGrabButton)(
                self.display,
                button,
                modifiers,
                self.root,
                0, // owner events
                (xlib::ButtonPressMask | xlib::ButtonReleaseMask | xlib::PointerMotionMask) as c_uint,
                xlib::GrabModeAsync,
                xlib::GrabModeAsync,
                0, // confine pointer to window
                0, // cursor to display
            );
        }
    }

    /// Top-level windows that are already mapped and eligible for adoption.
    pub fn existing_windows(&mut self) -> Vec<WindowId> {
        let children = unsafe {
            (self.xlib.XGrabServer)(self.display);

            let mut returned_root: c_ulong = 0;
            let mut returned_parent: c_ulong = 0;
            let mut num_windows: c_uint = 0;
            let mut window_list: *mut c_ulong = std::ptr::null_mut();

            let status = (self.xlib.XQueryTree)(
                self.display,
                self.root,
                &mut returned_root,
                &mut returned_parent,
                &mut window_list,
                &mut num_windows,
            );

            let children = if status != 0 && !window_list.is_null() {
                let list = std::slice::from_raw_parts(window_list, num_windows as usize).to_owned();
                (self.xlib.XFree)(window_list as *mut _);
                list
            } else {
                vec![]
            };

            (self.xlib.XUngrabServer)(self.display);
            children
        };

        children
            .into_iter()
            .map(WindowId)
            .filter(|w| {
                self.raw_attributes(*w)
                    .map(|a| a.map_state == xlib::IsViewable && a.override_redirect == 0)
                    .unwrap_or(false)
            })
            .collect()
    }

    fn raw_attributes(&self, window: WindowId) -> Option<xlib::XWindowAttributes> {
        let mut attrs: xlib::XWindowAttributes = unsafe { std::mem::zeroed() };
        let status =
            unsafe { (self.xlib.XGetWindowAttributes)(self.display, window.0, &mut attrs) };
        if status == 0 {
            return None;
        }
        Some(attrs)
    }

    /// WM_CLASS of a window: the instance name and class name.
    fn class_hint(&self, window: WindowId) -> Option<String> {
        unsafe {
            let mut hint: xlib::XClassHint = std::mem::zeroed();
            if (self.xlib.XGetClassHint)(self.display, window.0, &mut hint) == 0 {
                return None;
            }

            let mut parts = vec![];
            for ptr in &[hint.res_name, hint.res_class] {
                if !ptr.is_null() {
                    parts.push(
                        std::ffi::CStr::from_ptr(*ptr)
                            .to_string_lossy()
                            .into_owned(),
                    );
                    (self.xlib.XFree)(*ptr as *mut _);
                }
            }

            if parts.is_empty() {
                None
            } else {
                Some(parts.join("."))
            }
        }
    }

    fn frame_windows(&mut self) -> [c_ulong; 4] {
        if let Some(frames) = self.frames {
            return frames;
        }

        let mut frames = [0; 4];
        unsafe {
            for frame in frames.iter_mut() {
                *frame = (self.xlib.XCreateSimpleWindow)(
                    self.display,
                    self.root,
                    0,
                    0,
                    1,
                    1,
                    0, // border width
                    0, // border color
                    0, // background color
                );

                // The frame bars must escape our own substructure
                // redirection.
                let mut attrs: xlib::XSetWindowAttributes = std::mem::zeroed();
                attrs.override_redirect = 1;
                (self.xlib.XChangeWindowAttributes)(
                    self.display,
                    *frame,
                    xlib::CWOverrideRedirect,
                    &mut attrs,
                );
            }
        }

        debug!("Created frame windows {:?}", frames);
        self.frames = Some(frames);
        frames
    }

    fn convert(&self, event: xlib::XEvent) -> Event {
        match event.get_type() {
            xlib::MapRequest => Event::WindowMapped(WindowId(unsafe { event.map_request }.window)),
            xlib::DestroyNotify => {
                Event::WindowDestroyed(WindowId(unsafe { event.destroy_window }.window))
            }
            xlib::ButtonPress => {
                let e = unsafe { event.button };
                // Grabs on the root report the pressed child as subwindow.
                let window = if e.subwindow != 0 { e.subwindow } else { e.window };
                Event::ButtonPressed {
                    window: WindowId(window),
                    button: e.button,
                    state: e.state,
                    root_x: e.x_root,
                    root_y: e.y_root,
                }
            }
            xlib::ButtonRelease => {
                let e = unsafe { event.button };
                let window = if e.subwindow != 0 { e.subwindow } else { e.window };
                Event::ButtonReleased {
                    window: WindowId(window),
                }
            }
            xlib::MotionNotify => {
                let e = unsafe { event.motion };
                Event::PointerMoved {
                    root_x: e.x_root,
                    root_y: e.y_root,
                }
            }
            xlib::KeyPress => {
                let e = unsafe { event.key };
                let keysym = unsafe {
                    (self.xlib.XKeycodeToKeysym)(self.display, e.keycode as xlib::KeyCode, 0)
                };
                Event::KeyPressed {
                    keysym: keysym as u32,
                    state: e.state,
                }
            }
            _ => Event::Unknown,
        }
    }
}

impl EventSource for DisplayManager {
    fn next_event(&mut self) -> Event {
        self.flush();
        let mut raw: xlib::XEvent = unsafe { std::mem::zeroed() };
        unsafe { (self.xlib.XNextEvent)(self.display, &mut raw) };
        self.convert(raw)
    }
}

impl DisplayControl for DisplayManager {
    fn query_geometry(&mut self, window: WindowId) -> Option<Rect> {
        self.raw_attributes(window).map(|attrs| Rect {
            x: attrs.x,
            y: attrs.y,
            width: attrs.width as u32,
            height: attrs.height as u32,
        })
    }

    fn query_attributes(&mut self, window: WindowId) -> Option<WindowAttributes> {
        let attrs = self.raw_attributes(window)?;
        Some(WindowAttributes {
            override_redirect: attrs.override_redirect != 0,
            mapped: attrs.map_state == xlib::IsViewable,
            class: self.class_hint(window),
        })
    }

    fn apply_geometry(&mut self, window: WindowId, update: GeometryUpdate) {
        let mut changes: xlib::XWindowChanges = unsafe { std::mem::zeroed() };
        let mut mask = 0u64;

        if let Some(x) = update.x {
            changes.x = x;
            mask |= xlib::CWX as u64;
        }
        if let Some(y) = update.y {
            changes.y = y;
            mask |= xlib::CWY as u64;
        }
        if let Some(width) = update.width {
            changes.width = width as c_int;
            mask |= xlib::CWWidth as u64;
        }
        if let Some(height) = update.height {
            changes.height = height as c_int;
            mask |= xlib::CWHeight as u64;
        }

        if mask == 0 {
            return;
        }

        unsafe {
            (self.xlib.XConfigureWindow)(self.display, window.0, mask as c_uint, &mut changes);
        }
    }

    fn raise_and_focus(&mut self, window: WindowId) {
        unsafe {
            (self.xlib.XRaiseWindow)(self.display, window.0);
            (self.xlib.XSetInputFocus)(
                self.display,
                window.0,
                xlib::RevertToParent,
                xlib::CurrentTime,
            );
        }
    }

    fn show(&mut self, window: WindowId) {
        unsafe { (self.xlib.XMapWindow)(self.display, window.0) };
    }

    fn hide(&mut self, window: WindowId) {
        unsafe { (self.xlib.XUnmapWindow)(self.display, window.0) };
    }

    fn warp_pointer(&mut self, window: WindowId, x: i32, y: i32) {
        unsafe {
            (self.xlib.XWarpPointer)(self.display, 0, window.0, 0, 0, 0, 0, x, y);
        }
    }

    fn show_frame(&mut self, frame: &FrameGeometry) {
        let windows = self.frame_windows();
        let bars = [frame.left, frame.right, frame.top, frame.bottom];

        unsafe {
            for (window, bar) in windows.iter().zip(bars.iter()) {
                (self.xlib.XSetWindowBackground)(self.display, *window, frame.color as c_ulong);
                (self.xlib.XMoveResizeWindow)(
                    self.display,
                    *window,
                    bar.x,
                    bar.y,
                    bar.width.max(1),
                    bar.height.max(1),
                );
                (self.xlib.XClearWindow)(self.display, *window);
                (self.xlib.XMapRaised)(self.display, *window);
            }
        }
    }

    fn hide_frame(&mut self) {
        if let Some(frames) = self.frames {
            unsafe {
                for frame in &frames {
                    (self.xlib.XUnmapWindow)(self.display, *frame);
                }
            }
        }
    }

    fn probe_monitors(&mut self) -> Vec<Monitor> {
        if let Some(xin) = &self.xinerama {
            unsafe {
                if (xin.XineramaIsActive)(self.display) != 0 {
                    let mut count: c_int = 0;
                    let screens = (xin.XineramaQueryScreens)(self.display, &mut count);
                    if !screens.is_null() {
                        let monitors = std::slice::from_raw_parts(screens, count as usize)
                            .iter()
                            .map(|info| {
                                Monitor::new(
                                    format!("XINERAMA{}", info.screen_number),
                                    Rect::new(
                                        i32::from(info.x_org),
                                        i32::from(info.y_org),
                                        info.width as u32,
                                        info.height as u32,
                                    ),
                                )
                            })
                            .collect();
                        (self.xlib.XFree)(screens as *mut _);
                        return monitors;
                    }
                }
            }
        }

        // Single-screen fallback.
        unsafe {
            let screen = (self.xlib.XDefaultScreen)(self.display);
            let width = (self.xlib.XDisplayWidth)(self.display, screen);
            let height = (self.xlib.XDisplayHeight)(self.display, screen);
            vec![Monitor::new(
                "DEFAULT",
                Rect::new(0, 0, width as u32, height as u32),
            )]
        }
    }
}

impl Drop for DisplayManager {
    fn drop(&mut self) {
        unsafe { (self.xlib.XCloseDisplay)(self.display) };
    }
}
