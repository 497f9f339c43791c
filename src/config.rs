//! Window manager configurations.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::actions::{Action, CycleDir, Side};
use crate::input;
use crate::layout::TilePattern;
use crate::prelude::*;

/// Key + Modifiers for a window manager action.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeyBind {
    pub action: Action,
    pub bind: input::Key,
    pub modifiers: Vec<input::ModifierMask>,
}

impl KeyBind {
    pub fn get_mask(&self) -> u32 {
        let mut mask = 0;
        for modifier in &self.modifiers {
            mask |= u32::from(*modifier);
        }
        mask
    }
}

/// Button + Modifiers for a window manager action.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MouseBind {
    pub action: Action,
    pub bind: input::Button,
    pub modifiers: Vec<input::ModifierMask>,
}

impl MouseBind {
    pub fn get_mask(&self) -> u32 {
        let mut mask = 0;
        for modifier in &self.modifiers {
            mask |= u32::from(*modifier);
        }
        mask
    }
}

/// Focus frame colors.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FrameConfig {
    /// Frame thickness in pixels.
    pub thickness: u32,
    /// Pixel value for the normal frame.
    pub color: u64,
    /// Pixel value for priority-class windows.
    pub special_color: u64,
}

/// Window Manager options.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Number of virtual screens.
    pub max_vscreen: usize,
    /// Updates below this width are discarded.
    pub window_min_width: u32,
    /// Updates below this height are discarded.
    pub window_min_height: u32,
    /// Minimum milliseconds between applied drag updates.
    pub drag_interval_ms: u64,
    /// Pointer offset from a window's origin after tiling.
    pub pointer_warp_offset: i32,
    /// Window class pulled into a layout's primary slot and decorated with
    /// the special palette. Matched case-insensitively as a substring.
    pub priority_class: Option<String>,
    pub frame: FrameConfig,
    pub keybinds: Vec<KeyBind>,
    pub mousebinds: Vec<MouseBind>,
}

impl Config {
    /// Read a configuration from a JSON file.
    pub fn load(path: &Path) -> XdumonResult<Self> {
        let mut config_file = std::fs::File::open(path)?;
        let mut config_string = String::new();
        config_file.read_to_string(&mut config_string)?;

        debug!("Parsed configuration file [{:#x?}]", path);

        Ok(serde_json::from_str(&config_string[..])?)
    }

    /// Find the action bound to a key press.
    pub fn key_action(&self, keysym: u32, state: u32) -> Option<&Action> {
        self.keybinds
            .iter()
            .find(|b| u32::from(b.bind) == keysym && b.get_mask() == state)
            .map(|b| &b.action)
    }

    /// Find the action bound to a button press.
    pub fn button_action(&self, button: u32, state: u32) -> Option<&Action> {
        self.mousebinds
            .iter()
            .find(|b| u32::from(b.bind) == button && b.get_mask() == state)
            .map(|b| &b.action)
    }
}

impl Default for Config {
    fn default() -> Self {
        use input::Key;
        use input::ModifierMask::{Control, Mod1, Shift};

        let alt_ctrl = || vec![Mod1, Control];

        let keybinds = vec![
            KeyBind {
                action: Action::FocusNext(CycleDir::Forward),
                bind: Key::I,
                modifiers: alt_ctrl(),
            },
            KeyBind {
                action: Action::Spawn("urxvt &".into()),
                bind: Key::Num1,
                modifiers: alt_ctrl(),
            },
            KeyBind {
                action: Action::Spawn("emacs &".into()),
                bind: Key::Num2,
                modifiers: alt_ctrl(),
            },
            KeyBind {
                action: Action::Spawn("google-chrome &".into()),
                bind: Key::Num3,
                modifiers: alt_ctrl(),
            },
            KeyBind {
                action: Action::HalveWindow(Side::Left),
                bind: Key::H,
                modifiers: alt_ctrl(),
            },
            KeyBind {
                action: Action::HalveWindow(Side::Right),
                bind: Key::L,
                modifiers: alt_ctrl(),
            },
            KeyBind {
                action: Action::HalveWindow(Side::Upper),
                bind: Key::K,
                modifiers: alt_ctrl(),
            },
            KeyBind {
                action: Action::HalveWindow(Side::Lower),
                bind: Key::J,
                modifiers: alt_ctrl(),
            },
            KeyBind {
                action: Action::MoveWindowToNextMonitor,
                bind: Key::N,
                modifiers: alt_ctrl(),
            },
            KeyBind {
                action: Action::SelectVscreen(0),
                bind: Key::F1,
                modifiers: vec![Mod1],
            },
            KeyBind {
                action: Action::SelectVscreen(1),
                bind: Key::F2,
                modifiers: vec![Mod1],
            },
            KeyBind {
                action: Action::SelectVscreen(2),
                bind: Key::F3,
                modifiers: vec![Mod1],
            },
            KeyBind {
                action: Action::SelectVscreen(3),
                bind: Key::F4,
                modifiers: vec![Mod1],
            },
            KeyBind {
                action: Action::SendWindowToVscreen(CycleDir::Forward),
                bind: Key::D,
                modifiers: alt_ctrl(),
            },
            KeyBind {
                action: Action::SendWindowToVscreen(CycleDir::Backward),
                bind: Key::A,
                modifiers: alt_ctrl(),
            },
            KeyBind {
                action: Action::TileWindows(TilePattern::Grid),
                bind: Key::T,
                modifiers: alt_ctrl(),
            },
            KeyBind {
                action: Action::TileWindows(TilePattern::Horizontal),
                bind: Key::H,
                modifiers: vec![Mod1, Shift],
            },
            KeyBind {
                action: Action::TileWindows(TilePattern::Vertical),
                bind: Key::V,
                modifiers: vec![Mod1, Shift],
            },
        ];

        let mousebinds = vec![
            MouseBind {
                action: Action::WindowMove,
                bind: input::Button::Left,
                modifiers: vec![Mod1],
            },
            MouseBind {
                action: Action::WindowResize,
                bind: input::Button::Right,
                modifiers: vec![Mod1],
            },
        ];

        Self {
            max_vscreen: 4,
            window_min_width: 1920 / 8,
            window_min_height: 1280 / 8,
            drag_interval_ms: 1000 / 60,
            pointer_warp_offset: 30,
            priority_class: Some("emacs".to_owned()),
            frame: FrameConfig {
                thickness: 2,
                color: 0x004f_94cd,   // SteelBlue3
                special_color: 0x00ff_a500, // orange
            },
            keybinds,
            mousebinds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrips_through_json() {
        let config = Config::default();
        let serialized = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed.keybinds.len(), config.keybinds.len());
        assert_eq!(parsed.max_vscreen, 4);
    }

    #[test]
    fn key_lookup_requires_exact_modifier_mask() {
        let config = Config::default();
        let keysym = u32::from(input::Key::T);
        let mask = u32::from(input::ModifierMask::Mod1) | u32::from(input::ModifierMask::Control);

        assert_eq!(
            config.key_action(keysym, mask),
            Some(&Action::TileWindows(TilePattern::Grid))
        );
        assert_eq!(config.key_action(keysym, 0), None);
    }

    #[test]
    fn same_key_with_different_modifiers_resolves_differently() {
        let config = Config::default();
        let keysym = u32::from(input::Key::H);
        let alt_ctrl =
            u32::from(input::ModifierMask::Mod1) | u32::from(input::ModifierMask::Control);
        let alt_shift =
            u32::from(input::ModifierMask::Mod1) | u32::from(input::ModifierMask::Shift);

        assert_eq!(
            config.key_action(keysym, alt_ctrl),
            Some(&Action::HalveWindow(Side::Left))
        );
        assert_eq!(
            config.key_action(keysym, alt_shift),
            Some(&Action::TileWindows(TilePattern::Horizontal))
        );
    }
}
