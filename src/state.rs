use crate::prefs::Preferences;

/// Brightness is a percentage; values at or below this render the frame
/// dimmed.
pub const DIM_BRIGHTNESS_THRESHOLD: u8 = 40;

const BRIGHTNESS_MIN: u8 = 10;
const BRIGHTNESS_MAX: u8 = 100;
pub const BRIGHTNESS_STEP: u8 = 10;

/// Shell-level appearance state shared by every screen.
///
/// Mutations mark the state dirty; the session drains the flag once per
/// frame and persists the preferences when it was set.
#[derive(Debug, Clone, Copy)]
pub struct ShellState {
    dark_mode: bool,
    brightness: u8,
    dirty: bool,
}

impl ShellState {
    pub fn new(prefs: Preferences) -> Self {
        Self {
            dark_mode: prefs.dark_mode,
            brightness: prefs.brightness.clamp(BRIGHTNESS_MIN, BRIGHTNESS_MAX),
            dirty: false,
        }
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, dark: bool) {
        if self.dark_mode == dark {
            return;
        }
        self.dark_mode = dark;
        self.dirty = true;
    }

    pub fn toggle_dark_mode(&mut self) {
        let dark = !self.dark_mode;
        self.set_dark_mode(dark);
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn set_brightness(&mut self, value: u8) {
        let value = value.clamp(BRIGHTNESS_MIN, BRIGHTNESS_MAX);
        if self.brightness == value {
            return;
        }
        self.brightness = value;
        self.dirty = true;
    }

    pub fn adjust_brightness(&mut self, up: bool) {
        let next = if up {
            self.brightness.saturating_add(BRIGHTNESS_STEP)
        } else {
            self.brightness.saturating_sub(BRIGHTNESS_STEP)
        };
        self.set_brightness(next);
    }

    pub fn dimmed(&self) -> bool {
        self.brightness <= DIM_BRIGHTNESS_THRESHOLD
    }

    /// Returns the preferences to persist if anything changed since the
    /// last call, consuming the dirty flag.
    pub fn take_prefs_change(&mut self) -> Option<Preferences> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(self.preferences())
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            dark_mode: self.dark_mode,
            brightness: self.brightness,
        }
    }
}
