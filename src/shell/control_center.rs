use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};

use crate::state::ShellState;
use crate::theme::Theme;
use crate::ui::{UiFrame, safe_set_string};

/// Clickable targets inside the popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCenterHit {
    ToggleDarkMode,
    BrightnessDown,
    BrightnessUp,
}

/// Appearance popover anchored under the menu bar's right edge: a dark
/// mode toggle and a brightness stepper.
pub struct ControlCenter {
    panel: Rect,
    dark_rect: Rect,
    down_rect: Rect,
    up_rect: Rect,
}

impl ControlCenter {
    pub fn new() -> Self {
        Self {
            panel: Rect::default(),
            dark_rect: Rect::default(),
            down_rect: Rect::default(),
            up_rect: Rect::default(),
        }
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, bounds: Rect, theme: Theme, state: &ShellState) {
        let width = 30u16.min(bounds.width);
        let height = 6u16.min(bounds.height.saturating_sub(1));
        let panel = Rect {
            x: bounds.x + bounds.width.saturating_sub(width + 1),
            y: bounds.y + 1,
            width,
            height,
        };
        self.panel = panel;
        let panel_style = Style::default().bg(theme.menu_bg()).fg(theme.menu_fg());
        frame.fill(panel, panel_style);
        let buffer = frame.buffer_mut();

        safe_set_string(
            buffer,
            panel,
            panel.x + 2,
            panel.y + 1,
            "Control Center",
            panel_style.add_modifier(Modifier::BOLD),
        );

        let dark_label = if state.dark_mode() {
            "[x] Dark mode    (d)"
        } else {
            "[ ] Dark mode    (d)"
        };
        let dark_y = panel.y + 3;
        safe_set_string(buffer, panel, panel.x + 2, dark_y, dark_label, panel_style);
        self.dark_rect = Rect {
            x: panel.x,
            y: dark_y,
            width: panel.width,
            height: 1,
        };

        let bright_y = panel.y + 4;
        let steps = (state.brightness() / 10) as usize;
        let bar: String = "■".repeat(steps) + &"□".repeat(10usize.saturating_sub(steps));
        safe_set_string(
            buffer,
            panel,
            panel.x + 2,
            bright_y,
            &format!("☼ - {bar} +"),
            panel_style,
        );
        self.down_rect = Rect {
            x: panel.x + 4,
            y: bright_y,
            width: 1,
            height: 1,
        };
        self.up_rect = Rect {
            x: panel.x + 17,
            y: bright_y,
            width: 1,
            height: 1,
        };
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<ControlCenterHit> {
        let position = Position { x: column, y: row };
        if self.dark_rect.contains(position) {
            return Some(ControlCenterHit::ToggleDarkMode);
        }
        if self.down_rect.contains(position) {
            return Some(ControlCenterHit::BrightnessDown);
        }
        if self.up_rect.contains(position) {
            return Some(ControlCenterHit::BrightnessUp);
        }
        None
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.panel.contains(Position { x: column, y: row })
    }

    /// Keyboard path; returns whether the popover should close.
    pub fn handle_key(&mut self, key: &KeyEvent, state: &mut ShellState) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Char('d') => state.toggle_dark_mode(),
            KeyCode::Left => state.adjust_brightness(false),
            KeyCode::Right => state.adjust_brightness(true),
            _ => {}
        }
        false
    }
}

impl Default for ControlCenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::Preferences;
    use crossterm::event::KeyModifiers;
    use ratatui::buffer::Buffer;

    #[test]
    fn hits_map_to_controls_after_render() {
        let bounds = Rect {
            x: 0,
            y: 0,
            width: 120,
            height: 40,
        };
        let mut buf = Buffer::empty(bounds);
        let mut frame = UiFrame::from_parts(bounds, &mut buf);
        let mut cc = ControlCenter::new();
        let state = ShellState::new(Preferences::default());
        cc.render(&mut frame, bounds, Theme::Light, &state);

        assert_eq!(
            cc.hit_test(cc.dark_rect.x + 1, cc.dark_rect.y),
            Some(ControlCenterHit::ToggleDarkMode)
        );
        assert_eq!(
            cc.hit_test(cc.down_rect.x, cc.down_rect.y),
            Some(ControlCenterHit::BrightnessDown)
        );
        assert!(cc.contains(cc.panel.x, cc.panel.y));
        assert!(!cc.contains(0, 20));
    }

    #[test]
    fn keys_adjust_state_and_escape_closes() {
        let mut cc = ControlCenter::new();
        let mut state = ShellState::new(Preferences::default());
        let d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE);
        assert!(!cc.handle_key(&d, &mut state));
        assert!(state.dark_mode());
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert!(cc.handle_key(&esc, &mut state));
    }
}
