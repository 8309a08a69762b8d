use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::theme::Theme;
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};

/// Session-level commands issued from the system menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemAction {
    Sleep,
    Restart,
    ShutDown,
    LogOut,
}

const MENU_ITEMS: [(&str, SystemAction); 4] = [
    ("Sleep", SystemAction::Sleep),
    ("Restart", SystemAction::Restart),
    ("Shut Down", SystemAction::ShutDown),
    ("Log Out", SystemAction::LogOut),
];

const MENU_TRIGGER: &str = " ⌘ term-desk ";
const SPOTLIGHT_TRIGGER: &str = " ⌕ ";
const CONTROL_CENTER_TRIGGER: &str = " ◧ ";

/// The top band: system menu on the left, the focused window's title
/// next to it, status cluster on the right. Hit rectangles are
/// re-registered on every render, panel style.
pub struct Menubar {
    menu_open: bool,
    menu_selected: usize,
    menu_trigger_rect: Option<Rect>,
    menu_bounds: Option<Rect>,
    menu_item_hits: Vec<(usize, Rect)>,
    spotlight_rect: Option<Rect>,
    control_center_rect: Option<Rect>,
    hostname: Option<String>,
}

impl Menubar {
    pub fn new() -> Self {
        Self {
            menu_open: false,
            menu_selected: 0,
            menu_trigger_rect: None,
            menu_bounds: None,
            menu_item_hits: Vec::new(),
            spotlight_rect: None,
            control_center_rect: None,
            hostname: None,
        }
    }

    pub fn begin_frame(&mut self) {
        self.menu_trigger_rect = None;
        self.menu_bounds = None;
        self.menu_item_hits.clear();
        self.spotlight_rect = None;
        self.control_center_rect = None;
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn open_menu(&mut self) {
        self.menu_open = true;
        self.menu_selected = 0;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
        self.menu_selected = 0;
    }

    pub fn toggle_menu(&mut self) {
        if self.menu_open {
            self.close_menu();
        } else {
            self.open_menu();
        }
    }

    fn hostname(&mut self) -> String {
        if let Some(name) = &self.hostname {
            return name.clone();
        }
        let name = hostname::get()
            .ok()
            .and_then(|value| value.into_string().ok())
            .unwrap_or_else(|| "localhost".to_string());
        self.hostname = Some(name.clone());
        name
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, theme: Theme, title: Option<&str>) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let bar_style = Style::default().bg(theme.bar_bg()).fg(theme.bar_fg());
        frame.fill(area, bar_style);
        let host = self.hostname();
        let buffer = frame.buffer_mut();
        let bounds = area;
        let y = area.y;
        let max_x = area.x.saturating_add(area.width);

        // Left cluster: menu trigger then the active title.
        let mut x = area.x;
        let trigger_style = if self.menu_open {
            Style::default()
                .bg(theme.menu_selected_bg())
                .fg(theme.menu_selected_fg())
        } else {
            bar_style.add_modifier(Modifier::BOLD)
        };
        safe_set_string(buffer, bounds, x, y, MENU_TRIGGER, trigger_style);
        let trigger_width = MENU_TRIGGER.chars().count() as u16;
        self.menu_trigger_rect = Some(Rect {
            x,
            y,
            width: trigger_width,
            height: 1,
        });
        x = x.saturating_add(trigger_width + 1);
        if let Some(title) = title {
            let label = truncate_to_width(title, max_x.saturating_sub(x) as usize);
            safe_set_string(buffer, bounds, x, y, &label, bar_style.add_modifier(Modifier::BOLD));
        }

        // Right cluster: spotlight, control center, host, clock.
        let clock = chrono::Local::now().format("%a %b %d  %H:%M").to_string();
        let right = format!("{host}  {clock} ");
        let right_width = right.chars().count() as u16
            + SPOTLIGHT_TRIGGER.chars().count() as u16
            + CONTROL_CENTER_TRIGGER.chars().count() as u16;
        let mut cursor = max_x.saturating_sub(right_width);
        let spotlight_width = SPOTLIGHT_TRIGGER.chars().count() as u16;
        safe_set_string(buffer, bounds, cursor, y, SPOTLIGHT_TRIGGER, bar_style);
        self.spotlight_rect = Some(Rect {
            x: cursor,
            y,
            width: spotlight_width,
            height: 1,
        });
        cursor = cursor.saturating_add(spotlight_width);
        let cc_width = CONTROL_CENTER_TRIGGER.chars().count() as u16;
        safe_set_string(buffer, bounds, cursor, y, CONTROL_CENTER_TRIGGER, bar_style);
        self.control_center_rect = Some(Rect {
            x: cursor,
            y,
            width: cc_width,
            height: 1,
        });
        cursor = cursor.saturating_add(cc_width);
        safe_set_string(buffer, bounds, cursor, y, &right, bar_style);
    }

    /// Drop-down below the trigger; drawn after the windows so it stays
    /// on top.
    pub fn render_menu(&mut self, frame: &mut UiFrame<'_>, bounds: Rect, theme: Theme) {
        if !self.menu_open {
            return;
        }
        let Some(anchor) = self.menu_trigger_rect else {
            return;
        };
        let width = MENU_ITEMS
            .iter()
            .map(|(label, _)| label.chars().count() as u16)
            .max()
            .unwrap_or(1)
            + 4;
        let height = MENU_ITEMS.len() as u16 + 2;
        let menu = Rect {
            x: anchor.x,
            y: anchor.y.saturating_add(1),
            width: width.min(bounds.width),
            height: height.min(bounds.height.saturating_sub(1)),
        };
        self.menu_bounds = Some(menu);
        let menu_style = Style::default().bg(theme.menu_bg()).fg(theme.menu_fg());
        frame.fill(menu, menu_style);
        let buffer = frame.buffer_mut();
        for (idx, (label, _)) in MENU_ITEMS.iter().enumerate() {
            let y = menu.y.saturating_add(1 + idx as u16);
            if y >= menu.y.saturating_add(menu.height) {
                break;
            }
            let selected = idx == self.menu_selected;
            let style = if selected {
                Style::default()
                    .bg(theme.menu_selected_bg())
                    .fg(theme.menu_selected_fg())
                    .add_modifier(Modifier::BOLD)
            } else {
                menu_style
            };
            let marker = if selected { ">" } else { " " };
            safe_set_string(
                buffer,
                menu,
                menu.x.saturating_add(1),
                y,
                &format!("{marker} {label}"),
                style,
            );
            self.menu_item_hits.push((
                idx,
                Rect {
                    x: menu.x,
                    y,
                    width: menu.width,
                    height: 1,
                },
            ));
        }
    }

    /// Keyboard navigation while the menu is open.
    pub fn handle_menu_key(&mut self, key: &KeyEvent) -> Option<SystemAction> {
        if !self.menu_open || key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu_selected = self.menu_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.menu_selected = (self.menu_selected + 1).min(MENU_ITEMS.len() - 1);
            }
            KeyCode::Esc => self.close_menu(),
            KeyCode::Enter => {
                let action = MENU_ITEMS[self.menu_selected].1;
                self.close_menu();
                return Some(action);
            }
            _ => {}
        }
        None
    }

    pub fn action_at(&self, index: usize) -> Option<SystemAction> {
        MENU_ITEMS.get(index).map(|(_, action)| *action)
    }

    pub fn hit_menu_trigger(&self, column: u16, row: u16) -> bool {
        rect_contains(self.menu_trigger_rect, column, row)
    }

    pub fn hit_spotlight(&self, column: u16, row: u16) -> bool {
        rect_contains(self.spotlight_rect, column, row)
    }

    pub fn hit_control_center(&self, column: u16, row: u16) -> bool {
        rect_contains(self.control_center_rect, column, row)
    }

    pub fn hit_menu_item(&self, column: u16, row: u16) -> Option<usize> {
        self.menu_item_hits
            .iter()
            .find(|(_, rect)| rect.contains(ratatui::layout::Position { x: column, y: row }))
            .map(|(idx, _)| *idx)
    }

    pub fn menu_contains(&self, column: u16, row: u16) -> bool {
        rect_contains(self.menu_bounds, column, row)
    }
}

impl Default for Menubar {
    fn default() -> Self {
        Self::new()
    }
}

fn rect_contains(rect: Option<Rect>, column: u16, row: u16) -> bool {
    rect.is_some_and(|rect| rect.contains(ratatui::layout::Position { x: column, y: row }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::buffer::Buffer;

    fn render(menubar: &mut Menubar) -> Rect {
        let area = Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 1,
        };
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        menubar.begin_frame();
        menubar.render(&mut frame, area, Theme::Light, Some("Terminal"));
        area
    }

    #[test]
    fn trigger_hit_rects_register_on_render() {
        let mut menubar = Menubar::new();
        render(&mut menubar);
        assert!(menubar.hit_menu_trigger(0, 0));
        assert!(!menubar.hit_menu_trigger(40, 0));
        // right cluster exists somewhere on the bar
        let spotlight = menubar.spotlight_rect.unwrap();
        assert!(menubar.hit_spotlight(spotlight.x, 0));
    }

    #[test]
    fn menu_keyboard_flow_selects_an_action() {
        let mut menubar = Menubar::new();
        menubar.open_menu();
        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        assert!(menubar.handle_menu_key(&down).is_none());
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(
            menubar.handle_menu_key(&enter),
            Some(SystemAction::Restart)
        );
        assert!(!menubar.menu_open());
    }

    #[test]
    fn escape_closes_without_action() {
        let mut menubar = Menubar::new();
        menubar.open_menu();
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert!(menubar.handle_menu_key(&esc).is_none());
        assert!(!menubar.menu_open());
    }
}
