use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};

use crate::apps::AppRegistry;
use crate::theme::Theme;
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};

/// The two launcher surfaces share one overlay: launchpad browses the
/// whole registry, spotlight adds an incremental query line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LauncherMode {
    Launchpad,
    Spotlight,
}

/// Result of feeding a key to the launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LauncherAction {
    Open(String),
    Close,
    Handled,
}

pub struct Launcher {
    mode: LauncherMode,
    query: String,
    selected: usize,
    panel: Rect,
    item_hits: Vec<(String, Rect)>,
}

impl Launcher {
    pub fn new(mode: LauncherMode) -> Self {
        Self {
            mode,
            query: String::new(),
            selected: 0,
            panel: Rect::default(),
            item_hits: Vec::new(),
        }
    }

    pub fn mode(&self) -> LauncherMode {
        self.mode
    }

    fn filtered<'a>(&self, registry: &'a AppRegistry) -> Vec<&'a crate::apps::AppSpec> {
        match self.mode {
            LauncherMode::Launchpad => registry.specs().iter().collect(),
            LauncherMode::Spotlight => registry.search(&self.query),
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent, registry: &AppRegistry) -> LauncherAction {
        if key.kind != KeyEventKind::Press {
            return LauncherAction::Handled;
        }
        match key.code {
            KeyCode::Esc => return LauncherAction::Close,
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => self.selected += 1,
            KeyCode::Enter => {
                if let Some(spec) = self.filtered(registry).get(self.selected) {
                    return LauncherAction::Open(spec.kind.to_string());
                }
            }
            KeyCode::Backspace if self.mode == LauncherMode::Spotlight => {
                self.query.pop();
                self.selected = 0;
            }
            KeyCode::Char(ch) if self.mode == LauncherMode::Spotlight => {
                self.query.push(ch);
                self.selected = 0;
            }
            _ => {}
        }
        let count = self.filtered(registry).len();
        if count > 0 {
            self.selected = self.selected.min(count - 1);
        } else {
            self.selected = 0;
        }
        LauncherAction::Handled
    }

    pub fn hit_item(&self, column: u16, row: u16) -> Option<String> {
        self.item_hits
            .iter()
            .find(|(_, rect)| rect.contains(Position { x: column, y: row }))
            .map(|(kind, _)| kind.clone())
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.panel.contains(Position { x: column, y: row })
    }

    pub fn render(
        &mut self,
        frame: &mut UiFrame<'_>,
        bounds: Rect,
        theme: Theme,
        registry: &AppRegistry,
    ) {
        self.item_hits.clear();
        // Dim the desktop behind the overlay.
        frame.dim(bounds);

        let specs = self.filtered(registry);
        let width = (bounds.width / 2).clamp(24, 60).min(bounds.width);
        let list_rows = match self.mode {
            LauncherMode::Launchpad => specs.len().max(1) as u16,
            LauncherMode::Spotlight => specs.len() as u16,
        };
        let query_rows = if self.mode == LauncherMode::Spotlight { 2 } else { 0 };
        let height = (list_rows + query_rows + 2).min(bounds.height);
        let panel = Rect {
            x: bounds.x + (bounds.width.saturating_sub(width)) / 2,
            y: bounds.y + (bounds.height.saturating_sub(height)) / 3,
            width,
            height,
        };
        self.panel = panel;
        let panel_style = Style::default().bg(theme.menu_bg()).fg(theme.menu_fg());
        frame.fill(panel, panel_style);
        let buffer = frame.buffer_mut();

        let mut y = panel.y + 1;
        if self.mode == LauncherMode::Spotlight {
            let prompt = format!("⌕ {}▏", self.query);
            safe_set_string(
                buffer,
                panel,
                panel.x + 2,
                y,
                &prompt,
                panel_style.add_modifier(Modifier::BOLD),
            );
            y += 2;
        }

        if specs.is_empty() {
            safe_set_string(
                buffer,
                panel,
                panel.x + 2,
                y,
                "no matching apps",
                panel_style.add_modifier(Modifier::DIM),
            );
        }
        for (idx, spec) in specs.iter().enumerate() {
            if y >= panel.y + panel.height.saturating_sub(1) {
                break;
            }
            let selected = idx == self.selected;
            let style = if selected {
                Style::default()
                    .bg(theme.menu_selected_bg())
                    .fg(theme.menu_selected_fg())
                    .add_modifier(Modifier::BOLD)
            } else {
                panel_style
            };
            let marker = if selected { ">" } else { " " };
            let label = truncate_to_width(
                &format!("{marker} {}", spec.title),
                panel.width.saturating_sub(3) as usize,
            );
            safe_set_string(buffer, panel, panel.x + 2, y, &label, style);
            self.item_hits.push((
                spec.kind.to_string(),
                Rect {
                    x: panel.x,
                    y,
                    width: panel.width,
                    height: 1,
                },
            ));
            y += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::buffer::Buffer;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn spotlight_query_narrows_and_opens() {
        let registry = AppRegistry::builtin();
        let mut launcher = Launcher::new(LauncherMode::Spotlight);
        for ch in "snak".chars() {
            launcher.handle_key(&key(KeyCode::Char(ch)), &registry);
        }
        assert_eq!(
            launcher.handle_key(&key(KeyCode::Enter), &registry),
            LauncherAction::Open("snake".to_string())
        );
    }

    #[test]
    fn escape_closes() {
        let registry = AppRegistry::builtin();
        let mut launcher = Launcher::new(LauncherMode::Launchpad);
        assert_eq!(
            launcher.handle_key(&key(KeyCode::Esc), &registry),
            LauncherAction::Close
        );
    }

    #[test]
    fn selection_clamps_to_filtered_results() {
        let registry = AppRegistry::builtin();
        let mut launcher = Launcher::new(LauncherMode::Launchpad);
        for _ in 0..30 {
            launcher.handle_key(&key(KeyCode::Down), &registry);
        }
        let last = registry.specs().len() - 1;
        assert_eq!(launcher.selected, last);
    }

    #[test]
    fn render_registers_item_hits() {
        let registry = AppRegistry::builtin();
        let mut launcher = Launcher::new(LauncherMode::Launchpad);
        let bounds = Rect {
            x: 0,
            y: 0,
            width: 120,
            height: 40,
        };
        let mut buf = Buffer::empty(bounds);
        let mut frame = UiFrame::from_parts(bounds, &mut buf);
        launcher.render(&mut frame, bounds, Theme::Dark, &registry);
        assert_eq!(launcher.item_hits.len(), registry.specs().len());
        let (kind, rect) = launcher.item_hits[0].clone();
        assert_eq!(launcher.hit_item(rect.x + 1, rect.y), Some(kind));
        assert!(launcher.contains(rect.x + 1, rect.y));
        assert!(!launcher.contains(0, 0));
    }
}
