use std::collections::BTreeSet;

use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};

use crate::apps::AppRegistry;
use crate::theme::Theme;
use crate::ui::{UiFrame, safe_set_string};

/// What a dock click resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockHit {
    App(String),
    Launchpad,
}

struct DockButton {
    hit: DockHit,
    rect: Rect,
}

/// The bottom band: a launchpad button plus one shortcut per pinned
/// app, centered, with a running marker under open apps.
pub struct Dock {
    buttons: Vec<DockButton>,
}

impl Dock {
    pub fn new() -> Self {
        Self {
            buttons: Vec::new(),
        }
    }

    pub fn begin_frame(&mut self) {
        self.buttons.clear();
    }

    pub fn render(
        &mut self,
        frame: &mut UiFrame<'_>,
        area: Rect,
        theme: Theme,
        registry: &AppRegistry,
        open_kinds: &BTreeSet<String>,
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let bar_style = Style::default().bg(theme.bar_bg()).fg(theme.bar_fg());
        frame.fill(area, bar_style);

        let mut labels: Vec<(DockHit, String)> =
            vec![(DockHit::Launchpad, " ⊞ Launchpad ".to_string())];
        for spec in registry.pinned() {
            labels.push((DockHit::App(spec.kind.to_string()), format!(" {} ", spec.title)));
        }

        let total: u16 = labels
            .iter()
            .map(|(_, label)| label.chars().count() as u16 + 1)
            .sum();
        let mut x = area.x + area.width.saturating_sub(total) / 2;
        let button_row = area.y + area.height / 2;
        let marker_row = button_row + 1;
        let buffer = frame.buffer_mut();

        for (hit, label) in labels {
            let width = label.chars().count() as u16;
            let running = match &hit {
                DockHit::App(kind) => open_kinds.contains(kind),
                DockHit::Launchpad => false,
            };
            let style = match &hit {
                DockHit::Launchpad => bar_style.add_modifier(Modifier::BOLD),
                DockHit::App(_) if running => bar_style.add_modifier(Modifier::BOLD),
                DockHit::App(_) => bar_style,
            };
            safe_set_string(buffer, area, x, button_row, &label, style);
            if running && marker_row < area.y + area.height {
                let center = x + width / 2;
                safe_set_string(
                    buffer,
                    area,
                    center,
                    marker_row,
                    "•",
                    Style::default().bg(theme.bar_bg()).fg(theme.accent()),
                );
            }
            self.buttons.push(DockButton {
                hit,
                rect: Rect {
                    x,
                    y: area.y,
                    width,
                    height: area.height,
                },
            });
            x = x.saturating_add(width + 1);
        }
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<DockHit> {
        self.buttons
            .iter()
            .find(|button| button.rect.contains(Position { x: column, y: row }))
            .map(|button| button.hit.clone())
    }

    /// Whether the point lands anywhere on the dock band this frame.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.hit_test(column, row).is_some()
    }

    /// A point inside some app button; test scaffolding only.
    #[cfg(test)]
    pub(crate) fn any_app_button(&self) -> Option<(u16, u16)> {
        self.buttons.iter().find_map(|button| match &button.hit {
            DockHit::App(_) => Some((button.rect.x + 1, button.rect.y + 1)),
            DockHit::Launchpad => None,
        })
    }
}

impl Default for Dock {
    fn default() -> Self {
        Self::new()
    }
}
