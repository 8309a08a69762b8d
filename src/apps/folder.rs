use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::apps::{AppView, ViewContext, ViewProps};
use crate::ui::UiFrame;

struct Project {
    name: String,
    github: String,
    live: Option<String>,
}

fn builtin_projects() -> Vec<Project> {
    let entry = |name: &str, github: &str, live: Option<&str>| Project {
        name: name.to_string(),
        github: github.to_string(),
        live: live.map(str::to_string),
    };
    vec![
        entry(
            "term-desk",
            "https://github.com/term-desk/term-desk",
            None,
        ),
        entry(
            "Recipe Revive",
            "https://github.com/term-desk/recipe-revive",
            Some("https://recipe-revive.example.com"),
        ),
        entry(
            "RealTime Tracking",
            "https://github.com/term-desk/realtime-tracking",
            Some("https://tracking.example.com"),
        ),
        entry(
            "Spam Classifier",
            "https://github.com/term-desk/spam-classifier",
            None,
        ),
        entry(
            "Analog Clock",
            "https://github.com/term-desk/analog-clock",
            Some("https://clock.example.com"),
        ),
    ]
}

/// Project folder: a browsable list of portfolio entries whose links
/// open in the system browser. Launch props may narrow it to a single
/// project (`title`/`github`/`live`).
pub struct FolderView {
    projects: Vec<Project>,
    selected: usize,
}

impl FolderView {
    pub fn new(props: &ViewProps) -> Self {
        let projects = match (props.get("title"), props.get("github")) {
            (Some(title), Some(github)) => vec![Project {
                name: title.to_string(),
                github: github.to_string(),
                live: props.get("live").map(str::to_string),
            }],
            _ => builtin_projects(),
        };
        Self {
            projects,
            selected: 0,
        }
    }

    fn open_link(&self, live: bool) -> bool {
        let Some(project) = self.projects.get(self.selected) else {
            return false;
        };
        let url = if live {
            match &project.live {
                Some(url) => url,
                None => return false,
            }
        } else {
            &project.github
        };
        if let Err(err) = webbrowser::open(url) {
            tracing::warn!(%url, %err, "failed to open browser");
        }
        true
    }
}

impl AppView for FolderView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ViewContext) {
        if area.height < 3 || area.width < 12 {
            return;
        }
        let theme = ctx.theme();
        let fg = Style::default().fg(theme.content_fg());
        let selected_style = Style::default()
            .fg(theme.accent())
            .add_modifier(Modifier::BOLD);

        for (idx, project) in self.projects.iter().enumerate() {
            let y = area.y + 1 + idx as u16;
            if y >= area.y + area.height.saturating_sub(1) {
                break;
            }
            let marker = if idx == self.selected { "▸" } else { " " };
            let live = if project.live.is_some() { "  [live]" } else { "" };
            let line = format!("{marker} 📁 {}{live}", project.name);
            let style = if idx == self.selected { selected_style } else { fg };
            frame.render_widget(
                Paragraph::new(Line::from(line)).style(style),
                Rect {
                    x: area.x + 1,
                    y,
                    width: area.width.saturating_sub(2),
                    height: 1,
                },
            );
        }
        let hint = "enter: GitHub   l: live site";
        frame.render_widget(
            Paragraph::new(Line::from(hint)).style(fg.add_modifier(Modifier::DIM)),
            Rect {
                x: area.x + 1,
                y: area.y + area.height - 1,
                width: area.width.saturating_sub(2),
                height: 1,
            },
        );
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ViewContext) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1).min(self.projects.len().saturating_sub(1));
                true
            }
            KeyCode::Enter => self.open_link(false),
            KeyCode::Char('l') => self.open_link(true),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn props_narrow_to_a_single_project() {
        let props = ViewProps::default()
            .with("title", "Recipe Revive")
            .with("github", "https://example.com/repo");
        let view = FolderView::new(&props);
        assert_eq!(view.projects.len(), 1);
        assert_eq!(view.projects[0].name, "Recipe Revive");
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut view = FolderView::new(&ViewProps::default());
        let last = view.projects.len() - 1;
        for _ in 0..20 {
            view.handle_event(
                &Event::Key(crossterm::event::KeyEvent::new(
                    KeyCode::Down,
                    crossterm::event::KeyModifiers::NONE,
                )),
                &ViewContext::new(true, crate::theme::Theme::Dark),
            );
        }
        assert_eq!(view.selected, last);
    }
}
