use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::apps::{AppView, ViewContext, ViewProps};
use crate::ui::UiFrame;

const DEFAULT_ADDRESS: &str = "hello@term-desk.example";

/// Redirect stub: a contact card that hands composition off to the
/// system mail client.
pub struct MailView {
    address: String,
}

impl MailView {
    pub fn new(props: &ViewProps) -> Self {
        Self {
            address: props.get("address").unwrap_or(DEFAULT_ADDRESS).to_string(),
        }
    }

    fn compose(&self) -> bool {
        let url = format!("mailto:{}", self.address);
        if let Err(err) = webbrowser::open(&url) {
            tracing::warn!(%url, %err, "failed to open mail client");
        }
        true
    }
}

impl AppView for MailView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ViewContext) {
        if area.height < 4 || area.width < 12 {
            return;
        }
        let theme = ctx.theme();
        let fg = Style::default().fg(theme.content_fg());
        let row = |offset: u16| Rect {
            x: area.x + 2,
            y: area.y + offset,
            width: area.width.saturating_sub(4),
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Line::from("✉  Get in touch"))
                .style(fg.add_modifier(Modifier::BOLD)),
            row(1),
        );
        frame.render_widget(
            Paragraph::new(Line::from(self.address.as_str()))
                .style(Style::default().fg(theme.accent())),
            row(3),
        );
        frame.render_widget(
            Paragraph::new(Line::from("press enter to compose in your mail client"))
                .style(fg.add_modifier(Modifier::DIM)),
            row(5),
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
            KeyCode::Enter => self.compose(),
            _ => false,
        }
    }
}
