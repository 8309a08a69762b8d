use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::apps::{AppView, ViewContext, ViewProps};
use crate::ui::UiFrame;

struct DayForecast {
    day: &'static str,
    glyph: &'static str,
    high: i8,
    low: i8,
}

const FORECAST: [DayForecast; 5] = [
    DayForecast { day: "Mon", glyph: "☀", high: 24, low: 15 },
    DayForecast { day: "Tue", glyph: "⛅", high: 22, low: 14 },
    DayForecast { day: "Wed", glyph: "☔", high: 18, low: 12 },
    DayForecast { day: "Thu", glyph: "☁", high: 19, low: 13 },
    DayForecast { day: "Fri", glyph: "☀", high: 25, low: 16 },
];

/// Canned forecast card; the city comes from the launch props.
pub struct WeatherView {
    city: String,
}

impl WeatherView {
    pub fn new(props: &ViewProps) -> Self {
        Self {
            city: props.get("city").unwrap_or("San Francisco").to_string(),
        }
    }
}

impl AppView for WeatherView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ViewContext) {
        if area.height < 4 || area.width < 10 {
            return;
        }
        let theme = ctx.theme();
        let fg = Style::default().fg(theme.content_fg());
        let accent = Style::default()
            .fg(theme.accent())
            .add_modifier(Modifier::BOLD);

        let row = |offset: u16| Rect {
            x: area.x + 2,
            y: area.y + offset,
            width: area.width.saturating_sub(4),
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Line::from(self.city.as_str())).style(accent),
            row(1),
        );
        frame.render_widget(
            Paragraph::new(Line::from("21°  Partly cloudy")).style(fg),
            row(2),
        );
        for (idx, forecast) in FORECAST.iter().enumerate() {
            let line = format!(
                "{}  {}  {:>3}° / {:>3}°",
                forecast.day, forecast.glyph, forecast.high, forecast.low
            );
            frame.render_widget(
                Paragraph::new(Line::from(line)).style(fg),
                row(4 + idx as u16),
            );
        }
    }
}
