use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::apps::{AppView, ViewContext};
use crate::ui::UiFrame;

// Idle frames per playback second; the session loop polls at ~16ms.
const TICKS_PER_SECOND: u32 = 60;

struct Track {
    title: &'static str,
    artist: &'static str,
    seconds: u32,
}

const PLAYLIST: [Track; 4] = [
    Track { title: "Midnight Compile", artist: "The Borrow Checkers", seconds: 214 },
    Track { title: "Segfault Serenade", artist: "Null and the Pointers", seconds: 187 },
    Track { title: "Async Afternoon", artist: "The Executors", seconds: 243 },
    Track { title: "Garbage Day (No Collection)", artist: "RAII", seconds: 201 },
];

/// Fake media player: a playlist, a transport, and a progress bar that
/// advances on idle ticks while "playing".
pub struct MusicView {
    selected: usize,
    playing: bool,
    elapsed_ticks: u32,
}

impl MusicView {
    pub fn new() -> Self {
        Self {
            selected: 0,
            playing: false,
            elapsed_ticks: 0,
        }
    }

    fn current(&self) -> &'static Track {
        &PLAYLIST[self.selected]
    }

    fn skip(&mut self, forward: bool) {
        self.selected = if forward {
            (self.selected + 1) % PLAYLIST.len()
        } else {
            (self.selected + PLAYLIST.len() - 1) % PLAYLIST.len()
        };
        self.elapsed_ticks = 0;
    }

    fn elapsed_seconds(&self) -> u32 {
        self.elapsed_ticks / TICKS_PER_SECOND
    }
}

impl Default for MusicView {
    fn default() -> Self {
        Self::new()
    }
}

fn clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

impl AppView for MusicView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ViewContext) {
        if area.height < 5 || area.width < 16 {
            return;
        }
        let theme = ctx.theme();
        let fg = Style::default().fg(theme.content_fg());
        let selected_style = Style::default()
            .fg(theme.accent())
            .add_modifier(Modifier::BOLD);

        let row = |offset: u16| Rect {
            x: area.x + 2,
            y: area.y + offset,
            width: area.width.saturating_sub(4),
            height: 1,
        };

        for (idx, track) in PLAYLIST.iter().enumerate() {
            let marker = if idx == self.selected {
                if self.playing { "▶" } else { "‖" }
            } else {
                " "
            };
            let line = format!("{marker} {} — {}", track.title, track.artist);
            let style = if idx == self.selected { selected_style } else { fg };
            frame.render_widget(Paragraph::new(Line::from(line)).style(style), row(1 + idx as u16));
        }

        // Transport: elapsed, bar, total.
        let track = self.current();
        let elapsed = self.elapsed_seconds().min(track.seconds);
        let bar_width = area.width.saturating_sub(18) as u32;
        let filled = if track.seconds == 0 {
            0
        } else {
            bar_width * elapsed / track.seconds
        };
        let mut bar = String::new();
        for i in 0..bar_width {
            bar.push(if i < filled { '━' } else { '─' });
        }
        let transport = format!("{} {bar} {}", clock(elapsed), clock(track.seconds));
        frame.render_widget(
            Paragraph::new(Line::from(transport)).style(fg),
            row(area.height.saturating_sub(2)),
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
            KeyCode::Char(' ') => {
                self.playing = !self.playing;
                true
            }
            KeyCode::Up | KeyCode::Char('p') => {
                self.skip(false);
                true
            }
            KeyCode::Down | KeyCode::Char('n') => {
                self.skip(true);
                true
            }
            _ => false,
        }
    }

    fn tick(&mut self) {
        if !self.playing {
            return;
        }
        self.elapsed_ticks += 1;
        if self.elapsed_seconds() >= self.current().seconds {
            self.skip(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_only_advances_while_playing() {
        let mut view = MusicView::new();
        view.tick();
        assert_eq!(view.elapsed_ticks, 0);
        view.playing = true;
        view.tick();
        assert_eq!(view.elapsed_ticks, 1);
    }

    #[test]
    fn finishing_a_track_advances_the_playlist() {
        let mut view = MusicView::new();
        view.playing = true;
        view.elapsed_ticks = PLAYLIST[0].seconds * TICKS_PER_SECOND;
        view.tick();
        assert_eq!(view.selected, 1);
        assert_eq!(view.elapsed_ticks, 0);
    }

    #[test]
    fn skip_wraps_both_directions() {
        let mut view = MusicView::new();
        view.skip(false);
        assert_eq!(view.selected, PLAYLIST.len() - 1);
        view.skip(true);
        assert_eq!(view.selected, 0);
    }
}
