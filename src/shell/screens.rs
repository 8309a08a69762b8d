//! The non-desktop screens: boot, login, sleep, shutdown.
//!
//! All four are plain timed/keyed views; the session state machine owns
//! the transitions between them.

use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::theme::Theme;
use crate::ui::UiFrame;

/// How long the boot progress bar runs before login appears.
pub const BOOT_DURATION: Duration = Duration::from_secs(3);

const LOGO: &str = "⌘";

fn centered_row(bounds: Rect, offset_from_mid: i16) -> Rect {
    let mid = bounds.y + bounds.height / 2;
    let y = (mid as i32 + offset_from_mid as i32)
        .clamp(bounds.y as i32, (bounds.y + bounds.height.saturating_sub(1)) as i32)
        as u16;
    Rect {
        x: bounds.x,
        y,
        width: bounds.width,
        height: 1,
    }
}

fn dark_backdrop(frame: &mut UiFrame<'_>, bounds: Rect) {
    frame.fill(bounds, Style::default().bg(Color::Black).fg(Color::White));
}

pub struct BootScreen {
    started: Instant,
}

impl BootScreen {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn finished(&self) -> bool {
        self.started.elapsed() >= BOOT_DURATION
    }

    fn progress(&self) -> f64 {
        let elapsed = self.started.elapsed().as_secs_f64();
        (elapsed / BOOT_DURATION.as_secs_f64()).min(1.0)
    }

    pub fn render(&self, frame: &mut UiFrame<'_>, bounds: Rect) {
        dark_backdrop(frame, bounds);
        frame.render_widget(
            Paragraph::new(Line::from(LOGO))
                .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
                .centered(),
            centered_row(bounds, -2),
        );
        let bar_width = (bounds.width / 3).max(10) as usize;
        let filled = (bar_width as f64 * self.progress()) as usize;
        let bar: String = "━".repeat(filled) + &"─".repeat(bar_width - filled);
        frame.render_widget(
            Paragraph::new(Line::from(bar))
                .style(Style::default().fg(Color::Gray))
                .centered(),
            centered_row(bounds, 1),
        );
    }
}

impl Default for BootScreen {
    fn default() -> Self {
        Self::new()
    }
}

pub struct LoginScreen;

impl LoginScreen {
    pub fn render(&self, frame: &mut UiFrame<'_>, bounds: Rect, theme: Theme) {
        frame.fill(bounds, Style::default().bg(theme.desktop_bg()).fg(theme.bar_fg()));
        let accent = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        frame.render_widget(
            Paragraph::new(Line::from("(・ᴗ・)")).style(accent).centered(),
            centered_row(bounds, -3),
        );
        frame.render_widget(
            Paragraph::new(Line::from("guest")).style(accent).centered(),
            centered_row(bounds, -1),
        );
        frame.render_widget(
            Paragraph::new(Line::from("press enter to log in"))
                .style(Style::default().fg(Color::White).add_modifier(Modifier::DIM))
                .centered(),
            centered_row(bounds, 1),
        );
        frame.render_widget(
            Paragraph::new(Line::from("t: toggle dark mode"))
                .style(Style::default().fg(Color::White).add_modifier(Modifier::DIM))
                .centered(),
            centered_row(bounds, 3),
        );
    }
}

pub struct SleepScreen;

impl SleepScreen {
    pub fn render(&self, frame: &mut UiFrame<'_>, bounds: Rect) {
        dark_backdrop(frame, bounds);
        frame.render_widget(
            Paragraph::new(Line::from("zZ"))
                .style(Style::default().fg(Color::DarkGray))
                .centered(),
            centered_row(bounds, 0),
        );
        frame.render_widget(
            Paragraph::new(Line::from("press any key to wake"))
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM))
                .centered(),
            centered_row(bounds, 2),
        );
    }
}

pub struct ShutdownScreen;

impl ShutdownScreen {
    pub fn render(&self, frame: &mut UiFrame<'_>, bounds: Rect) {
        dark_backdrop(frame, bounds);
        frame.render_widget(
            Paragraph::new(Line::from("⏻"))
                .style(Style::default().fg(Color::DarkGray))
                .centered(),
            centered_row(bounds, 0),
        );
        frame.render_widget(
            Paragraph::new(Line::from("press any key to start"))
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM))
                .centered(),
            centered_row(bounds, 2),
        );
    }
}
