use std::collections::VecDeque;

use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::apps::{AppView, ViewContext};
use crate::ui::UiFrame;

// Idle frames between snake steps; the session loop polls at ~16ms.
const TICKS_PER_STEP: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    fn delta(self) -> (i16, i16) {
        match self {
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
        }
    }

    fn opposes(self, other: Heading) -> bool {
        matches!(
            (self, other),
            (Heading::Up, Heading::Down)
                | (Heading::Down, Heading::Up)
                | (Heading::Left, Heading::Right)
                | (Heading::Right, Heading::Left)
        )
    }
}

/// The classic. Board size follows the content area; the game restarts
/// with `r` after a crash.
pub struct SnakeView {
    body: VecDeque<(i16, i16)>,
    heading: Heading,
    pending: Heading,
    food: (i16, i16),
    board: (i16, i16),
    score: u32,
    steps: u64,
    ticks: u32,
    alive: bool,
}

impl SnakeView {
    pub fn new() -> Self {
        let mut view = Self {
            body: VecDeque::new(),
            heading: Heading::Right,
            pending: Heading::Right,
            food: (0, 0),
            board: (30, 16),
            score: 0,
            steps: 0,
            ticks: 0,
            alive: true,
        };
        view.reset();
        view
    }

    fn reset(&mut self) {
        self.body.clear();
        let (w, h) = self.board;
        let start = (w / 2, h / 2);
        self.body.push_back(start);
        self.body.push_back((start.0 - 1, start.1));
        self.body.push_back((start.0 - 2, start.1));
        self.heading = Heading::Right;
        self.pending = Heading::Right;
        self.score = 0;
        self.alive = true;
        self.place_food();
    }

    /// Deterministic scatter keyed off the step counter; good enough
    /// for a toy and keeps the crate free of an RNG dependency.
    fn place_food(&mut self) {
        let (w, h) = self.board;
        if w <= 0 || h <= 0 {
            self.food = (0, 0);
            return;
        }
        let mut seed = self
            .steps
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407 + self.score as u64);
        loop {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            let x = ((seed >> 33) % w as u64) as i16;
            let y = ((seed >> 17) % h as u64) as i16;
            if !self.body.contains(&(x, y)) {
                self.food = (x, y);
                return;
            }
        }
    }

    fn step(&mut self) {
        if !self.alive {
            return;
        }
        self.steps += 1;
        if !self.pending.opposes(self.heading) {
            self.heading = self.pending;
        }
        let (dx, dy) = self.heading.delta();
        let head = self.body.front().copied().unwrap_or((0, 0));
        let next = (head.0 + dx, head.1 + dy);
        let (w, h) = self.board;
        let hit_wall = next.0 < 0 || next.1 < 0 || next.0 >= w || next.1 >= h;
        if hit_wall || self.body.contains(&next) {
            self.alive = false;
            return;
        }
        self.body.push_front(next);
        if next == self.food {
            self.score += 1;
            self.place_food();
        } else {
            self.body.pop_back();
        }
    }

    fn fit_board(&mut self, area: Rect) {
        let board = (
            area.width.saturating_sub(2).max(8) as i16,
            area.height.saturating_sub(2).max(6) as i16,
        );
        if board != self.board {
            self.board = board;
            self.reset();
        }
    }
}

impl Default for SnakeView {
    fn default() -> Self {
        Self::new()
    }
}

impl AppView for SnakeView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ViewContext) {
        if area.width < 10 || area.height < 8 {
            return;
        }
        self.fit_board(area);
        let theme = ctx.theme();
        let fg = Style::default().fg(theme.content_fg());

        let status = if self.alive {
            format!("score {}", self.score)
        } else {
            format!("game over — score {} (press r to restart)", self.score)
        };
        frame.render_widget(
            Paragraph::new(Line::from(status)).style(fg.add_modifier(Modifier::BOLD)),
            Rect {
                x: area.x + 1,
                y: area.y,
                width: area.width.saturating_sub(2),
                height: 1,
            },
        );

        let origin_x = area.x as i32 + 1;
        let origin_y = area.y as i32 + 1;
        let buffer = frame.buffer_mut();
        let mut put = |x: i16, y: i16, symbol: &str, style: Style| {
            let px = origin_x + x as i32;
            let py = origin_y + y as i32;
            if px < area.x as i32
                || py < area.y as i32
                || px >= (area.x + area.width) as i32
                || py >= (area.y + area.height) as i32
            {
                return;
            }
            if let Some(cell) = buffer.cell_mut((px as u16, py as u16)) {
                cell.set_symbol(symbol);
                cell.set_style(style);
            }
        };

        put(
            self.food.0,
            self.food.1,
            "●",
            Style::default().fg(theme.accent_alt()),
        );
        let body_style = Style::default().fg(if self.alive {
            theme.success()
        } else {
            theme.control_close()
        });
        for &(x, y) in &self.body {
            put(x, y, "█", body_style);
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ViewContext) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match key.code {
            KeyCode::Up => self.pending = Heading::Up,
            KeyCode::Down => self.pending = Heading::Down,
            KeyCode::Left => self.pending = Heading::Left,
            KeyCode::Right => self.pending = Heading::Right,
            KeyCode::Char('r') if !self.alive => self.reset(),
            _ => return false,
        }
        true
    }

    fn tick(&mut self) {
        self.ticks += 1;
        if self.ticks % TICKS_PER_STEP == 0 {
            self.step();
        }
    }
}
