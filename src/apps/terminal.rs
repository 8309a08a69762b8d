use crossterm::event::{Event, KeyCode, KeyEventKind};
use indoc::indoc;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::apps::{AppView, ViewContext};
use crate::ui::UiFrame;

const PROMPT: &str = "guest@term-desk:~$ ";

const HELP_TEXT: &str = indoc! {"
    available commands:
      help          show this text
      about         about this shell
      echo <text>   print text
      date          current date and time
      whoami        current user
      clear         clear the scrollback
"};

const ABOUT_TEXT: &str = indoc! {"
    term-desk — a desktop shell simulation for terminal emulators.
    Windows float, the dock launches, and nothing here is real.
"};

/// A toy command interpreter. There is no PTY behind it; a handful of
/// built-ins echo into a scrollback buffer.
pub struct TerminalView {
    scrollback: Vec<String>,
    input: String,
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            scrollback: vec!["Welcome! Type 'help' to get started.".to_string()],
            input: String::new(),
        }
    }

    fn run_command(&mut self) {
        let line = std::mem::take(&mut self.input);
        self.scrollback.push(format!("{PROMPT}{line}"));
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or("");
        match command {
            "" => {}
            "help" => self.push_block(HELP_TEXT),
            "about" => self.push_block(ABOUT_TEXT),
            "echo" => {
                let rest: Vec<&str> = parts.collect();
                self.scrollback.push(rest.join(" "));
            }
            "date" => {
                let now = chrono::Local::now();
                self.scrollback
                    .push(now.format("%a %b %d %H:%M:%S %Y").to_string());
            }
            "whoami" => {
                let user = std::env::var("USER").unwrap_or_else(|_| "guest".to_string());
                self.scrollback.push(user);
            }
            "clear" => self.scrollback.clear(),
            other => self
                .scrollback
                .push(format!("{other}: command not found (try 'help')")),
        }
    }

    fn push_block(&mut self, block: &str) {
        for line in block.lines() {
            self.scrollback.push(line.to_string());
        }
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl AppView for TerminalView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ViewContext) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let style = Style::default().fg(ctx.theme().content_fg());
        // Tail of the scrollback, leaving the last row for the prompt.
        let view_rows = area.height.saturating_sub(1) as usize;
        let start = self.scrollback.len().saturating_sub(view_rows);
        for (row, line) in self.scrollback[start..].iter().enumerate() {
            frame.render_widget(
                Paragraph::new(Line::from(line.as_str())).style(style),
                Rect {
                    x: area.x,
                    y: area.y + row as u16,
                    width: area.width,
                    height: 1,
                },
            );
        }
        let cursor = if ctx.focused() { "█" } else { " " };
        let prompt_line = format!("{PROMPT}{}{cursor}", self.input);
        frame.render_widget(
            Paragraph::new(Line::from(prompt_line)).style(style.add_modifier(Modifier::BOLD)),
            Rect {
                x: area.x,
                y: area.y + area.height - 1,
                width: area.width,
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
            KeyCode::Char(ch) => {
                self.input.push(ch);
                true
            }
            KeyCode::Backspace => {
                self.input.pop();
                true
            }
            KeyCode::Enter => {
                self.run_command();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(view: &mut TerminalView, line: &str) {
        view.input = line.to_string();
        view.run_command();
    }

    #[test]
    fn echo_prints_its_arguments() {
        let mut view = TerminalView::new();
        feed(&mut view, "echo hello world");
        assert_eq!(view.scrollback.last().unwrap(), "hello world");
    }

    #[test]
    fn unknown_command_reports_not_found() {
        let mut view = TerminalView::new();
        feed(&mut view, "launch-missiles");
        assert!(view.scrollback.last().unwrap().contains("command not found"));
    }

    #[test]
    fn clear_empties_the_scrollback() {
        let mut view = TerminalView::new();
        feed(&mut view, "help");
        feed(&mut view, "clear");
        assert!(view.scrollback.is_empty());
    }
}
