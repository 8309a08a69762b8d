//! The session state machine: boot → login → desktop, with sleep,
//! restart, and shutdown excursions, plus the loop that drives it.

use std::io;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::Rect;

use crate::drivers::InputDriver;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::prefs::{Preferences, PrefsStore};
use crate::shell::screens::{BootScreen, LoginScreen, ShutdownScreen, SleepScreen};
use crate::shell::{Desktop, DesktopAction};
use crate::state::ShellState;
use crate::theme::Theme;
use crate::ui::UiFrame;
use crate::viewport::Viewport;

/// Which screen owns the frame. The desktop lives inside its variant so
/// logging out genuinely tears the window session down, matching the
/// no-layout-persistence policy.
enum SystemState {
    Booting(BootScreen),
    Login,
    Desktop(Box<Desktop>),
    Sleeping,
    Shutdown,
}

impl SystemState {
    fn name(&self) -> &'static str {
        match self {
            SystemState::Booting(_) => "booting",
            SystemState::Login => "login",
            SystemState::Desktop(_) => "desktop",
            SystemState::Sleeping => "sleeping",
            SystemState::Shutdown => "shutdown",
        }
    }
}

pub struct Session {
    state: SystemState,
    shell: ShellState,
    store: Option<PrefsStore>,
}

impl Session {
    pub fn new(store: Option<PrefsStore>, prefs: Preferences, skip_boot: bool) -> Self {
        let state = if skip_boot {
            SystemState::Login
        } else {
            SystemState::Booting(BootScreen::new())
        };
        tracing::info!(state = state.name(), "session started");
        Self {
            state,
            shell: ShellState::new(prefs),
            store,
        }
    }

    pub fn state_name(&self) -> &'static str {
        self.state.name()
    }

    pub fn shell(&self) -> &ShellState {
        &self.shell
    }

    fn transition(&mut self, next: SystemState) {
        tracing::info!(from = self.state.name(), to = next.name(), "state change");
        self.state = next;
    }

    /// Returns `true` when the application should quit.
    pub fn handle_event(&mut self, event: &Event, viewport: Viewport) -> bool {
        // Ctrl+Q leaves the whole simulation from any screen.
        if let Event::Key(key) = event
            && key.kind == KeyEventKind::Press
            && key.code == KeyCode::Char('q')
            && key.modifiers.contains(KeyModifiers::CONTROL)
        {
            return true;
        }

        let next = match &mut self.state {
            SystemState::Booting(_) => None,
            SystemState::Login => match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Enter => Some(SystemState::Desktop(Box::new(Desktop::new()))),
                    KeyCode::Char('t') => {
                        self.shell.toggle_dark_mode();
                        None
                    }
                    _ => None,
                },
                _ => None,
            },
            SystemState::Desktop(desktop) => desktop
                .handle_event(event, &mut self.shell, viewport)
                .map(|action| match action {
                    DesktopAction::Sleep => SystemState::Sleeping,
                    DesktopAction::Restart => SystemState::Booting(BootScreen::new()),
                    DesktopAction::ShutDown => SystemState::Shutdown,
                    DesktopAction::LogOut => SystemState::Login,
                }),
            SystemState::Sleeping => match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => Some(SystemState::Login),
                Event::Mouse(mouse)
                    if matches!(mouse.kind, crossterm::event::MouseEventKind::Down(_)) =>
                {
                    Some(SystemState::Login)
                }
                _ => None,
            },
            SystemState::Shutdown => match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    Some(SystemState::Booting(BootScreen::new()))
                }
                _ => None,
            },
        };
        if let Some(next) = next {
            self.transition(next);
        }
        false
    }

    /// Idle-frame hook: timed transitions, view animation, preference
    /// flushing.
    pub fn tick(&mut self) {
        let boot_done = matches!(&self.state, SystemState::Booting(boot) if boot.finished());
        if boot_done {
            self.transition(SystemState::Login);
        }
        if let SystemState::Desktop(desktop) = &mut self.state {
            desktop.tick();
        }
        if let Some(prefs) = self.shell.take_prefs_change()
            && let Some(store) = &self.store
            && let Err(err) = store.save(&prefs)
        {
            tracing::warn!(%err, "failed to persist preferences");
        }
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, viewport: Viewport) {
        let theme = Theme::from_dark(self.shell.dark_mode());
        match &mut self.state {
            SystemState::Booting(boot) => boot.render(frame, viewport.area()),
            SystemState::Login => LoginScreen.render(frame, viewport.area(), theme),
            SystemState::Desktop(desktop) => desktop.render(frame, &self.shell, viewport),
            SystemState::Sleeping => SleepScreen.render(frame, viewport.area()),
            SystemState::Shutdown => ShutdownScreen.render(frame, viewport.area()),
        }
        // The brightness overlay covers every screen.
        if self.shell.dimmed() {
            frame.dim(viewport.area());
        }
    }
}

/// Drive a session until it quits.
pub fn run<B, D>(
    terminal: &mut Terminal<B>,
    driver: &mut D,
    session: &mut Session,
) -> io::Result<()>
where
    B: Backend,
    <B as Backend>::Error: std::fmt::Display,
    D: InputDriver,
{
    let size = terminal
        .size()
        .map_err(|err| io::Error::other(err.to_string()))?;
    let mut viewport = Viewport::new(Rect::new(0, 0, size.width, size.height));
    let mut event_loop = EventLoop::new(driver, Duration::from_millis(16));
    event_loop.run(|_, event| {
        if let Some(event) = event {
            if session.handle_event(&event, viewport) {
                return Ok(ControlFlow::Quit);
            }
        } else {
            session.tick();
            terminal
                .draw(|frame| {
                    viewport = Viewport::new(frame.area());
                    let mut ui = UiFrame::new(frame);
                    session.render(&mut ui, viewport);
                })
                .map_err(|err| io::Error::other(err.to_string()))?;
        }
        Ok(ControlFlow::Continue)
    })
}
