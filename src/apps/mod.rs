use std::collections::BTreeMap;

use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::theme::Theme;
use crate::ui::UiFrame;

pub mod folder;
pub mod mail;
pub mod music;
pub mod registry;
pub mod snake;
pub mod terminal;
pub mod weather;

pub use registry::{AppRegistry, AppSpec, PlaceholderView};

/// Context handed to a hosted view on every call: the window's focus
/// state and the active theme. Views get nothing else from the shell.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext {
    focused: bool,
    theme: Theme,
}

impl ViewContext {
    pub const fn new(focused: bool, theme: Theme) -> Self {
        Self { focused, theme }
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }

    pub const fn theme(&self) -> Theme {
        self.theme
    }
}

/// Opaque, app-specific configuration passed through the window record
/// unmodified. Views pull what they need by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewProps(BTreeMap<String, String>);

impl ViewProps {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }
}

/// A self-contained application view hosted inside a window.
///
/// Views are stateless with respect to the window manager: they render
/// into whatever area they are given and never reach back into the
/// shell. Dropping the view is how a window's content dies.
pub trait AppView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ViewContext);

    /// Handle an input event localized to the content area. Returns
    /// whether the event was consumed.
    fn handle_event(&mut self, _event: &Event, _ctx: &ViewContext) -> bool {
        false
    }

    /// Called once per idle frame; animation/game views advance here.
    fn tick(&mut self) {}
}
