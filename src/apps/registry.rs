//! The application registry: a closed table of launchable app kinds.
//!
//! Each entry binds a kind tag to a view factory and its default launch
//! geometry. Unknown tags resolve to the placeholder view — opening a
//! window can degrade but never fail.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::apps::{AppView, ViewContext, ViewProps};
use crate::geometry::{Point, Size};
use crate::ui::UiFrame;
use crate::window::{OpenRequest, WindowId};

type ViewFactory = fn(&ViewProps) -> Box<dyn AppView>;

pub struct AppSpec {
    pub kind: &'static str,
    pub title: &'static str,
    pub default_size: Size,
    /// Whether the app gets a dock shortcut; everything is reachable
    /// through the launchers either way.
    pub pinned: bool,
    factory: ViewFactory,
}

impl AppSpec {
    pub fn create_view(&self, props: &ViewProps) -> Box<dyn AppView> {
        (self.factory)(props)
    }
}

pub struct AppRegistry {
    specs: Vec<AppSpec>,
}

impl AppRegistry {
    /// The built-in app set.
    pub fn builtin() -> Self {
        Self {
            specs: vec![
                AppSpec {
                    kind: "terminal",
                    title: "Terminal",
                    default_size: Size::new(800, 600),
                    pinned: true,
                    factory: |_| Box::new(crate::apps::terminal::TerminalView::new()),
                },
                AppSpec {
                    kind: "weather",
                    title: "Weather",
                    default_size: Size::new(620, 460),
                    pinned: true,
                    factory: |props| Box::new(crate::apps::weather::WeatherView::new(props)),
                },
                AppSpec {
                    kind: "music",
                    title: "Music",
                    default_size: Size::new(700, 480),
                    pinned: true,
                    factory: |_| Box::new(crate::apps::music::MusicView::new()),
                },
                AppSpec {
                    kind: "snake",
                    title: "Snake",
                    default_size: Size::new(640, 520),
                    pinned: true,
                    factory: |_| Box::new(crate::apps::snake::SnakeView::new()),
                },
                AppSpec {
                    kind: "mail",
                    title: "Mail",
                    default_size: Size::new(620, 420),
                    pinned: true,
                    factory: |props| Box::new(crate::apps::mail::MailView::new(props)),
                },
                AppSpec {
                    kind: "projects",
                    title: "Projects",
                    default_size: Size::new(620, 460),
                    pinned: true,
                    factory: |props| Box::new(crate::apps::folder::FolderView::new(props)),
                },
            ],
        }
    }

    pub fn specs(&self) -> &[AppSpec] {
        &self.specs
    }

    pub fn resolve(&self, kind: &str) -> Option<&AppSpec> {
        self.specs.iter().find(|spec| spec.kind == kind)
    }

    pub fn pinned(&self) -> impl Iterator<Item = &AppSpec> {
        self.specs.iter().filter(|spec| spec.pinned)
    }

    /// Case-insensitive launcher filter over kind and title.
    pub fn search(&self, query: &str) -> Vec<&AppSpec> {
        let needle = query.trim().to_lowercase();
        self.specs
            .iter()
            .filter(|spec| {
                needle.is_empty()
                    || spec.kind.contains(&needle)
                    || spec.title.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// View for a window record; unknown kinds get the placeholder.
    pub fn create_view(&self, kind: &str, props: &ViewProps) -> Box<dyn AppView> {
        match self.resolve(kind) {
            Some(spec) => spec.create_view(props),
            None => Box::new(PlaceholderView),
        }
    }

    /// Open request for a registered kind. `slot` indexes the spawn
    /// cascade so consecutive launches stagger instead of stacking.
    pub fn open_request(&self, kind: &str, slot: usize) -> Option<OpenRequest> {
        let spec = self.resolve(kind)?;
        Some(OpenRequest {
            id: WindowId::new(spec.kind),
            title: spec.title.to_string(),
            kind: spec.kind.to_string(),
            props: ViewProps::default(),
            origin: cascade_origin(slot),
            size: spec.default_size,
        })
    }
}

/// Staggered cascade for newly spawned windows.
pub fn cascade_origin(slot: usize) -> Point {
    let step = (slot % 6) as i32;
    Point::new(140 + step * 40, 60 + step * 30)
}

/// Shown when a window's kind has no registered view. The window itself
/// stays fully functional.
pub struct PlaceholderView;

impl AppView for PlaceholderView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ViewContext) {
        if area.height == 0 {
            return;
        }
        let style = Style::default().fg(ctx.theme().content_fg());
        let message = Paragraph::new(Line::from("Content not available"))
            .style(style)
            .centered();
        let y = area.y + area.height / 2;
        frame.render_widget(
            message,
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }
}
