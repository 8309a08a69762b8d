use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use ratatui::style::Style;

use crate::apps::{AppRegistry, AppView, ViewContext};
use crate::geometry::CellRect;
use crate::state::ShellState;
use crate::theme::Theme;
use crate::ui::UiFrame;
use crate::viewport::Viewport;
use crate::window::decorator::{
    HeaderAction, TrafficLightDecorator, WindowDecorator, resize_direction_at,
};
use crate::window::{OpenRequest, WindowId, WindowManager};

use super::control_center::{ControlCenter, ControlCenterHit};
use super::dock::{Dock, DockHit};
use super::launcher::{Launcher, LauncherAction, LauncherMode};
use super::menubar::{Menubar, SystemAction};

/// Session-level outcomes the desktop bubbles up to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopAction {
    Sleep,
    Restart,
    ShutDown,
    LogOut,
}

fn desktop_action(action: SystemAction) -> DesktopAction {
    match action {
        SystemAction::Sleep => DesktopAction::Sleep,
        SystemAction::Restart => DesktopAction::Restart,
        SystemAction::ShutDown => DesktopAction::ShutDown,
        SystemAction::LogOut => DesktopAction::LogOut,
    }
}

/// The desktop surface: wires the window manager, the registry-created
/// views, and the shell furniture together, and routes every input
/// event to exactly one of them.
pub struct Desktop {
    wm: WindowManager,
    registry: AppRegistry,
    views: BTreeMap<WindowId, Box<dyn AppView>>,
    decorator: Arc<dyn WindowDecorator>,
    menubar: Menubar,
    dock: Dock,
    launcher: Option<Launcher>,
    control_center: Option<ControlCenter>,
    spawn_slot: usize,
}

impl Desktop {
    pub fn new() -> Self {
        Self {
            wm: WindowManager::new(),
            registry: AppRegistry::builtin(),
            views: BTreeMap::new(),
            decorator: Arc::new(TrafficLightDecorator),
            menubar: Menubar::new(),
            dock: Dock::new(),
            launcher: None,
            control_center: None,
            spawn_slot: 0,
        }
    }

    pub fn wm(&self) -> &WindowManager {
        &self.wm
    }

    /// Launch a registered app; duplicate launches focus the existing
    /// window instead of spawning a second one.
    pub fn open_app(&mut self, kind: &str) -> Option<WindowId> {
        let request = self.registry.open_request(kind, self.spawn_slot)?;
        self.spawn_slot += 1;
        Some(self.open_request(request))
    }

    /// Open from a fully-formed request (launchers and tests use this).
    pub fn open_request(&mut self, request: OpenRequest) -> WindowId {
        let kind = request.kind.clone();
        let props = request.props.clone();
        let id = self.wm.open(request);
        if !self.views.contains_key(&id) {
            let view = self.registry.create_view(&kind, &props);
            self.views.insert(id.clone(), view);
        }
        id
    }

    fn drain_closed(&mut self) {
        for id in self.wm.take_closed() {
            self.views.remove(&id);
        }
    }

    /// Idle-frame hook; animation views advance here.
    pub fn tick(&mut self) {
        for view in self.views.values_mut() {
            view.tick();
        }
    }

    pub fn handle_event(
        &mut self,
        event: &Event,
        state: &mut ShellState,
        viewport: Viewport,
    ) -> Option<DesktopAction> {
        match event {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    return None;
                }
                // Modal surfaces first: launcher, system menu, popover.
                if let Some(launcher) = &mut self.launcher {
                    match launcher.handle_key(key, &self.registry) {
                        LauncherAction::Open(kind) => {
                            self.launcher = None;
                            self.open_app(&kind);
                        }
                        LauncherAction::Close => self.launcher = None,
                        LauncherAction::Handled => {}
                    }
                    return None;
                }
                if self.menubar.menu_open() {
                    return self.menubar.handle_menu_key(key).map(desktop_action);
                }
                if let Some(control_center) = &mut self.control_center {
                    if control_center.handle_key(key, state) {
                        self.control_center = None;
                    }
                    return None;
                }
                // Everything else belongs to the focused window's view.
                if let Some(id) = self.wm.focused().cloned()
                    && let Some(view) = self.views.get_mut(&id)
                {
                    let ctx = ViewContext::new(true, Theme::from_dark(state.dark_mode()));
                    view.handle_event(event, &ctx);
                }
                None
            }
            Event::Mouse(mouse) => self.handle_mouse(*mouse, state, viewport),
            _ => None,
        }
    }

    fn handle_mouse(
        &mut self,
        mouse: MouseEvent,
        state: &mut ShellState,
        viewport: Viewport,
    ) -> Option<DesktopAction> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_mouse_down(mouse.column, mouse.row, state, viewport)
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.wm.gesture_active() {
                    self.wm
                        .pointer_moved(viewport.pointer_at(mouse.column, mouse.row));
                }
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.wm.pointer_released();
                None
            }
            _ => None,
        }
    }

    fn handle_mouse_down(
        &mut self,
        column: u16,
        row: u16,
        state: &mut ShellState,
        viewport: Viewport,
    ) -> Option<DesktopAction> {
        // A modal launcher swallows the click: either an item or out.
        if let Some(launcher) = &self.launcher {
            if let Some(kind) = launcher.hit_item(column, row) {
                self.launcher = None;
                self.open_app(&kind);
            } else if !launcher.contains(column, row) {
                self.launcher = None;
            }
            return None;
        }
        if self.menubar.menu_open() {
            if let Some(index) = self.menubar.hit_menu_item(column, row) {
                self.menubar.close_menu();
                return self.menubar.action_at(index).map(desktop_action);
            }
            if !self.menubar.menu_contains(column, row) {
                self.menubar.close_menu();
            }
        }
        if let Some(control_center) = &self.control_center {
            if let Some(hit) = control_center.hit_test(column, row) {
                match hit {
                    ControlCenterHit::ToggleDarkMode => state.toggle_dark_mode(),
                    ControlCenterHit::BrightnessDown => state.adjust_brightness(false),
                    ControlCenterHit::BrightnessUp => state.adjust_brightness(true),
                }
                return None;
            }
            if control_center.contains(column, row) {
                return None;
            }
            self.control_center = None;
        }

        // Shell bars.
        if self.menubar.hit_menu_trigger(column, row) {
            self.menubar.toggle_menu();
            return None;
        }
        if self.menubar.hit_spotlight(column, row) {
            self.launcher = Some(Launcher::new(LauncherMode::Spotlight));
            return None;
        }
        if self.menubar.hit_control_center(column, row) {
            self.control_center = Some(ControlCenter::new());
            return None;
        }
        if let Some(hit) = self.dock.hit_test(column, row) {
            match hit {
                DockHit::App(kind) => {
                    self.open_app(&kind);
                }
                DockHit::Launchpad => {
                    self.launcher = Some(Launcher::new(LauncherMode::Launchpad));
                }
            }
            return None;
        }
        // The bars render above every window, so clicks on their empty
        // cells must not reach a window underneath.
        let position = Position { x: column, y: row };
        if viewport.menubar_area().contains(position) || viewport.dock_area().contains(position) {
            return None;
        }

        // Windows, topmost first. Any click inside a window focuses it
        // before the gesture-specific handling runs.
        let targets: Vec<(WindowId, CellRect, bool)> = self
            .wm
            .draw_order()
            .iter()
            .map(|record| {
                (
                    record.id().clone(),
                    viewport.cells_for(record.geometry()),
                    record.maximized(),
                )
            })
            .collect();
        for (id, rect, maximized) in targets.into_iter().rev() {
            if !rect.contains(column, row) {
                continue;
            }
            self.wm.focus(&id);
            let pointer = viewport.pointer_at(column, row);
            match self.decorator.hit_test(rect, column, row) {
                HeaderAction::Close | HeaderAction::Minimize => {
                    self.wm.close(&id);
                    self.drain_closed();
                }
                HeaderAction::Maximize => self.wm.toggle_maximize(&id),
                HeaderAction::Drag => {
                    self.wm.begin_drag(&id, pointer);
                }
                HeaderAction::None => {
                    // Resize handles are only offered while not maximized.
                    if !maximized && let Some(direction) = resize_direction_at(rect, column, row) {
                        self.wm.begin_resize(&id, direction, pointer);
                    } else if let Some(view) = self.views.get_mut(&id) {
                        let ctx = ViewContext::new(true, Theme::from_dark(state.dark_mode()));
                        view.handle_event(
                            &Event::Mouse(MouseEvent {
                                kind: MouseEventKind::Down(MouseButton::Left),
                                column,
                                row,
                                modifiers: crossterm::event::KeyModifiers::NONE,
                            }),
                            &ctx,
                        );
                    }
                }
            }
            return None;
        }

        // Empty desktop: clear focus and dismiss popovers.
        self.wm.clear_focus();
        self.control_center = None;
        None
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, state: &ShellState, viewport: Viewport) {
        let theme = Theme::from_dark(state.dark_mode());
        self.wm.set_work_area(viewport.work_area());
        self.menubar.begin_frame();
        self.dock.begin_frame();

        frame.fill(
            viewport.area(),
            Style::default().bg(theme.desktop_bg()).fg(theme.bar_fg()),
        );

        // Windows bottom to top; the focused one renders last.
        let plan: Vec<(WindowId, CellRect, String, bool)> = self
            .wm
            .draw_order()
            .iter()
            .map(|record| {
                (
                    record.id().clone(),
                    viewport.cells_for(record.geometry()),
                    record.title().to_string(),
                    self.wm.is_focused(record.id()),
                )
            })
            .collect();
        for (id, rect, title, focused) in plan {
            self.decorator
                .render_window(frame, rect, &title, focused, theme);
            if let Some(content) = self.decorator.content_area(rect, frame.area())
                && let Some(view) = self.views.get_mut(&id)
            {
                let ctx = ViewContext::new(focused, theme);
                view.render(frame, content, &ctx);
            }
        }

        // Bars and overlays sit above every window.
        let active_title = self
            .wm
            .focused()
            .and_then(|id| self.wm.get(id))
            .map(|record| record.title().to_string());
        self.menubar.render(
            frame,
            viewport.menubar_area(),
            theme,
            active_title.as_deref(),
        );
        let open_kinds: BTreeSet<String> = self
            .wm
            .windows()
            .iter()
            .map(|record| record.kind().to_string())
            .collect();
        self.dock.render(
            frame,
            viewport.dock_area(),
            theme,
            &self.registry,
            &open_kinds,
        );
        self.menubar.render_menu(frame, viewport.area(), theme);
        if let Some(control_center) = &mut self.control_center {
            control_center.render(frame, viewport.area(), theme, state);
        }
        if let Some(launcher) = &mut self.launcher {
            launcher.render(frame, viewport.area(), theme, &self.registry);
        }
    }
}

impl Default for Desktop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::Preferences;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;

    fn viewport() -> Viewport {
        Viewport::new(Rect {
            x: 0,
            y: 0,
            width: 120,
            height: 40,
        })
    }

    fn render_once(desktop: &mut Desktop, state: &ShellState) {
        let area = viewport().area();
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        desktop.render(&mut frame, state, viewport());
    }

    fn click(desktop: &mut Desktop, state: &mut ShellState, column: u16, row: u16) {
        let event = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: crossterm::event::KeyModifiers::NONE,
        });
        desktop.handle_event(&event, state, viewport());
    }

    #[test]
    fn opening_an_app_creates_one_window_and_view() {
        let mut desktop = Desktop::new();
        let id = desktop.open_app("terminal").unwrap();
        assert_eq!(desktop.wm().len(), 1);
        assert!(desktop.views.contains_key(&id));
        // duplicate launch reuses the window
        let again = desktop.open_app("terminal").unwrap();
        assert_eq!(again, id);
        assert_eq!(desktop.wm().len(), 1);
        assert_eq!(desktop.views.len(), 1);
    }

    #[test]
    fn clicking_a_window_body_focuses_it() {
        let mut desktop = Desktop::new();
        let mut state = ShellState::new(Preferences::default());
        let a = desktop.open_app("terminal").unwrap();
        let b = desktop.open_app("weather").unwrap();
        assert!(desktop.wm().is_focused(&b));

        render_once(&mut desktop, &state);
        let rect = viewport().cells_for(desktop.wm().get(&a).unwrap().geometry());
        // content cell in window a's left column, clear of window b's
        // cascade-shifted rectangle
        click(
            &mut desktop,
            &mut state,
            (rect.x + 1) as u16,
            (rect.y + 5) as u16,
        );
        assert!(desktop.wm().is_focused(&a));
    }

    #[test]
    fn close_control_removes_window_and_view() {
        let mut desktop = Desktop::new();
        let mut state = ShellState::new(Preferences::default());
        let id = desktop.open_app("music").unwrap();
        render_once(&mut desktop, &state);
        let rect = viewport().cells_for(desktop.wm().get(&id).unwrap().geometry());
        // close control: title-bar row, offset 2 from the left border
        click(
            &mut desktop,
            &mut state,
            (rect.x + 2) as u16,
            (rect.y + 1) as u16,
        );
        assert!(desktop.wm().is_empty());
        assert!(desktop.views.is_empty());
        assert_eq!(desktop.wm().focused(), None);
    }

    #[test]
    fn clicking_empty_desktop_clears_focus() {
        let mut desktop = Desktop::new();
        let mut state = ShellState::new(Preferences::default());
        desktop.open_app("snake");
        render_once(&mut desktop, &state);
        // far corner away from the cascade spawn area, inside the work band
        click(&mut desktop, &mut state, 119, 30);
        assert_eq!(desktop.wm().focused(), None);
    }

    #[test]
    fn title_bar_drag_moves_the_window() {
        let mut desktop = Desktop::new();
        let mut state = ShellState::new(Preferences::default());
        let id = desktop.open_app("terminal").unwrap();
        render_once(&mut desktop, &state);
        let before = *desktop.wm().get(&id).unwrap().geometry();
        let rect = viewport().cells_for(&before);
        let bar_x = (rect.x + 12) as u16;
        let bar_y = (rect.y + 1) as u16;
        click(&mut desktop, &mut state, bar_x, bar_y);
        assert!(desktop.wm().gesture_active());

        let drag = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: bar_x + 3,
            row: bar_y + 2,
            modifiers: crossterm::event::KeyModifiers::NONE,
        });
        desktop.handle_event(&drag, &mut state, viewport());
        let after = *desktop.wm().get(&id).unwrap().geometry();
        assert_eq!(after.origin.x, before.origin.x + 30);
        assert_eq!(after.origin.y, before.origin.y + 40);
        assert_eq!(after.size, before.size);

        let up = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: bar_x + 3,
            row: bar_y + 2,
            modifiers: crossterm::event::KeyModifiers::NONE,
        });
        desktop.handle_event(&up, &mut state, viewport());
        assert!(!desktop.wm().gesture_active());
    }

    #[test]
    fn dock_click_opens_the_app() {
        let mut desktop = Desktop::new();
        let mut state = ShellState::new(Preferences::default());
        render_once(&mut desktop, &state);
        let hit = desktop
            .dock
            .any_app_button()
            .expect("dock rendered app buttons");
        click(&mut desktop, &mut state, hit.0, hit.1);
        assert_eq!(desktop.wm().len(), 1);
    }
}
