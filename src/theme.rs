use ratatui::style::Color;

// Centralized palette. Every surface asks the active theme for its
// colors so light/dark switching stays a single flag flip.

pub const ACCENT_RGB: (u8, u8, u8) = (60, 130, 246);
pub const ACCENT_ALT_RGB: (u8, u8, u8) = (255, 165, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }

    pub fn accent(self) -> Color {
        let (r, g, b) = ACCENT_RGB;
        Color::Rgb(r, g, b)
    }

    pub fn accent_alt(self) -> Color {
        let (r, g, b) = ACCENT_ALT_RGB;
        Color::Rgb(r, g, b)
    }

    // Desktop surface
    pub fn desktop_bg(self) -> Color {
        match self {
            Theme::Light => Color::Rgb(120, 150, 190),
            Theme::Dark => Color::Rgb(25, 30, 48),
        }
    }

    // Menu bar / dock
    pub fn bar_bg(self) -> Color {
        match self {
            Theme::Light => Color::Gray,
            Theme::Dark => Color::Rgb(40, 40, 50),
        }
    }

    pub fn bar_fg(self) -> Color {
        match self {
            Theme::Light => Color::Black,
            Theme::Dark => Color::White,
        }
    }

    pub fn bar_inactive_fg(self) -> Color {
        Color::DarkGray
    }

    // Drop-down menus and popovers
    pub fn menu_bg(self) -> Color {
        match self {
            Theme::Light => Color::White,
            Theme::Dark => Color::Rgb(30, 30, 38),
        }
    }

    pub fn menu_fg(self) -> Color {
        match self {
            Theme::Light => Color::Black,
            Theme::Dark => Color::White,
        }
    }

    pub fn menu_selected_bg(self) -> Color {
        self.accent()
    }

    pub fn menu_selected_fg(self) -> Color {
        Color::White
    }

    // Window chrome
    pub fn titlebar_bg(self, focused: bool) -> Color {
        match (self, focused) {
            (Theme::Light, true) => Color::Rgb(210, 210, 215),
            (Theme::Light, false) => Color::Rgb(235, 235, 238),
            (Theme::Dark, true) => Color::Rgb(55, 55, 65),
            (Theme::Dark, false) => Color::Rgb(35, 35, 42),
        }
    }

    pub fn titlebar_fg(self, focused: bool) -> Color {
        match (self, focused) {
            (Theme::Light, _) => Color::Black,
            (Theme::Dark, true) => Color::White,
            (Theme::Dark, false) => Color::Gray,
        }
    }

    pub fn window_border(self, focused: bool) -> Color {
        if focused {
            self.accent()
        } else {
            Color::DarkGray
        }
    }

    pub fn content_bg(self) -> Color {
        match self {
            Theme::Light => Color::White,
            Theme::Dark => Color::Rgb(18, 18, 24),
        }
    }

    pub fn content_fg(self) -> Color {
        match self {
            Theme::Light => Color::Rgb(40, 40, 40),
            Theme::Dark => Color::Rgb(220, 220, 220),
        }
    }

    // Traffic-light window controls
    pub fn control_close(self) -> Color {
        Color::Rgb(255, 95, 86)
    }

    pub fn control_minimize(self) -> Color {
        Color::Rgb(255, 189, 46)
    }

    pub fn control_maximize(self) -> Color {
        Color::Rgb(39, 201, 63)
    }

    pub fn success(self) -> Color {
        Color::Green
    }
}
