use ratatui::prelude::Rect;
use ratatui::style::{Modifier, Style};

use crate::geometry::CellRect;
use crate::theme::Theme;
use crate::ui::UiFrame;
use crate::window::gesture::ResizeDirection;

/// What a pointer-down on the window chrome means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Close,
    Minimize,
    Maximize,
    Drag,
    None,
}

/// Renders window chrome and answers hit tests against it.
///
/// The layout contract: row 0 is the top border, row 1 the title bar
/// (controls on the left, title centered), the last row the bottom
/// border, and single-cell columns on both sides the vertical borders.
/// The content area is everything inside.
pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        rect: CellRect,
        title: &str,
        focused: bool,
        theme: Theme,
    );

    fn hit_test(&self, rect: CellRect, column: u16, row: u16) -> HeaderAction;

    /// Visible content area in buffer coordinates, or `None` when the
    /// window is too small or entirely off-screen.
    fn content_area(&self, rect: CellRect, bounds: Rect) -> Option<Rect>;
}

// Control cells sit on the title-bar row at these offsets from the
// window's left border.
const CONTROL_CLOSE_OFFSET: i32 = 2;
const CONTROL_MINIMIZE_OFFSET: i32 = 4;
const CONTROL_MAXIMIZE_OFFSET: i32 = 6;

#[derive(Debug)]
pub struct TrafficLightDecorator;

impl TrafficLightDecorator {
    fn title_bar_row(rect: CellRect) -> i32 {
        rect.y.saturating_add(1)
    }
}

impl WindowDecorator for TrafficLightDecorator {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        rect: CellRect,
        title: &str,
        focused: bool,
        theme: Theme,
    ) {
        if rect.width < 3 || rect.height < 3 {
            return;
        }
        let bounds = frame.area();
        let buffer = frame.buffer_mut();
        let border_style = Style::default().fg(theme.window_border(focused));
        let titlebar_style = Style::default()
            .bg(theme.titlebar_bg(focused))
            .fg(theme.titlebar_fg(focused));
        let content_style = Style::default()
            .bg(theme.content_bg())
            .fg(theme.content_fg());

        let put = |buffer: &mut ratatui::buffer::Buffer, x: i32, y: i32, symbol: &str, style: Style| {
            if x < bounds.x as i32
                || y < bounds.y as i32
                || x >= (bounds.x + bounds.width) as i32
                || y >= (bounds.y + bounds.height) as i32
            {
                return;
            }
            if let Some(cell) = buffer.cell_mut((x as u16, y as u16)) {
                cell.set_symbol(symbol);
                cell.set_style(style);
            }
        };

        let left = rect.x;
        let top = rect.y;
        let right = rect.x + rect.width as i32 - 1;
        let bottom = rect.y + rect.height as i32 - 1;

        // Borders
        for x in left + 1..right {
            put(buffer, x, top, "─", border_style);
            put(buffer, x, bottom, "─", border_style);
        }
        for y in top + 1..bottom {
            put(buffer, left, y, "│", border_style);
            put(buffer, right, y, "│", border_style);
        }
        put(buffer, left, top, "╭", border_style);
        put(buffer, right, top, "╮", border_style);
        put(buffer, left, bottom, "╰", border_style);
        put(buffer, right, bottom, "╯", border_style);

        // Title bar
        let bar_y = Self::title_bar_row(rect);
        for x in left + 1..right {
            put(buffer, x, bar_y, " ", titlebar_style);
        }
        let control_style = |color| {
            let style = Style::default().bg(theme.titlebar_bg(focused)).fg(color);
            if focused {
                style
            } else {
                style.add_modifier(Modifier::DIM)
            }
        };
        put(
            buffer,
            left + CONTROL_CLOSE_OFFSET,
            bar_y,
            "●",
            control_style(theme.control_close()),
        );
        put(
            buffer,
            left + CONTROL_MINIMIZE_OFFSET,
            bar_y,
            "●",
            control_style(theme.control_minimize()),
        );
        put(
            buffer,
            left + CONTROL_MAXIMIZE_OFFSET,
            bar_y,
            "●",
            control_style(theme.control_maximize()),
        );

        let inner_width = (rect.width as i32 - 2).max(0) as usize;
        let shown: String = title.chars().take(inner_width).collect();
        let title_len = shown.chars().count() as i32;
        let start = left + 1 + (inner_width as i32 - title_len) / 2;
        // Keep the title clear of the control cluster.
        let start = start.max(left + CONTROL_MAXIMIZE_OFFSET + 2);
        for (idx, ch) in shown.chars().enumerate() {
            let x = start + idx as i32;
            if x >= right {
                break;
            }
            put(buffer, x, bar_y, &ch.to_string(), titlebar_style);
        }

        // Content backdrop; the hosted view paints over it.
        for y in bar_y + 1..bottom {
            for x in left + 1..right {
                put(buffer, x, y, " ", content_style);
            }
        }
    }

    fn hit_test(&self, rect: CellRect, column: u16, row: u16) -> HeaderAction {
        if !rect.contains(column, row) {
            return HeaderAction::None;
        }
        let bar_y = Self::title_bar_row(rect);
        if row as i32 != bar_y {
            return HeaderAction::None;
        }
        let column = column as i32;
        if column == rect.x + CONTROL_CLOSE_OFFSET {
            return HeaderAction::Close;
        }
        if column == rect.x + CONTROL_MINIMIZE_OFFSET {
            return HeaderAction::Minimize;
        }
        if column == rect.x + CONTROL_MAXIMIZE_OFFSET {
            return HeaderAction::Maximize;
        }
        // Only the interior of the bar drags; the border columns at both
        // ends stay resize handles.
        if column > rect.x && column < rect.x + rect.width as i32 - 1 {
            return HeaderAction::Drag;
        }
        HeaderAction::None
    }

    fn content_area(&self, rect: CellRect, bounds: Rect) -> Option<Rect> {
        if rect.width < 3 || rect.height < 4 {
            return None;
        }
        let left = rect.x + 1;
        let top = rect.y + 2;
        let right = rect.x + rect.width as i32 - 1;
        let bottom = rect.y + rect.height as i32 - 1;

        let clipped_left = left.max(bounds.x as i32);
        let clipped_top = top.max(bounds.y as i32);
        let clipped_right = right.min((bounds.x + bounds.width) as i32);
        let clipped_bottom = bottom.min((bounds.y + bounds.height) as i32);
        if clipped_right <= clipped_left || clipped_bottom <= clipped_top {
            return None;
        }
        Some(Rect {
            x: clipped_left as u16,
            y: clipped_top as u16,
            width: (clipped_right - clipped_left) as u16,
            height: (clipped_bottom - clipped_top) as u16,
        })
    }
}

/// Which resize handle, if any, a border cell belongs to. Corners win
/// over edges at the overlapping cells.
pub fn resize_direction_at(rect: CellRect, column: u16, row: u16) -> Option<ResizeDirection> {
    if !rect.contains(column, row) {
        return None;
    }
    let column = column as i32;
    let row = row as i32;
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width as i32 - 1;
    let bottom = rect.y + rect.height as i32 - 1;

    let on_left = column == left;
    let on_right = column == right;
    let on_top = row == top;
    let on_bottom = row == bottom;

    match (on_top, on_bottom, on_left, on_right) {
        (true, _, true, _) => Some(ResizeDirection::NorthWest),
        (true, _, _, true) => Some(ResizeDirection::NorthEast),
        (_, true, true, _) => Some(ResizeDirection::SouthWest),
        (_, true, _, true) => Some(ResizeDirection::SouthEast),
        (true, ..) => Some(ResizeDirection::North),
        (_, true, ..) => Some(ResizeDirection::South),
        (_, _, true, _) => Some(ResizeDirection::West),
        (_, _, _, true) => Some(ResizeDirection::East),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> CellRect {
        CellRect {
            x: 10,
            y: 5,
            width: 40,
            height: 12,
        }
    }

    #[test]
    fn corners_win_over_edges() {
        let rect = rect();
        assert_eq!(
            resize_direction_at(rect, 10, 5),
            Some(ResizeDirection::NorthWest)
        );
        assert_eq!(
            resize_direction_at(rect, 49, 5),
            Some(ResizeDirection::NorthEast)
        );
        assert_eq!(
            resize_direction_at(rect, 10, 16),
            Some(ResizeDirection::SouthWest)
        );
        assert_eq!(
            resize_direction_at(rect, 49, 16),
            Some(ResizeDirection::SouthEast)
        );
    }

    #[test]
    fn edges_cover_the_borders() {
        let rect = rect();
        assert_eq!(resize_direction_at(rect, 20, 5), Some(ResizeDirection::North));
        assert_eq!(resize_direction_at(rect, 20, 16), Some(ResizeDirection::South));
        assert_eq!(resize_direction_at(rect, 10, 8), Some(ResizeDirection::West));
        assert_eq!(resize_direction_at(rect, 49, 8), Some(ResizeDirection::East));
        assert_eq!(resize_direction_at(rect, 20, 8), None);
        assert_eq!(resize_direction_at(rect, 9, 5), None);
    }

    #[test]
    fn title_bar_hits_controls_then_drag() {
        let decorator = TrafficLightDecorator;
        let rect = rect();
        assert_eq!(decorator.hit_test(rect, 12, 6), HeaderAction::Close);
        assert_eq!(decorator.hit_test(rect, 14, 6), HeaderAction::Minimize);
        assert_eq!(decorator.hit_test(rect, 16, 6), HeaderAction::Maximize);
        assert_eq!(decorator.hit_test(rect, 30, 6), HeaderAction::Drag);
        // content row is not chrome
        assert_eq!(decorator.hit_test(rect, 30, 8), HeaderAction::None);
    }

    #[test]
    fn content_area_is_inset_and_clipped() {
        let decorator = TrafficLightDecorator;
        let bounds = Rect {
            x: 0,
            y: 0,
            width: 60,
            height: 20,
        };
        let inner = decorator.content_area(rect(), bounds).unwrap();
        assert_eq!(inner, Rect {
            x: 11,
            y: 7,
            width: 38,
            height: 9,
        });

        // partially off-screen to the left
        let off = CellRect {
            x: -5,
            y: 5,
            width: 40,
            height: 12,
        };
        let inner = decorator.content_area(off, bounds).unwrap();
        assert_eq!(inner.x, 0);
        assert!(inner.width < 38);
    }

    #[test]
    fn render_smoke_test_offscreen_buffer() {
        use ratatui::buffer::Buffer;

        let area = Rect {
            x: 0,
            y: 0,
            width: 60,
            height: 20,
        };
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        let decorator = TrafficLightDecorator;
        decorator.render_window(&mut frame, rect(), "Terminal", true, Theme::Dark);
        assert_eq!(buf.cell((10, 5)).unwrap().symbol(), "╭");
        assert_eq!(buf.cell((12, 6)).unwrap().symbol(), "●");

        // partially off-screen windows must not panic
        let off = CellRect {
            x: -8,
            y: -2,
            width: 40,
            height: 12,
        };
        let mut frame = UiFrame::from_parts(area, &mut buf);
        decorator.render_window(&mut frame, off, "Weather", false, Theme::Light);
    }
}
