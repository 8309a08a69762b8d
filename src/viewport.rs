//! Mapping between the terminal cell grid and the desktop pixel plane.
//!
//! All window-manager state lives in pixels; the shell converts pointer
//! cells to pixel points on the way in and window geometry to cell
//! rectangles on the way out. The scale is fixed per axis so the two
//! spaces stay in lockstep across the whole frame.

use ratatui::prelude::Rect;

use crate::constants::{
    CELL_PX_HEIGHT, CELL_PX_WIDTH, DOCK_PX_HEIGHT, MENUBAR_PX_HEIGHT,
};
use crate::geometry::{CellRect, Geometry, Point, Size};

#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    area: Rect,
}

impl Viewport {
    pub fn new(area: Rect) -> Self {
        Self { area }
    }

    /// Full terminal area, in cells.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Single-row menu-bar band at the top, in cells.
    pub fn menubar_area(&self) -> Rect {
        Rect {
            height: 1.min(self.area.height),
            ..self.area
        }
    }

    /// Three-row dock band at the bottom, in cells.
    pub fn dock_area(&self) -> Rect {
        let height = 3.min(self.area.height.saturating_sub(1));
        Rect {
            x: self.area.x,
            y: self
                .area
                .y
                .saturating_add(self.area.height)
                .saturating_sub(height),
            width: self.area.width,
            height,
        }
    }

    /// Whole desktop plane, in pixels.
    pub fn desktop_size(&self) -> Size {
        Size::new(
            self.area.width as u32 * CELL_PX_WIDTH,
            self.area.height as u32 * CELL_PX_HEIGHT,
        )
    }

    /// Usable area between the menu bar and the dock, in pixels. This is
    /// the region a maximized window fills.
    pub fn work_area(&self) -> Geometry {
        let desktop = self.desktop_size();
        let height = desktop
            .height
            .saturating_sub(MENUBAR_PX_HEIGHT)
            .saturating_sub(DOCK_PX_HEIGHT);
        Geometry::new(
            Point::new(0, MENUBAR_PX_HEIGHT as i32),
            Size::new(desktop.width, height),
        )
    }

    /// Pixel position of a pointer event, taken at the center of the cell
    /// it landed in so border hit-regions thinner than a cell still match.
    pub fn pointer_at(&self, column: u16, row: u16) -> Point {
        let column = column.saturating_sub(self.area.x) as i32;
        let row = row.saturating_sub(self.area.y) as i32;
        Point::new(
            column * CELL_PX_WIDTH as i32 + CELL_PX_WIDTH as i32 / 2,
            row * CELL_PX_HEIGHT as i32 + CELL_PX_HEIGHT as i32 / 2,
        )
    }

    /// Cell rectangle enclosing a window geometry. The origin rounds down
    /// and the far edge rounds up, so every covered pixel has a cell.
    pub fn cells_for(&self, geometry: &Geometry) -> CellRect {
        let cw = CELL_PX_WIDTH as i32;
        let ch = CELL_PX_HEIGHT as i32;
        let left = geometry.origin.x.div_euclid(cw);
        let top = geometry.origin.y.div_euclid(ch);
        let right = (geometry.right() + cw - 1).div_euclid(cw);
        let bottom = (geometry.bottom() + ch - 1).div_euclid(ch);
        CellRect {
            x: left + self.area.x as i32,
            y: top + self.area.y as i32,
            width: (right - left).max(0) as u16,
            height: (bottom - top).max(0) as u16,
        }
    }
}
