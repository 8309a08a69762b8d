//! Pointer gestures: the drag and resize state machines.
//!
//! A gesture is born on pointer-down, fed by pointer-move, and dies on
//! pointer-up, wherever that lands. At most one gesture is live at a
//! time (single-pointer input); the manager owns the slot. The math
//! here is pure so the update rules can be pinned down in isolation.

use crate::constants::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
use crate::geometry::{Geometry, Point, Size};
use crate::window::WindowId;

/// Which border handle a resize was grabbed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeDirection {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl ResizeDirection {
    pub fn pulls_north(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    pub fn pulls_south(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    pub fn pulls_east(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    pub fn pulls_west(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }
}

/// Title-bar drag: the pointer's grab offset from the window origin is
/// captured once and preserved for the life of the gesture.
#[derive(Debug, Clone)]
pub struct DragGesture {
    pub id: WindowId,
    pub grab_offset: Point,
}

impl DragGesture {
    /// New origin for the current pointer position. No bounds clamp:
    /// windows may be dragged partially or fully off-screen.
    pub fn origin_for(&self, pointer: Point) -> Point {
        Point::new(
            pointer.x - self.grab_offset.x,
            pointer.y - self.grab_offset.y,
        )
    }
}

/// Border resize: everything is computed from the captured start state,
/// so the gesture is insensitive to intermediate floor clamps.
#[derive(Debug, Clone)]
pub struct ResizeGesture {
    pub id: WindowId,
    pub direction: ResizeDirection,
    pub start_pointer: Point,
    pub start_origin: Point,
    pub start_size: Size,
}

impl ResizeGesture {
    /// Apply one pointer move. Axis rules are independent; corner
    /// directions run both of theirs.
    ///
    /// East/south grow freely and clamp at the floor. West/north keep
    /// the opposite edge fixed by shifting the origin together with the
    /// size, and when the candidate would dip under the floor they
    /// leave both untouched for this move (stall, not clamp-and-shift).
    pub fn update(&self, current: &Geometry, pointer: Point) -> (Point, Size) {
        let dx = (pointer.x - self.start_pointer.x) as i64;
        let dy = (pointer.y - self.start_pointer.y) as i64;
        let mut origin = current.origin;
        let mut size = current.size;

        if self.direction.pulls_east() {
            size.width = (self.start_size.width as i64 + dx).max(MIN_WINDOW_WIDTH as i64) as u32;
        }
        if self.direction.pulls_south() {
            size.height =
                (self.start_size.height as i64 + dy).max(MIN_WINDOW_HEIGHT as i64) as u32;
        }
        if self.direction.pulls_west() {
            let candidate = self.start_size.width as i64 - dx;
            if candidate >= MIN_WINDOW_WIDTH as i64 {
                size.width = candidate as u32;
                origin.x = self.start_origin.x + dx as i32;
            }
        }
        if self.direction.pulls_north() {
            let candidate = self.start_size.height as i64 - dy;
            if candidate >= MIN_WINDOW_HEIGHT as i64 {
                size.height = candidate as u32;
                origin.y = self.start_origin.y + dy as i32;
            }
        }

        (origin, size)
    }
}

/// The live gesture slot. `None` on the manager is the idle state.
#[derive(Debug, Clone)]
pub enum Gesture {
    Drag(DragGesture),
    Resize(ResizeGesture),
}

impl Gesture {
    pub fn id(&self) -> &WindowId {
        match self {
            Gesture::Drag(drag) => &drag.id,
            Gesture::Resize(resize) => &resize.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(x: i32, y: i32, width: u32, height: u32) -> Geometry {
        Geometry::new(Point::new(x, y), Size::new(width, height))
    }

    fn resize(direction: ResizeDirection, start: &Geometry, pointer: Point) -> ResizeGesture {
        ResizeGesture {
            id: WindowId::new("w"),
            direction,
            start_pointer: pointer,
            start_origin: start.origin,
            start_size: start.size,
        }
    }

    #[test]
    fn drag_preserves_grab_offset() {
        let drag = DragGesture {
            id: WindowId::new("w"),
            grab_offset: Point::new(30, 8),
        };
        assert_eq!(drag.origin_for(Point::new(130, 58)), Point::new(100, 50));
        // off-screen is allowed
        assert_eq!(drag.origin_for(Point::new(0, 0)), Point::new(-30, -8));
    }

    #[test]
    fn east_grows_and_clamps_at_floor() {
        let start = geometry(100, 100, 400, 300);
        let gesture = resize(ResizeDirection::East, &start, Point::new(500, 250));
        let (origin, size) = gesture.update(&start, Point::new(560, 250));
        assert_eq!(size, Size::new(460, 300));
        assert_eq!(origin, start.origin);

        let (origin, size) = gesture.update(&start, Point::new(100, 250));
        assert_eq!(size.width, MIN_WINDOW_WIDTH);
        assert_eq!(origin, start.origin);
    }

    #[test]
    fn west_shift_keeps_right_edge_fixed() {
        let start = geometry(100, 100, 400, 300);
        let gesture = resize(ResizeDirection::West, &start, Point::new(100, 250));
        let (origin, size) = gesture.update(&start, Point::new(150, 250));
        assert_eq!(size.width, 350);
        assert_eq!(origin.x, 150);
        // right edge: 150 + 350 == 100 + 400
        assert_eq!(origin.x + size.width as i32, 500);
    }

    #[test]
    fn west_stalls_at_floor_without_moving() {
        // dragging the west handle right by 200 would leave 200 < 300
        let start = geometry(100, 100, 400, 300);
        let gesture = resize(ResizeDirection::West, &start, Point::new(100, 250));
        let (origin, size) = gesture.update(&start, Point::new(300, 250));
        assert_eq!(size.width, 400);
        assert_eq!(origin.x, 100);
    }

    #[test]
    fn north_mirrors_west_on_the_vertical_axis() {
        let start = geometry(100, 100, 400, 300);
        let gesture = resize(ResizeDirection::North, &start, Point::new(250, 100));
        let (origin, size) = gesture.update(&start, Point::new(250, 140));
        assert_eq!(size.height, 260);
        assert_eq!(origin.y, 140);

        let (origin, size) = gesture.update(&start, Point::new(250, 300));
        assert_eq!(size.height, 300);
        assert_eq!(origin.y, 100);
    }

    #[test]
    fn south_east_corner_never_moves_origin() {
        let start = geometry(100, 50, 800, 600);
        let gesture = resize(ResizeDirection::SouthEast, &start, Point::new(900, 650));
        let (origin, size) = gesture.update(&start, Point::new(300, 150));
        assert_eq!(size, Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT));
        assert_eq!(origin, start.origin);
    }

    #[test]
    fn north_west_corner_applies_both_rules() {
        let start = geometry(100, 100, 400, 300);
        let gesture = resize(ResizeDirection::NorthWest, &start, Point::new(100, 100));
        let (origin, size) = gesture.update(&start, Point::new(80, 90));
        assert_eq!(size, Size::new(420, 310));
        assert_eq!(origin, Point::new(80, 90));
    }

    #[test]
    fn stall_applies_per_axis_on_corners() {
        let start = geometry(100, 100, 400, 300);
        let gesture = resize(ResizeDirection::NorthWest, &start, Point::new(100, 100));
        // horizontal candidate violates the floor, vertical does not
        let (origin, size) = gesture.update(&start, Point::new(320, 150));
        assert_eq!(size.width, 400);
        assert_eq!(origin.x, 100);
        assert_eq!(size.height, 250);
        assert_eq!(origin.y, 150);
    }
}
