use crate::geometry::{Geometry, Point, Size};
use crate::window::gesture::{DragGesture, Gesture, ResizeDirection, ResizeGesture};
use crate::window::{OpenRequest, WindowId, WindowRecord};

/// Single source of truth for which windows exist, their order, and
/// which one is focused.
///
/// `windows` keeps creation order; visual stacking is derived from the
/// focus pointer alone — the focused window is topmost, everything else
/// shares a baseline and ties break by creation order. Operations on
/// ids that are no longer present are defined no-ops, which keeps the
/// manager resilient to stale references from queued input events.
pub struct WindowManager {
    windows: Vec<WindowRecord>,
    focused: Option<WindowId>,
    gesture: Option<Gesture>,
    work_area: Geometry,
    closed: Vec<WindowId>,
}

impl WindowManager {
    pub fn new() -> Self {
        Self {
            windows: Vec::new(),
            focused: None,
            gesture: None,
            work_area: Geometry::default(),
            closed: Vec::new(),
        }
    }

    /// Usable desktop area between the shell bars; refreshed every frame
    /// so maximize tracks terminal resizes.
    pub fn set_work_area(&mut self, area: Geometry) {
        if self.work_area == area {
            return;
        }
        self.work_area = area;
        // Keep already-maximized windows filling the new area.
        for record in &mut self.windows {
            if record.maximized {
                record.geometry = area;
            }
        }
    }

    pub fn work_area(&self) -> Geometry {
        self.work_area
    }

    /// Open a window, or focus the existing one when the id is already
    /// present. Returns the id either way.
    pub fn open(&mut self, request: OpenRequest) -> WindowId {
        let OpenRequest {
            id,
            title,
            kind,
            props,
            origin,
            size,
        } = request;
        if self.contains(&id) {
            self.focus(&id);
            return id;
        }
        tracing::debug!(window = %id, kind = %kind, "opened window");
        self.windows.push(WindowRecord {
            id: id.clone(),
            title,
            kind,
            props,
            geometry: Geometry::new(origin, size.floored()),
            maximized: false,
            saved_geometry: None,
        });
        self.focused = Some(id.clone());
        id
    }

    /// Remove a window. Focus is left empty when the focused window
    /// closes; the next click or open re-establishes it.
    pub fn close(&mut self, id: &WindowId) {
        let Some(index) = self.windows.iter().position(|record| record.id == *id) else {
            return;
        };
        tracing::debug!(window = %id, "closed window");
        self.windows.remove(index);
        if self.focused.as_ref() == Some(id) {
            self.focused = None;
        }
        if self.gesture.as_ref().is_some_and(|gesture| gesture.id() == id) {
            self.gesture = None;
        }
        self.closed.push(id.clone());
    }

    /// Drain ids whose windows closed since the last call; the shell
    /// uses this to drop the hosted views.
    pub fn take_closed(&mut self) -> Vec<WindowId> {
        std::mem::take(&mut self.closed)
    }

    pub fn focus(&mut self, id: &WindowId) {
        if self.contains(id) {
            self.focused = Some(id.clone());
        }
    }

    /// Clicking empty desktop leaves no window focused.
    pub fn clear_focus(&mut self) {
        self.focused = None;
    }

    pub fn focused(&self) -> Option<&WindowId> {
        self.focused.as_ref()
    }

    pub fn is_focused(&self, id: &WindowId) -> bool {
        self.focused.as_ref() == Some(id)
    }

    pub fn contains(&self, id: &WindowId) -> bool {
        self.windows.iter().any(|record| record.id == *id)
    }

    pub fn get(&self, id: &WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|record| record.id == *id)
    }

    fn get_mut(&mut self, id: &WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|record| record.id == *id)
    }

    /// Records in creation order.
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Bottom-to-top render order: creation order with the focused
    /// window moved last.
    pub fn draw_order(&self) -> Vec<&WindowRecord> {
        let mut order: Vec<&WindowRecord> = self
            .windows
            .iter()
            .filter(|record| !self.is_focused(&record.id))
            .collect();
        if let Some(focused) = self.focused.as_ref().and_then(|id| self.get(id)) {
            order.push(focused);
        }
        order
    }

    /// Merge a geometry update from a live gesture. Ignored for absent
    /// ids and for maximized windows, whose geometry is policy-derived.
    pub fn update_geometry(&mut self, id: &WindowId, origin: Option<Point>, size: Option<Size>) {
        let Some(record) = self.get_mut(id) else {
            return;
        };
        if record.maximized {
            return;
        }
        if let Some(origin) = origin {
            record.geometry.origin = origin;
        }
        if let Some(size) = size {
            record.geometry.size = size.floored();
        }
    }

    /// Snapshot-and-fill, or restore the snapshot. Always focuses.
    pub fn toggle_maximize(&mut self, id: &WindowId) {
        let work_area = self.work_area;
        let Some(record) = self.get_mut(id) else {
            return;
        };
        if record.maximized {
            if let Some(saved) = record.saved_geometry.take() {
                record.geometry = saved;
            }
            record.maximized = false;
            tracing::debug!(window = %id, "restored window");
        } else {
            record.saved_geometry = Some(record.geometry);
            record.geometry = work_area;
            record.maximized = true;
            tracing::debug!(window = %id, "maximized window");
        }
        self.focus(id);
    }

    /// Start a title-bar drag. Refused while another gesture is live or
    /// the window is maximized; starting a gesture focuses the window.
    pub fn begin_drag(&mut self, id: &WindowId, pointer: Point) -> bool {
        if self.gesture.is_some() {
            return false;
        }
        let Some(record) = self.get(id) else {
            return false;
        };
        if record.maximized {
            return false;
        }
        let grab_offset = Point::new(
            pointer.x - record.geometry.origin.x,
            pointer.y - record.geometry.origin.y,
        );
        self.focus(id);
        self.gesture = Some(Gesture::Drag(DragGesture {
            id: id.clone(),
            grab_offset,
        }));
        true
    }

    /// Start a border resize from one of the eight handles.
    pub fn begin_resize(&mut self, id: &WindowId, direction: ResizeDirection, pointer: Point) -> bool {
        if self.gesture.is_some() {
            return false;
        }
        let Some(record) = self.get(id) else {
            return false;
        };
        if record.maximized {
            return false;
        }
        let start_origin = record.geometry.origin;
        let start_size = record.geometry.size;
        self.focus(id);
        self.gesture = Some(Gesture::Resize(ResizeGesture {
            id: id.clone(),
            direction,
            start_pointer: pointer,
            start_origin,
            start_size,
        }));
        true
    }

    /// Feed a pointer move into the live gesture, if any. Returns
    /// whether the event was consumed.
    pub fn pointer_moved(&mut self, pointer: Point) -> bool {
        let Some(gesture) = self.gesture.clone() else {
            return false;
        };
        match gesture {
            Gesture::Drag(drag) => {
                let origin = drag.origin_for(pointer);
                self.update_geometry(&drag.id, Some(origin), None);
            }
            Gesture::Resize(resize) => {
                if let Some(record) = self.get(&resize.id) {
                    let (origin, size) = resize.update(&record.geometry, pointer);
                    self.update_geometry(&resize.id, Some(origin), Some(size));
                }
            }
        }
        true
    }

    /// Pointer-up anywhere ends the gesture unconditionally; there is no
    /// other cancellation path.
    pub fn pointer_released(&mut self) -> bool {
        self.gesture.take().is_some()
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    pub fn gesture_active(&self) -> bool {
        self.gesture.is_some()
    }
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new()
    }
}
