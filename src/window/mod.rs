pub mod decorator;
pub mod gesture;

mod manager;

use std::fmt;

use crate::apps::ViewProps;
use crate::geometry::{Geometry, Point, Size};

pub use manager::WindowManager;

/// Opaque stable window identifier; the join key between the window
/// list, the focus pointer, and the hosted view.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Everything the shell supplies when asking for a window.
#[derive(Debug, Clone)]
pub struct OpenRequest {
    pub id: WindowId,
    pub title: String,
    pub kind: String,
    pub props: ViewProps,
    pub origin: Point,
    pub size: Size,
}

/// One open window: identity, app binding, and placement.
///
/// `geometry` is the single source of truth for on-screen position; it
/// is mutated only through the window-manager operations, never by the
/// hosted view.
#[derive(Debug, Clone)]
pub struct WindowRecord {
    pub(crate) id: WindowId,
    pub(crate) title: String,
    pub(crate) kind: String,
    pub(crate) props: ViewProps,
    pub(crate) geometry: Geometry,
    pub(crate) maximized: bool,
    pub(crate) saved_geometry: Option<Geometry>,
}

impl WindowRecord {
    pub fn id(&self) -> &WindowId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn props(&self) -> &ViewProps {
        &self.props
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn maximized(&self) -> bool {
        self.maximized
    }
}
