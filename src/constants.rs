//! Shared crate-wide constants.

/// Minimum window width in desktop pixels, enforced at the end of every
/// resize update, not just on creation.
pub const MIN_WINDOW_WIDTH: u32 = 300;

/// Minimum window height in desktop pixels.
pub const MIN_WINDOW_HEIGHT: u32 = 200;

/// Horizontal pixel span of one terminal cell on the desktop plane.
pub const CELL_PX_WIDTH: u32 = 10;

/// Vertical pixel span of one terminal cell on the desktop plane.
pub const CELL_PX_HEIGHT: u32 = 20;

/// Height of the menu-bar band, in desktop pixels. Cell-aligned so the
/// band renders as exactly one terminal row.
pub const MENUBAR_PX_HEIGHT: u32 = CELL_PX_HEIGHT;

/// Height of the dock band, in desktop pixels (three terminal rows).
pub const DOCK_PX_HEIGHT: u32 = 3 * CELL_PX_HEIGHT;
