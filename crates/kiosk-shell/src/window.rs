//! Per-window side record
//!
//! A [`WindowNode`] is created when the compositor announces a desktop surface
//! and destroyed when it is removed. The shell never owns the surface or the
//! view, only their handles.

use smithay::utils::{Logical, Point, Size};

use crate::host::{SurfaceHandle, ViewHandle};
use crate::output::OutputId;
use crate::signal::{DestroySignal, Subscription};

slotmap::new_key_type! {
    /// Stable handle to a window record; resolves to nothing once destroyed
    pub struct WindowId;
}

/// How a window occupies its output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Client-chosen size, centred
    #[default]
    Normal,
    /// Output-sized, not fullscreen
    Maximized,
    /// Output-sized, fullscreen
    Fullscreen,
}

impl Placement {
    /// Whether the window is sized to its output
    pub fn fills_output(self) -> bool {
        matches!(self, Placement::Maximized | Placement::Fullscreen)
    }
}

/// Surface state carried by a commit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Commit {
    /// Committed surface size
    pub size: Size<i32, Logical>,
    /// Buffer offset attached with this commit
    pub offset: Point<i32, Logical>,
    /// Offset of the window geometry inside the surface
    pub geometry: Point<i32, Logical>,
}

impl Commit {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: Size::from((width, height)),
            offset: Point::from((0, 0)),
            geometry: Point::from((0, 0)),
        }
    }

    pub fn with_offset(mut self, x: i32, y: i32) -> Self {
        self.offset = Point::from((x, y));
        self
    }

    pub fn with_geometry(mut self, x: i32, y: i32) -> Self {
        self.geometry = Point::from((x, y));
        self
    }
}

/// Shell state for one window
///
/// INVARIANT: a window with a parent is never `Fullscreen`.
/// INVARIANT: `focus_count` equals the number of seats whose focus is this window.
#[derive(Debug)]
pub struct WindowNode {
    pub(crate) surface: SurfaceHandle,
    pub(crate) view: ViewHandle,
    pub(crate) app_id: Option<String>,
    pub(crate) placement: Placement,
    pub(crate) bound_output: Option<Subscription<OutputId>>,
    pub(crate) parent: Option<Subscription<WindowId>>,
    pub(crate) focus_count: u32,
    pub(crate) last_size: Size<i32, Logical>,
    pub(crate) xwayland_position: Option<Point<i32, Logical>>,
    pub(crate) position: Point<i32, Logical>,
    pub(crate) mapped: bool,
    pub(crate) destroy_signal: DestroySignal,
}

impl WindowNode {
    pub(crate) fn new(surface: SurfaceHandle, view: ViewHandle, app_id: Option<String>) -> Self {
        Self {
            surface,
            view,
            app_id,
            placement: Placement::Normal,
            bound_output: None,
            parent: None,
            focus_count: 0,
            last_size: Size::from((0, 0)),
            xwayland_position: None,
            position: Point::from((0, 0)),
            mapped: false,
            destroy_signal: DestroySignal::new(),
        }
    }

    pub fn surface(&self) -> SurfaceHandle {
        self.surface
    }

    pub fn view(&self) -> ViewHandle {
        self.view
    }

    pub fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn bound_output(&self) -> Option<OutputId> {
        self.bound_output.map(|sub| sub.source)
    }

    pub fn parent(&self) -> Option<WindowId> {
        self.parent.map(|sub| sub.source)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Number of seats currently focused on this window
    pub fn focus_count(&self) -> u32 {
        self.focus_count
    }

    pub fn last_size(&self) -> Size<i32, Logical> {
        self.last_size
    }

    pub fn xwayland_position(&self) -> Option<Point<i32, Logical>> {
        self.xwayland_position
    }

    /// Current view position in global coordinates
    pub fn position(&self) -> Point<i32, Logical> {
        self.position
    }

    pub fn is_mapped(&self) -> bool {
        self.mapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_window_is_unplaced_normal_root() {
        let node = WindowNode::new(SurfaceHandle(1), ViewHandle(2), Some("kiosk".into()));
        assert_eq!(node.placement(), Placement::Normal);
        assert!(node.is_root());
        assert_eq!(node.bound_output(), None);
        assert_eq!(node.focus_count(), 0);
        assert!(!node.is_mapped());
        assert_eq!(node.app_id(), Some("kiosk"));
    }

    #[test]
    fn only_maximized_and_fullscreen_fill_output() {
        assert!(!Placement::Normal.fills_output());
        assert!(Placement::Maximized.fills_output());
        assert!(Placement::Fullscreen.fills_output());
    }
}
