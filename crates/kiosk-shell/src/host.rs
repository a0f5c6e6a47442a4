//! Compositor collaborator interface
//!
//! The shell owns no pixels, surfaces or input devices. Every effect it has on
//! the outside world goes through [`Host`], and every object it refers to on
//! the compositor side is an opaque handle chosen by the compositor.

use serde::{Deserialize, Serialize};
use smithay::utils::{Logical, Point, Rectangle, Size};

use crate::window::WindowId;

/// Compositor-side desktop surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurfaceHandle(pub u64);

/// Compositor-side scene-graph view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewHandle(pub u64);

/// Compositor-side output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OutputHandle(pub u64);

/// Compositor-side input seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeatHandle(pub u64);

/// Commands the shell issues to the compositor.
///
/// All calls happen synchronously from inside a [`crate::Shell`] event
/// handler. Implementations must not call back into the shell.
pub trait Host {
    /// Store (or clear) the shell record associated with a desktop surface.
    ///
    /// The compositor hands the stored id back in later events. It is cleared
    /// before the record is torn down, so an id read from the slot afterwards
    /// is `None` rather than stale.
    fn set_user_data(&mut self, surface: SurfaceHandle, window: Option<WindowId>);

    /// Create the view presenting `surface`. `None` means out of resources.
    fn create_view(&mut self, surface: SurfaceHandle) -> Option<ViewHandle>;

    /// Unlink and release a view (window or background).
    fn destroy_view(&mut self, view: ViewHandle);

    /// Insert a view at the top of the normal layer and mark it mapped.
    fn map_view(&mut self, view: ViewHandle);

    /// Move a mapped view to the top of the normal layer.
    fn raise_view(&mut self, view: ViewHandle);

    fn set_view_position(&mut self, view: ViewHandle, position: Point<i32, Logical>);

    /// Create a solid background fill covering `area` on `output`.
    fn create_background(
        &mut self,
        output: OutputHandle,
        area: Rectangle<i32, Logical>,
    ) -> Option<ViewHandle>;

    fn set_fullscreen(&mut self, surface: SurfaceHandle, fullscreen: bool);

    fn set_maximized(&mut self, surface: SurfaceHandle, maximized: bool);

    /// Configure the surface size. `(0, 0)` lets the client pick.
    fn set_size(&mut self, surface: SurfaceHandle, size: Size<i32, Logical>);

    fn set_activated(&mut self, surface: SurfaceHandle, activated: bool);

    /// Move a seat's keyboard focus to `surface` (or clear it).
    fn set_keyboard_focus(&mut self, seat: SeatHandle, surface: Option<SurfaceHandle>);

    /// Report an out-of-memory condition to the client owning `surface`.
    ///
    /// Returns `false` when there is no client to notify; the shell logs the
    /// failure instead.
    fn post_no_memory(&mut self, _surface: SurfaceHandle) -> bool {
        false
    }
}
