//! Compositor events
//!
//! Every notification the compositor can deliver, as one enum. Compositors
//! that prefer a single entry point call [`Shell::dispatch`]; the per-event
//! methods on [`Shell`] stay available for direct use.

use smithay::utils::{Logical, Point, Rectangle};

use crate::grab::{GrabOutcome, MoveRequest};
use crate::host::{Host, OutputHandle, SeatHandle, SurfaceHandle};
use crate::output::OutputId;
use crate::seat::SeatId;
use crate::shell::{Shell, ShellError};
use crate::window::{Commit, WindowId};

#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    // Windows
    WindowAdded {
        surface: SurfaceHandle,
        app_id: Option<String>,
        parent: Option<WindowId>,
    },
    WindowRemoved {
        window: WindowId,
    },
    WindowCommitted {
        window: WindowId,
        commit: Commit,
    },
    ParentChanged {
        window: WindowId,
        parent: Option<WindowId>,
    },
    FullscreenRequested {
        window: WindowId,
        fullscreen: bool,
        output: Option<OutputId>,
    },
    MaximizeRequested {
        window: WindowId,
        maximized: bool,
    },
    MinimizeRequested {
        window: WindowId,
    },
    ResizeRequested {
        window: WindowId,
    },
    MoveRequested {
        window: WindowId,
        seat: SeatId,
        request: MoveRequest,
    },
    XwaylandPositionSet {
        window: WindowId,
        position: Point<i32, Logical>,
    },
    AppIdChanged {
        window: WindowId,
        app_id: Option<String>,
    },

    // Outputs
    OutputAdded {
        handle: OutputHandle,
        name: String,
        geometry: Rectangle<i32, Logical>,
    },
    OutputRemoved {
        output: OutputId,
    },
    OutputResized {
        output: OutputId,
        geometry: Rectangle<i32, Logical>,
    },
    OutputMoved {
        output: OutputId,
        delta: Point<i32, Logical>,
    },

    // Seats
    SeatAdded {
        handle: SeatHandle,
        name: String,
        has_keyboard: bool,
    },
    SeatCapabilitiesChanged {
        seat: SeatId,
        has_keyboard: bool,
    },
    SeatRemoved {
        seat: SeatId,
    },
    KeyboardFocusChanged {
        seat: SeatId,
        focus: Option<WindowId>,
    },
    PointerButton {
        seat: SeatId,
        button: u32,
        focus: Option<WindowId>,
        default_grab: bool,
    },
    TouchDown {
        seat: SeatId,
        focus: Option<WindowId>,
        default_grab: bool,
    },
    GrabMotion {
        seat: SeatId,
        location: Point<i32, Logical>,
    },
    GrabReleased {
        seat: SeatId,
    },
}

/// What a dispatched event produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    /// A window record was created
    Window(WindowId),
    /// An output record was created
    Output(OutputId),
    /// A seat record was created
    Seat(SeatId),
    /// A move request was answered
    Grab(GrabOutcome),
    Handled,
}

impl Shell {
    /// Apply one compositor event.
    ///
    /// Only allocation failures are reported as errors; events naming stale
    /// or unknown records are absorbed as no-ops.
    pub fn dispatch<H: Host>(&mut self, host: &mut H, event: ShellEvent) -> Result<Dispatched, ShellError> {
        tracing::trace!(?event, "dispatching");
        let dispatched = match event {
            ShellEvent::WindowAdded { surface, app_id, parent } => {
                Dispatched::Window(self.window_added(host, surface, app_id, parent)?)
            }
            ShellEvent::WindowRemoved { window } => {
                self.window_removed(host, window);
                Dispatched::Handled
            }
            ShellEvent::WindowCommitted { window, commit } => {
                self.window_committed(host, window, commit);
                Dispatched::Handled
            }
            ShellEvent::ParentChanged { window, parent } => {
                self.set_parent(host, window, parent);
                Dispatched::Handled
            }
            ShellEvent::FullscreenRequested {
                window,
                fullscreen,
                output,
            } => {
                self.fullscreen_requested(host, window, fullscreen, output);
                Dispatched::Handled
            }
            ShellEvent::MaximizeRequested { window, maximized } => {
                self.maximize_requested(host, window, maximized);
                Dispatched::Handled
            }
            ShellEvent::MinimizeRequested { window } => {
                self.minimize_requested(window);
                Dispatched::Handled
            }
            ShellEvent::ResizeRequested { window } => {
                self.resize_requested(window);
                Dispatched::Handled
            }
            ShellEvent::MoveRequested { window, seat, request } => {
                Dispatched::Grab(self.move_requested(window, seat, request))
            }
            ShellEvent::XwaylandPositionSet { window, position } => {
                self.set_xwayland_position(window, position);
                Dispatched::Handled
            }
            ShellEvent::AppIdChanged { window, app_id } => {
                self.set_app_id(window, app_id);
                Dispatched::Handled
            }
            ShellEvent::OutputAdded { handle, name, geometry } => {
                Dispatched::Output(self.output_added(host, handle, name, geometry)?)
            }
            ShellEvent::OutputRemoved { output } => {
                self.output_removed(host, output);
                Dispatched::Handled
            }
            ShellEvent::OutputResized { output, geometry } => {
                self.output_resized(host, output, geometry);
                Dispatched::Handled
            }
            ShellEvent::OutputMoved { output, delta } => {
                self.output_moved(host, output, delta);
                Dispatched::Handled
            }
            ShellEvent::SeatAdded {
                handle,
                name,
                has_keyboard,
            } => Dispatched::Seat(self.seat_added(handle, name, has_keyboard)),
            ShellEvent::SeatCapabilitiesChanged { seat, has_keyboard } => {
                self.seat_capabilities_changed(seat, has_keyboard);
                Dispatched::Handled
            }
            ShellEvent::SeatRemoved { seat } => {
                self.seat_removed(host, seat);
                Dispatched::Handled
            }
            ShellEvent::KeyboardFocusChanged { seat, focus } => {
                self.keyboard_focus_changed(host, seat, focus);
                Dispatched::Handled
            }
            ShellEvent::PointerButton {
                seat,
                button,
                focus,
                default_grab,
            } => {
                self.pointer_button(host, seat, button, focus, default_grab);
                Dispatched::Handled
            }
            ShellEvent::TouchDown {
                seat,
                focus,
                default_grab,
            } => {
                self.touch_down(host, seat, focus, default_grab);
                Dispatched::Handled
            }
            ShellEvent::GrabMotion { seat, location } => {
                self.grab_motion(host, seat, location);
                Dispatched::Handled
            }
            ShellEvent::GrabReleased { seat } => {
                self.grab_released(seat);
                Dispatched::Handled
            }
        };
        Ok(dispatched)
    }
}
