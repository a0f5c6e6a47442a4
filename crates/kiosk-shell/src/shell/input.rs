//! Click/touch to activate and interactive move grabs

use smithay::utils::{Logical, Point};

use super::Shell;
use crate::grab::{GrabOutcome, MoveGrab, MoveRequest};
use crate::host::Host;
use crate::seat::SeatId;
use crate::signal::{Listener, Subscription};
use crate::window::WindowId;

/// Linux input event code of the primary pointer button
pub const BTN_LEFT: u32 = 0x110;
/// Linux input event code of the secondary pointer button
pub const BTN_RIGHT: u32 = 0x111;

impl Shell {
    /// A pointer button was pressed.
    ///
    /// `focus` is the main window under the pointer. `default_grab` is false
    /// while another grab (a drag, a popup) owns the pointer.
    pub fn pointer_button<H: Host>(
        &mut self,
        host: &mut H,
        seat: SeatId,
        button: u32,
        focus: Option<WindowId>,
        default_grab: bool,
    ) {
        if button != BTN_LEFT && button != BTN_RIGHT {
            return;
        }
        if !default_grab {
            return;
        }
        let Some(window) = focus else { return };
        self.activate_window(host, seat, window);
    }

    /// A touch point went down on `focus`.
    pub fn touch_down<H: Host>(&mut self, host: &mut H, seat: SeatId, focus: Option<WindowId>, default_grab: bool) {
        if !default_grab {
            return;
        }
        let Some(window) = focus else { return };
        self.activate_window(host, seat, window);
    }

    /// Raise (children only) and focus `window` for `seat`.
    ///
    /// Roots stay where they are: raising one would hide its children.
    pub fn activate_window<H: Host>(&mut self, host: &mut H, seat: SeatId, window: WindowId) {
        let Some(node) = self.windows.get(window) else {
            tracing::trace!(?window, "activation of unknown window ignored");
            return;
        };

        if !node.is_root() && node.mapped {
            host.raise_view(node.view);
            self.stacking.retain(|w| *w != window);
            self.stacking.insert(0, window);
        }

        self.focus_seat(host, seat, Some(window));
    }

    /// Client asked to be dragged by `seat`.
    ///
    /// Starts a move only when the request matches the seat's current
    /// implicit grab on this window, and the window is Normal and not
    /// already being dragged.
    pub fn move_requested(&mut self, window: WindowId, seat: SeatId, request: MoveRequest) -> GrabOutcome {
        let Some(node) = self.windows.get(window) else {
            return GrabOutcome::Ignored;
        };
        let Some((kind, location)) = request.grab_for(window) else {
            return GrabOutcome::Ignored;
        };
        if node.placement.fills_output() || self.grabbing_seat(window).is_some() || self.grabs.contains_key(seat) {
            tracing::debug!(?window, ?seat, "move request ignored");
            return GrabOutcome::Ignored;
        }
        if self.seats.get(seat).is_none() {
            return GrabOutcome::Ignored;
        }

        let offset = node.position - location;
        let Some(node) = self.windows.get_mut(window) else {
            return GrabOutcome::Ignored;
        };
        let token = node.destroy_signal.subscribe(Listener::Grab(seat));
        self.grabs.insert(
            seat,
            MoveGrab {
                kind,
                window: Subscription { source: window, token },
                offset,
            },
        );
        tracing::debug!(?window, ?seat, ?kind, "move grab started");
        GrabOutcome::Started(kind)
    }

    /// The grabbing device moved to `location`.
    pub fn grab_motion<H: Host>(&mut self, host: &mut H, seat: SeatId, location: Point<i32, Logical>) {
        let Some(grab) = self.grabs.get(seat).copied() else {
            return;
        };
        self.move_view(host, grab.window.source, location + grab.offset);
    }

    /// The grabbing button or touch point was released.
    pub fn grab_released(&mut self, seat: SeatId) {
        self.end_grab(seat);
    }

    pub(crate) fn end_grab(&mut self, seat: SeatId) {
        let Some(grab) = self.grabs.remove(seat) else {
            return;
        };
        if let Some(node) = self.windows.get_mut(grab.window.source) {
            node.destroy_signal.unsubscribe(grab.window.token);
        }
        tracing::debug!(?seat, window = ?grab.window.source, kind = ?grab.kind, "move grab ended");
    }
}
