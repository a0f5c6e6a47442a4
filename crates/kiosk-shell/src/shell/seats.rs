//! Seat lifecycle and keyboard focus bookkeeping

use super::Shell;
use crate::host::{Host, SeatHandle};
use crate::seat::{SeatFocus, SeatId};
use crate::signal::{Listener, Subscription};
use crate::window::WindowId;

impl Shell {
    pub fn seat_added(&mut self, handle: SeatHandle, name: String, has_keyboard: bool) -> SeatId {
        let seat = self.seats.insert(SeatFocus::new(handle, name, has_keyboard));
        tracing::info!(?seat, ?handle, has_keyboard, "seat added");
        seat
    }

    /// The seat gained or lost its keyboard.
    ///
    /// Focus changes are only tracked while a keyboard is present. Losing the
    /// keyboard keeps the last focus record as it is.
    pub fn seat_capabilities_changed(&mut self, seat: SeatId, has_keyboard: bool) {
        let Some(record) = self.seats.get_mut(seat) else {
            return;
        };
        if record.keyboard_listener != has_keyboard {
            tracing::debug!(?seat, has_keyboard, "seat keyboard capability changed");
        }
        record.keyboard_listener = has_keyboard;
    }

    /// The seat went away: release its focus and any grab it holds.
    pub fn seat_removed<H: Host>(&mut self, host: &mut H, seat: SeatId) {
        self.release_focus(host, seat);
        self.end_grab(seat);
        if self.seats.remove(seat).is_some() {
            tracing::info!(?seat, "seat removed");
        }
    }

    pub fn focused_window(&self, seat: SeatId) -> Option<WindowId> {
        self.seats.get(seat).and_then(SeatFocus::focused_window)
    }

    /// Move `seat`'s keyboard focus to `window` and update activation.
    ///
    /// Does nothing for seats without a keyboard.
    pub fn focus_seat<H: Host>(&mut self, host: &mut H, seat: SeatId, window: Option<WindowId>) {
        let Some(record) = self.seats.get(seat) else {
            return;
        };
        if !record.keyboard_listener {
            return;
        }
        let handle = record.handle;
        let surface = window.and_then(|w| self.windows.get(w)).map(|node| node.surface);
        host.set_keyboard_focus(handle, surface);
        self.keyboard_focus_changed(host, seat, window);
    }

    /// The compositor reports a new keyboard focus for `seat`.
    ///
    /// `focus` is the main window of the focused surface (child surfaces
    /// report through their main window). Stale or unknown windows count as
    /// no focus. A window is activated when its first seat focuses it and
    /// deactivated when its last seat leaves.
    pub fn keyboard_focus_changed<H: Host>(&mut self, host: &mut H, seat: SeatId, focus: Option<WindowId>) {
        let Some(record) = self.seats.get(seat) else {
            tracing::trace!(?seat, "focus change for unknown seat ignored");
            return;
        };
        if !record.keyboard_listener {
            return;
        }

        let focus = focus.filter(|w| self.windows.contains_key(*w));
        if record.focused_window() == focus {
            return;
        }

        self.release_focus(host, seat);

        let Some(window) = focus else { return };
        let Some(node) = self.windows.get_mut(window) else {
            return;
        };
        let token = node.destroy_signal.subscribe(Listener::SeatFocus(seat));
        if node.focus_count == 0 {
            host.set_activated(node.surface, true);
        }
        node.focus_count += 1;
        if let Some(record) = self.seats.get_mut(seat) {
            record.focused = Some(Subscription { source: window, token });
        }
        tracing::debug!(?seat, ?window, focus_count = node.focus_count, "keyboard focus gained");
    }

    /// Drop the seat's focus record, deactivating the window if no other seat
    /// still focuses it.
    fn release_focus<H: Host>(&mut self, host: &mut H, seat: SeatId) {
        let Some(previous) = self.seats.get_mut(seat).and_then(|record| record.focused.take()) else {
            return;
        };
        let Some(node) = self.windows.get_mut(previous.source) else {
            return;
        };
        node.destroy_signal.unsubscribe(previous.token);
        node.focus_count = node.focus_count.saturating_sub(1);
        if node.focus_count == 0 {
            host.set_activated(node.surface, false);
        }
        tracing::debug!(?seat, window = ?previous.source, focus_count = node.focus_count, "keyboard focus lost");
    }
}
