//! Seat focus records
//!
//! One [`SeatFocus`] per input seat, holding the window its keyboard is
//! focused on. The focus bookkeeping itself (activation, focus counts) lives
//! in `shell::seats` because it touches window records.

use slotmap::SlotMap;

use crate::host::SeatHandle;
use crate::signal::Subscription;
use crate::window::WindowId;

slotmap::new_key_type! {
    /// Stable handle to a seat record
    pub struct SeatId;
}

/// Keyboard focus state of one seat
#[derive(Debug)]
pub struct SeatFocus {
    pub(crate) handle: SeatHandle,
    pub(crate) name: String,
    /// Focus-change events are only listened to while the seat has a keyboard
    pub(crate) keyboard_listener: bool,
    pub(crate) focused: Option<Subscription<WindowId>>,
}

impl SeatFocus {
    pub(crate) fn new(handle: SeatHandle, name: String, has_keyboard: bool) -> Self {
        Self {
            handle,
            name,
            keyboard_listener: has_keyboard,
            focused: None,
        }
    }

    pub fn handle(&self) -> SeatHandle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_keyboard(&self) -> bool {
        self.keyboard_listener
    }

    pub fn focused_window(&self) -> Option<WindowId> {
        self.focused.map(|sub| sub.source)
    }
}

/// Seats in creation order
#[derive(Debug, Default)]
pub struct SeatFocusTracker {
    seats: SlotMap<SeatId, SeatFocus>,
    order: Vec<SeatId>,
}

impl SeatFocusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, seat: SeatFocus) -> SeatId {
        let id = self.seats.insert(seat);
        self.order.push(id);
        id
    }

    pub(crate) fn remove(&mut self, id: SeatId) -> Option<SeatFocus> {
        let seat = self.seats.remove(id)?;
        self.order.retain(|s| *s != id);
        Some(seat)
    }

    pub fn get(&self, id: SeatId) -> Option<&SeatFocus> {
        self.seats.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: SeatId) -> Option<&mut SeatFocus> {
        self.seats.get_mut(id)
    }

    /// Seats in creation order
    pub fn iter(&self) -> impl Iterator<Item = (SeatId, &SeatFocus)> {
        self.order
            .iter()
            .filter_map(|id| self.seats.get(*id).map(|seat| (*id, seat)))
    }

    /// Seats with a keyboard, in creation order
    pub fn keyboard_seats(&self) -> Vec<SeatId> {
        self.iter()
            .filter(|(_, seat)| seat.keyboard_listener)
            .map(|(id, _)| id)
            .collect()
    }

    /// Seats whose keyboard focus is `window`
    pub fn focused_on(&self, window: WindowId) -> Vec<SeatId> {
        self.iter()
            .filter(|(_, seat)| seat.focused_window() == Some(window))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
