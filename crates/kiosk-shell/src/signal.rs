//! Destroy notification for weak links
//!
//! Every record that others may point at (windows, outputs) owns a
//! [`DestroySignal`]. Whoever holds a link to it subscribes a [`Listener`] and
//! keeps the returned token next to the link in a [`Subscription`]. When the
//! record goes away the shell drains the signal and runs each listener, which
//! clears or redirects the link before anything else can observe it.

use crate::seat::SeatId;
use crate::window::WindowId;

/// Identifies one subscription on one signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerToken(u64);

/// What to do when the observed record is destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listener {
    /// Child window: re-parent to the destroyed window's own parent
    Parent(WindowId),
    /// Window bound to an output: clear the binding
    BoundOutput(WindowId),
    /// Seat whose keyboard focus is the destroyed window: clear the focus
    SeatFocus(SeatId),
    /// Seat dragging the destroyed window: end the grab
    Grab(SeatId),
}

/// A weak link to a record of key type `K` plus its destroy subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription<K> {
    pub source: K,
    pub token: ListenerToken,
}

/// Ordered publish/subscribe list fired once, on destruction
#[derive(Debug, Default)]
pub struct DestroySignal {
    next_token: u64,
    listeners: Vec<(ListenerToken, Listener)>,
}

impl DestroySignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener. Listeners fire in subscription order.
    pub fn subscribe(&mut self, listener: Listener) -> ListenerToken {
        let token = ListenerToken(self.next_token);
        self.next_token += 1;
        self.listeners.push((token, listener));
        token
    }

    /// Remove a listener. Returns false if the token was not subscribed.
    pub fn unsubscribe(&mut self, token: ListenerToken) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(t, _)| *t != token);
        self.listeners.len() != before
    }

    /// Detach every listener for emission.
    ///
    /// The list is emptied first so a listener that unsubscribes (or
    /// subscribes) while the signal is being emitted cannot disturb it.
    pub fn take(&mut self) -> Vec<Listener> {
        std::mem::take(&mut self.listeners)
            .into_iter()
            .map(|(_, listener)| listener)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
