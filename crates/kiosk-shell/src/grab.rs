//! Interactive move grabs
//!
//! A client may ask to be dragged while the user holds a pointer button or a
//! touch point on it. The request carries the serial of the input event that
//! started the implicit grab; requests that do not match the seat's current
//! implicit grab are ignored.

use smithay::utils::{Logical, Point};

use crate::signal::Subscription;
use crate::window::WindowId;

/// Pointer state of the requesting seat
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerGrabState {
    /// Main window under the pointer
    pub focus: Option<WindowId>,
    /// Buttons currently held
    pub button_count: u32,
    /// Serial of the event that started the implicit grab
    pub grab_serial: u32,
    pub location: Point<i32, Logical>,
}

/// Touch state of the requesting seat
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchGrabState {
    /// Main window under the first touch point
    pub focus: Option<WindowId>,
    pub grab_serial: u32,
    pub location: Point<i32, Logical>,
}

/// A client's request to start an interactive move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRequest {
    pub serial: u32,
    pub pointer: Option<PointerGrabState>,
    pub touch: Option<TouchGrabState>,
}

/// Device driving a move grab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabKind {
    Pointer,
    Touch,
}

/// Result of a move request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabOutcome {
    Started(GrabKind),
    Ignored,
}

/// An active move grab, keyed by seat in the shell
#[derive(Debug, Clone, Copy)]
pub(crate) struct MoveGrab {
    pub(crate) kind: GrabKind,
    pub(crate) window: Subscription<WindowId>,
    /// View position minus grab location at grab start
    pub(crate) offset: Point<i32, Logical>,
}

impl MoveRequest {
    /// The device whose implicit grab this request belongs to, with its
    /// location, if the grab targets `window`.
    pub(crate) fn grab_for(&self, window: WindowId) -> Option<(GrabKind, Point<i32, Logical>)> {
        if let Some(pointer) = self.pointer {
            if pointer.focus.is_some() && pointer.button_count > 0 && pointer.grab_serial == self.serial {
                return (pointer.focus == Some(window)).then_some((GrabKind::Pointer, pointer.location));
            }
        }
        if let Some(touch) = self.touch {
            if touch.focus.is_some() && touch.grab_serial == self.serial {
                return (touch.focus == Some(window)).then_some((GrabKind::Touch, touch.location));
            }
        }
        None
    }
}
