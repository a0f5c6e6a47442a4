//! Shell state machine
//!
//! Owns the window, output and seat records and applies every compositor
//! event to them synchronously.
//!
//! # Responsibilities
//!
//! - Window lifecycle and placement (see `windows.rs`)
//! - Output lifecycle, resize and move (see `outputs.rs`)
//! - Seat focus bookkeeping and activation (see `seats.rs`)
//! - Click/touch activation and move grabs (see `input.rs`)
//!
//! # NOT Responsible For
//!
//! - Choosing outputs (see `placement.rs` - pure functions)
//! - Choosing focus successors (see `focus.rs` - pure function)
//! - Anything drawn or routed by the compositor (see `host.rs`)

mod input;
mod outputs;
mod seats;
mod windows;

use slotmap::{SecondaryMap, SlotMap};
use thiserror::Error;

use crate::config::Config;
use crate::grab::MoveGrab;
use crate::hierarchy::{self, ChildIndex};
use crate::output::{OutputId, OutputRegistry};
use crate::placement::{self, OutputQuery};
use crate::seat::{SeatFocusTracker, SeatId};
use crate::window::{WindowId, WindowNode};

pub use input::{BTN_LEFT, BTN_RIGHT};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// A side record or view could not be allocated; the event was dropped
    #[error("no memory to allocate {what}")]
    NoMemory { what: &'static str },
}

/// Main shell state
pub struct Shell {
    config: Config,

    /// All window records
    windows: SlotMap<WindowId, WindowNode>,

    /// parent -> children
    children: ChildIndex,

    /// Mapped windows, front to back
    ///
    /// INVARIANT: contains exactly the live windows with `mapped == true`.
    stacking: Vec<WindowId>,

    outputs: OutputRegistry,

    seats: SeatFocusTracker,

    /// Active move grabs by seat
    grabs: SecondaryMap<SeatId, MoveGrab>,
}

impl Shell {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            windows: SlotMap::with_key(),
            children: ChildIndex::new(),
            stacking: Vec::new(),
            outputs: OutputRegistry::new(),
            seats: SeatFocusTracker::new(),
            grabs: SecondaryMap::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn window(&self, window: WindowId) -> Option<&WindowNode> {
        self.windows.get(window)
    }

    pub fn windows(&self) -> impl Iterator<Item = (WindowId, &WindowNode)> {
        self.windows.iter()
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub fn outputs(&self) -> &OutputRegistry {
        &self.outputs
    }

    pub fn seats(&self) -> &SeatFocusTracker {
        &self.seats
    }

    /// Mapped windows, front to back
    pub fn stacking(&self) -> &[WindowId] {
        &self.stacking
    }

    pub fn children(&self, window: WindowId) -> &[WindowId] {
        self.children.children(window)
    }

    pub fn root_of(&self, window: WindowId) -> Option<WindowId> {
        hierarchy::root_of(&self.windows, window)
    }

    /// Seat currently dragging `window`, if any
    pub fn grabbing_seat(&self, window: WindowId) -> Option<SeatId> {
        self.grabs
            .iter()
            .find(|(_, grab)| grab.window.source == window)
            .map(|(seat, _)| seat)
    }

    /// The output holding input focus: the output of the window focused by
    /// the first seat (in creation order) whose focused window is placed.
    pub fn focused_output(&self) -> Option<OutputId> {
        self.seats
            .iter()
            .filter_map(|(_, seat)| seat.focused_window())
            .filter_map(|window| self.windows.get(window))
            .find_map(WindowNode::bound_output)
    }

    /// Where `window` should go if it had to be placed now
    pub fn find_best_output(&self, window: WindowId) -> Option<OutputId> {
        let node = self.windows.get(window)?;
        let root_output = self
            .root_of(window)
            .and_then(|root| self.windows.get(root))
            .and_then(WindowNode::bound_output);
        let query = OutputQuery {
            bound_output: node.bound_output(),
            app_id: node.app_id(),
            root_output,
            focused_output: self.focused_output(),
        };
        placement::find_best_output(&query, &self.outputs)
    }
}
