//! Shell wrapper for testing
//!
//! [`TestShell`] bundles a [`Shell`] with the recording [`HeadlessHost`] and
//! adds helpers for the common event sequences.

use kiosk_shell::grab::{GrabOutcome, MoveRequest, PointerGrabState};
use kiosk_shell::headless::HeadlessHost;
use kiosk_shell::{
    Commit, Config, OutputHandle, OutputId, Placement, SeatHandle, SeatId, Shell, ShellError, SurfaceHandle,
    ViewHandle, WindowId,
};
use smithay::utils::{Logical, Point, Rectangle};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestError {
    #[error("unknown window {0:?}")]
    UnknownWindow(WindowId),

    #[error("shell error: {0}")]
    Shell(#[from] ShellError),
}

/// Snapshot of shell state for assertions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellSnapshot {
    pub window_count: usize,

    pub output_count: usize,

    /// Mapped windows, front to back
    pub stacking: Vec<WindowId>,

    /// (window, placement, bound output, focus count), in arena order
    pub windows: Vec<(WindowId, Placement, Option<OutputId>, u32)>,

    /// Focused window per seat, in seat creation order
    pub seat_focus: Vec<(SeatId, Option<WindowId>)>,
}

/// A shell wired to a headless host
pub struct TestShell {
    pub shell: Shell,
    pub host: HeadlessHost,
    next_surface: u64,
    next_output: u64,
    next_seat: u64,
    /// Left edge for the next output added with [`TestShell::add_output`]
    next_output_x: i32,
}

impl Default for TestShell {
    fn default() -> Self {
        Self::new()
    }
}

impl TestShell {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            shell: Shell::new(config),
            host: HeadlessHost::new(),
            next_surface: 0,
            next_output: 0,
            next_seat: 0,
            next_output_x: 0,
        }
    }

    /// Add an output to the right of the previous ones
    pub fn add_output(&mut self, name: &str, width: i32, height: i32) -> OutputId {
        let x = self.next_output_x;
        self.add_output_at(name, Rectangle::new((x, 0).into(), (width, height).into()))
    }

    pub fn add_output_at(&mut self, name: &str, geometry: Rectangle<i32, Logical>) -> OutputId {
        self.try_add_output(name, geometry)
            .unwrap_or_else(|e| panic!("failed to add output {name}: {e}"))
    }

    pub fn try_add_output(&mut self, name: &str, geometry: Rectangle<i32, Logical>) -> Result<OutputId, TestError> {
        self.next_output += 1;
        let handle = OutputHandle(self.next_output);
        let output = self
            .shell
            .output_added(&mut self.host, handle, name.to_string(), geometry)?;
        self.next_output_x = self.next_output_x.max(geometry.loc.x + geometry.size.w);
        Ok(output)
    }

    pub fn remove_output(&mut self, output: OutputId) {
        self.shell.output_removed(&mut self.host, output);
    }

    /// Add a seat with a keyboard
    pub fn add_seat(&mut self, name: &str) -> SeatId {
        self.add_seat_with(name, true)
    }

    pub fn add_seat_with(&mut self, name: &str, has_keyboard: bool) -> SeatId {
        self.next_seat += 1;
        self.shell
            .seat_added(SeatHandle(self.next_seat), name.to_string(), has_keyboard)
    }

    pub fn remove_seat(&mut self, seat: SeatId) {
        self.shell.seat_removed(&mut self.host, seat);
    }

    /// Add a root window (created, placed and focused, not yet mapped)
    pub fn add_window(&mut self, app_id: Option<&str>) -> WindowId {
        self.try_add_window(app_id, None)
            .unwrap_or_else(|e| panic!("failed to add window: {e}"))
    }

    pub fn add_child(&mut self, parent: WindowId, app_id: Option<&str>) -> WindowId {
        self.try_add_window(app_id, Some(parent))
            .unwrap_or_else(|e| panic!("failed to add child of {parent:?}: {e}"))
    }

    pub fn try_add_window(&mut self, app_id: Option<&str>, parent: Option<WindowId>) -> Result<WindowId, TestError> {
        self.next_surface += 1;
        let surface = SurfaceHandle(self.next_surface);
        let window = self
            .shell
            .window_added(&mut self.host, surface, app_id.map(str::to_string), parent)?;
        Ok(window)
    }

    /// Add a root window and map it at `width` x `height`
    pub fn add_mapped_window(&mut self, app_id: Option<&str>, width: i32, height: i32) -> WindowId {
        let window = self.add_window(app_id);
        self.map(window, width, height);
        window
    }

    pub fn add_mapped_child(&mut self, parent: WindowId, width: i32, height: i32) -> WindowId {
        let window = self.add_child(parent, None);
        self.map(window, width, height);
        window
    }

    /// Commit a buffer of the given size
    pub fn map(&mut self, window: WindowId, width: i32, height: i32) {
        self.commit(window, Commit::new(width, height));
    }

    pub fn commit(&mut self, window: WindowId, commit: Commit) {
        self.shell.window_committed(&mut self.host, window, commit);
    }

    pub fn remove(&mut self, window: WindowId) {
        self.shell.window_removed(&mut self.host, window);
    }

    /// Focus `window` on `seat` the way a click would
    pub fn focus(&mut self, seat: SeatId, window: Option<WindowId>) {
        self.shell.focus_seat(&mut self.host, seat, window);
    }

    /// Report a compositor-initiated keyboard focus change
    pub fn report_focus(&mut self, seat: SeatId, window: Option<WindowId>) {
        self.shell.keyboard_focus_changed(&mut self.host, seat, window);
    }

    pub fn click(&mut self, seat: SeatId, window: WindowId) {
        self.shell
            .pointer_button(&mut self.host, seat, kiosk_shell::shell::BTN_LEFT, Some(window), true);
    }

    /// Press the left button on `window` at `location` and ask to move it
    pub fn start_pointer_move(&mut self, seat: SeatId, window: WindowId, location: (i32, i32)) -> GrabOutcome {
        let request = MoveRequest {
            serial: 7,
            pointer: Some(PointerGrabState {
                focus: Some(window),
                button_count: 1,
                grab_serial: 7,
                location: location.into(),
            }),
            touch: None,
        };
        self.shell.move_requested(window, seat, request)
    }

    pub fn surface(&self, window: WindowId) -> SurfaceHandle {
        self.shell
            .window(window)
            .map(|node| node.surface())
            .unwrap_or_else(|| panic!("no window {window:?}"))
    }

    pub fn view(&self, window: WindowId) -> ViewHandle {
        self.shell
            .window(window)
            .map(|node| node.view())
            .unwrap_or_else(|| panic!("no window {window:?}"))
    }

    pub fn placement(&self, window: WindowId) -> Option<Placement> {
        self.shell.window(window).map(|node| node.placement())
    }

    pub fn bound_output(&self, window: WindowId) -> Option<OutputId> {
        self.shell.window(window).and_then(|node| node.bound_output())
    }

    pub fn focus_count(&self, window: WindowId) -> u32 {
        self.shell.window(window).map(|node| node.focus_count()).unwrap_or(0)
    }

    pub fn position(&self, window: WindowId) -> Option<Point<i32, Logical>> {
        self.shell.window_position(window)
    }

    pub fn snapshot(&self) -> ShellSnapshot {
        ShellSnapshot {
            window_count: self.shell.window_count(),
            output_count: self.shell.outputs().len(),
            stacking: self.shell.stacking().to_vec(),
            windows: self
                .shell
                .windows()
                .map(|(id, node)| (id, node.placement(), node.bound_output(), node.focus_count()))
                .collect(),
            seat_focus: self
                .shell
                .seats()
                .iter()
                .map(|(id, seat)| (id, seat.focused_window()))
                .collect(),
        }
    }
}
