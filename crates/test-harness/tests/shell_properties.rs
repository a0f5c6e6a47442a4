//! Property-based tests for shell state invariants
//!
//! These tests verify that cross-record invariants hold across arbitrary
//! sequences of window, output and seat events, stale ids included.

use kiosk_shell::{Commit, OutputId, Placement, SeatId, WindowId};
use proptest::prelude::*;
use test_harness::assertions::assert_shell_consistent;
use test_harness::TestShell;

#[derive(Debug, Clone)]
enum Op {
    AddWindow { parent: Option<usize>, app_id: Option<usize> },
    Map { window: usize, width: i32, height: i32 },
    Remove { window: usize },
    Focus { seat: usize, window: Option<usize> },
    Click { seat: usize, window: usize },
    Caps { seat: usize, has_keyboard: bool },
    Reparent { window: usize, parent: Option<usize> },
    Fullscreen { window: usize, fullscreen: bool },
    Maximize { window: usize, maximized: bool },
    AddOutput,
    RemoveOutput { output: usize },
}

const APP_IDS: [&str; 3] = ["vlc", "browser", "mpv"];

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (proptest::option::of(0usize..16), proptest::option::of(0usize..APP_IDS.len()))
            .prop_map(|(parent, app_id)| Op::AddWindow { parent, app_id }),
        4 => (0usize..16, 0i32..2000, 1i32..2000).prop_map(|(window, width, height)| Op::Map { window, width, height }),
        2 => (0usize..16).prop_map(|window| Op::Remove { window }),
        3 => (0usize..3, proptest::option::of(0usize..16)).prop_map(|(seat, window)| Op::Focus { seat, window }),
        2 => (0usize..3, 0usize..16).prop_map(|(seat, window)| Op::Click { seat, window }),
        1 => (0usize..3, any::<bool>()).prop_map(|(seat, has_keyboard)| Op::Caps { seat, has_keyboard }),
        2 => (0usize..16, proptest::option::of(0usize..16)).prop_map(|(window, parent)| Op::Reparent { window, parent }),
        1 => (0usize..16, any::<bool>()).prop_map(|(window, fullscreen)| Op::Fullscreen { window, fullscreen }),
        1 => (0usize..16, any::<bool>()).prop_map(|(window, maximized)| Op::Maximize { window, maximized }),
        1 => Just(Op::AddOutput),
        1 => (0usize..4).prop_map(|output| Op::RemoveOutput { output }),
    ]
}

/// Shell plus every id ever handed out, dead ones included
struct World {
    tc: TestShell,
    windows: Vec<WindowId>,
    outputs: Vec<OutputId>,
    seats: Vec<SeatId>,
}

fn pick<T: Copy>(items: &[T], index: usize) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[index % items.len()])
    }
}

impl World {
    fn new() -> Self {
        let mut tc = TestShell::with_config(test_harness::fixtures::config_with_affinity("HDMI-A-1", "vlc,mpv"));
        let outputs = vec![tc.add_output("DP-1", 1920, 1080), tc.add_output("HDMI-A-1", 1280, 720)];
        let seats = vec![
            tc.add_seat("seat0"),
            tc.add_seat("seat1"),
            tc.add_seat_with("pointer-only", false),
        ];
        Self {
            tc,
            windows: Vec::new(),
            outputs,
            seats,
        }
    }

    fn apply(&mut self, op: &Op) {
        match *op {
            Op::AddWindow { parent, app_id } => {
                let parent = parent.and_then(|p| pick(&self.windows, p));
                let app_id = app_id.map(|i| APP_IDS[i]);
                let window = match parent {
                    Some(parent) => self.tc.add_child(parent, app_id),
                    None => self.tc.add_window(app_id),
                };
                self.windows.push(window);
            }
            Op::Map { window, width, height } => {
                if let Some(window) = pick(&self.windows, window) {
                    self.tc.commit(window, Commit::new(width, height));
                }
            }
            Op::Remove { window } => {
                if let Some(window) = pick(&self.windows, window) {
                    self.tc.remove(window);
                }
            }
            Op::Focus { seat, window } => {
                let seat = self.seats[seat];
                let window = window.and_then(|w| pick(&self.windows, w));
                self.tc.report_focus(seat, window);
            }
            Op::Click { seat, window } => {
                let seat = self.seats[seat];
                if let Some(window) = pick(&self.windows, window) {
                    self.tc.click(seat, window);
                }
            }
            Op::Caps { seat, has_keyboard } => {
                self.tc.shell.seat_capabilities_changed(self.seats[seat], has_keyboard);
            }
            Op::Reparent { window, parent } => {
                if let Some(window) = pick(&self.windows, window) {
                    let parent = parent.and_then(|p| pick(&self.windows, p));
                    self.tc.shell.set_parent(&mut self.tc.host, window, parent);
                }
            }
            Op::Fullscreen { window, fullscreen } => {
                if let Some(window) = pick(&self.windows, window) {
                    self.tc.shell.fullscreen_requested(&mut self.tc.host, window, fullscreen, None);
                }
            }
            Op::Maximize { window, maximized } => {
                if let Some(window) = pick(&self.windows, window) {
                    self.tc.shell.maximize_requested(&mut self.tc.host, window, maximized);
                }
            }
            Op::AddOutput => {
                let name = format!("DP-{}", self.outputs.len() + 1);
                self.outputs.push(self.tc.add_output(&name, 1024, 768));
            }
            Op::RemoveOutput { output } => {
                if let Some(output) = pick(&self.outputs, output) {
                    self.tc.remove_output(output);
                }
            }
        }
    }
}

proptest! {
    /// Focus counts, activation, stacking, links and child placement stay
    /// consistent after every event
    #[test]
    fn invariants_hold_after_every_event(ops in prop::collection::vec(op(), 1..60)) {
        let mut world = World::new();
        for op in &ops {
            world.apply(op);
            assert_shell_consistent(&world.tc);
        }
    }

    /// Focus count never exceeds the number of seats
    #[test]
    fn focus_count_bounded_by_seats(ops in prop::collection::vec(op(), 1..60)) {
        let mut world = World::new();
        for op in &ops {
            world.apply(op);
        }
        let seats = world.seats.len() as u32;
        for (window, node) in world.tc.shell.windows() {
            prop_assert!(
                node.focus_count() <= seats,
                "window {:?} focused by {} seats, only {} exist",
                window,
                node.focus_count(),
                seats
            );
        }
    }

    /// A seat without a keyboard keeps its focus record until the window
    /// goes away
    #[test]
    fn keyboardless_seat_ignores_focus_reports(
        ops in prop::collection::vec(op(), 1..40),
        target in 0usize..16,
    ) {
        let mut world = World::new();
        for op in &ops {
            world.apply(op);
        }
        let seat = world.seats[2];
        world.tc.shell.seat_capabilities_changed(seat, false);
        let before = world.tc.snapshot();
        let commands = world.tc.host.commands().len();

        let window = pick(&world.windows, target);
        world.tc.report_focus(seat, window);

        prop_assert_eq!(world.tc.snapshot(), before);
        prop_assert_eq!(world.tc.host.commands().len(), commands);
        assert_shell_consistent(&world.tc);
    }

    /// Children are never output-sized, whatever was requested
    #[test]
    fn children_stay_normal(ops in prop::collection::vec(op(), 1..60)) {
        let mut world = World::new();
        for op in &ops {
            world.apply(op);
            for (window, node) in world.tc.shell.windows() {
                if !node.is_root() {
                    prop_assert_eq!(node.placement(), Placement::Normal, "child {:?}", window);
                }
            }
        }
    }

    /// The same event sequence always produces the same host commands
    #[test]
    fn event_handling_is_deterministic(ops in prop::collection::vec(op(), 1..40)) {
        let mut first = World::new();
        let mut second = World::new();
        for op in &ops {
            first.apply(op);
            second.apply(op);
        }
        prop_assert_eq!(first.tc.host.commands(), second.tc.host.commands());
        prop_assert_eq!(first.tc.snapshot(), second.tc.snapshot());
    }

    /// set_normal applied twice leaves the same state as applied once
    #[test]
    fn set_normal_is_idempotent(
        ops in prop::collection::vec(op(), 1..40),
        target in 0usize..16,
    ) {
        let mut world = World::new();
        for op in &ops {
            world.apply(op);
        }
        let Some(window) = pick(&world.windows, target) else {
            return Ok(());
        };

        world.tc.host.take_commands();
        world.tc.shell.set_normal(&mut world.tc.host, window);
        let once = world.tc.snapshot();
        let first = world.tc.host.take_commands();
        world.tc.shell.set_normal(&mut world.tc.host, window);
        prop_assert_eq!(world.tc.snapshot(), once);
        prop_assert_eq!(world.tc.host.take_commands(), first);
    }
}
