//! Test assertions for shell state

use std::collections::HashSet;

use kiosk_shell::{Placement, Shell};

use crate::headless::TestShell;

/// Assert that every window's focus count equals the number of seats
/// focused on it
pub fn assert_focus_counts_consistent(shell: &Shell) {
    for (window, node) in shell.windows() {
        let seats = shell
            .seats()
            .iter()
            .filter(|(_, seat)| seat.focused_window() == Some(window))
            .count();
        assert_eq!(
            node.focus_count() as usize,
            seats,
            "window {:?} has focus count {} but {} seats focus it",
            window,
            node.focus_count(),
            seats
        );
    }
}

/// Assert that no window with a parent is fullscreen or maximized
pub fn assert_no_fullscreen_children(shell: &Shell) {
    for (window, node) in shell.windows() {
        if !node.is_root() {
            assert_eq!(
                node.placement(),
                Placement::Normal,
                "child window {:?} (parent {:?}) must be normal",
                window,
                node.parent()
            );
        }
    }
}

/// Assert that the host shows a window activated exactly while some seat
/// focuses it
pub fn assert_activation_matches_focus(tc: &TestShell) {
    for (window, node) in tc.shell.windows() {
        assert_eq!(
            tc.host.is_activated(node.surface()),
            node.focus_count() > 0,
            "window {:?} activation disagrees with focus count {}",
            window,
            node.focus_count()
        );
    }
}

/// Assert that the stacking list holds each mapped window exactly once
pub fn assert_stacking_consistent(shell: &Shell) {
    let stacked: HashSet<_> = shell.stacking().iter().copied().collect();
    assert_eq!(stacked.len(), shell.stacking().len(), "stacking list has duplicates");

    let mapped: HashSet<_> = shell
        .windows()
        .filter(|(_, node)| node.is_mapped())
        .map(|(id, _)| id)
        .collect();
    assert_eq!(stacked, mapped, "stacking list must hold exactly the mapped windows");
}

/// Assert that output bindings and parent links only name live records,
/// and that the child index agrees with the parent links
pub fn assert_links_live(shell: &Shell) {
    for (window, node) in shell.windows() {
        if let Some(output) = node.bound_output() {
            assert!(
                shell.outputs().contains(output),
                "window {:?} bound to dead output {:?}",
                window,
                output
            );
        }
        if let Some(parent) = node.parent() {
            assert!(
                shell.window(parent).is_some(),
                "window {:?} has dead parent {:?}",
                window,
                parent
            );
            assert!(
                shell.children(parent).contains(&window),
                "window {:?} missing from children of {:?}",
                window,
                parent
            );
        }
        for child in shell.children(window) {
            assert_eq!(
                shell.window(*child).and_then(|c| c.parent()),
                Some(window),
                "child index lists {:?} under {:?} but its parent differs",
                child,
                window
            );
        }
    }
}

/// Run every cross-record check
pub fn assert_shell_consistent(tc: &TestShell) {
    assert_focus_counts_consistent(&tc.shell);
    assert_no_fullscreen_children(&tc.shell);
    assert_activation_matches_focus(tc);
    assert_stacking_consistent(&tc.shell);
    assert_links_live(&tc.shell);
}
