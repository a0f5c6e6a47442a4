//! Output selection and client placement requests

use kiosk_shell::{Config, Placement};
use smithay::utils::Size;
use test_harness::assertions::assert_shell_consistent;
use test_harness::fixtures::{self, config_with_affinity, TEST_HEIGHT, TEST_WIDTH};
use test_harness::{HostCommand, TestShell};

// ========== Output selection ==========

#[test]
fn affinity_match_is_whole_token() {
    // No seat, so focus never picks the output
    let mut tc = TestShell::with_config(config_with_affinity("HDMI-A-1", "vlc,mpv"));
    let primary = tc.add_output("DP-1", TEST_WIDTH, TEST_HEIGHT);
    let media = tc.add_output("HDMI-A-1", 1280, 720);

    let vlc = tc.add_window(Some("vlc"));
    let mpv = tc.add_window(Some("mpv"));
    let partial = tc.add_window(Some("vl"));
    let joined = tc.add_window(Some("vlc,mpv"));

    assert_eq!(tc.bound_output(vlc), Some(media));
    assert_eq!(tc.bound_output(mpv), Some(media));
    assert_eq!(tc.bound_output(partial), Some(primary));
    assert_eq!(tc.bound_output(joined), Some(primary));
}

#[test]
fn window_without_app_id_goes_to_focused_output() {
    let (mut tc, [primary, media], _seat) = fixtures::dual_output_with_affinity();
    let player = tc.add_window(Some("vlc"));
    assert_eq!(tc.bound_output(player), Some(media));

    // The seat now focuses the player, so its output holds focus
    let plain = tc.add_window(None);
    assert_eq!(tc.bound_output(plain), Some(media));
    assert_ne!(tc.bound_output(plain), Some(primary));
}

#[test]
fn no_outputs_leaves_window_unbound() {
    let mut tc = TestShell::new();
    tc.add_seat("seat0");

    let w = tc.add_window(None);

    assert_eq!(tc.bound_output(w), None);
    assert_eq!(tc.placement(w), Some(Placement::Fullscreen));
    assert_eq!(
        tc.host.count(|c| matches!(c, HostCommand::SetSize { .. })),
        0,
        "no size can be configured without an output"
    );
    assert_shell_consistent(&tc);
}

#[test]
fn changed_app_id_does_not_move_bound_window() {
    let (mut tc, [primary, _media], _seat) = fixtures::dual_output_with_affinity();
    let w = tc.add_window(Some("browser"));
    assert_eq!(tc.bound_output(w), Some(primary));

    tc.shell.set_app_id(w, Some("vlc".to_string()));
    tc.shell.set_fullscreen(&mut tc.host, w, None);

    assert_eq!(tc.bound_output(w), Some(primary));
    assert_eq!(tc.shell.window(w).unwrap().app_id(), Some("vlc"));
}

#[test]
fn explicit_fullscreen_output_rebinds_root() {
    let (mut tc, [primary, media], _seat) = fixtures::dual_output_with_affinity();
    let w = tc.add_window(None);
    assert_eq!(tc.bound_output(w), Some(primary));

    tc.shell.fullscreen_requested(&mut tc.host, w, true, Some(media));

    assert_eq!(tc.bound_output(w), Some(media));
    assert_eq!(tc.host.size(tc.surface(w)), Some(Size::from((1280, 720))));
    assert_eq!(tc.shell.find_best_output(w), Some(media));
}

// ========== Client requests ==========

#[test]
fn unfullscreen_request_makes_root_normal() {
    let mut k = fixtures::kiosk();
    let w = k.tc.add_mapped_window(None, TEST_WIDTH, TEST_HEIGHT);

    k.tc.shell.fullscreen_requested(&mut k.tc.host, w, false, None);

    assert_eq!(k.tc.placement(w), Some(Placement::Normal));
    let surface = k.tc.surface(w);
    assert!(!k.tc.host.is_fullscreen(surface));
    assert_eq!(k.tc.host.size(surface), Some(Size::from((0, 0))));
    assert_eq!(k.tc.bound_output(w), Some(k.output));
}

#[test]
fn enforced_fullscreen_ignores_unfullscreen_and_maximize() {
    let mut k = fixtures::kiosk_with_config(Config {
        enforce_root_fullscreen: true,
        ..Default::default()
    });
    let w = k.tc.add_mapped_window(None, TEST_WIDTH, TEST_HEIGHT);

    k.tc.shell.fullscreen_requested(&mut k.tc.host, w, false, None);
    assert_eq!(k.tc.placement(w), Some(Placement::Fullscreen));

    k.tc.shell.maximize_requested(&mut k.tc.host, w, true);
    assert_eq!(k.tc.placement(w), Some(Placement::Fullscreen));
    assert!(!k.tc.host.is_maximized(k.tc.surface(w)));

    k.tc.shell.maximize_requested(&mut k.tc.host, w, false);
    assert_eq!(k.tc.placement(w), Some(Placement::Fullscreen));
}

#[test]
fn maximize_replaces_fullscreen() {
    let mut k = fixtures::kiosk();
    let w = k.tc.add_mapped_window(None, TEST_WIDTH, TEST_HEIGHT);
    let surface = k.tc.surface(w);

    k.tc.shell.maximize_requested(&mut k.tc.host, w, true);

    assert_eq!(k.tc.placement(w), Some(Placement::Maximized));
    assert!(k.tc.host.is_maximized(surface));
    assert!(!k.tc.host.is_fullscreen(surface));
    assert_eq!(k.tc.host.size(surface), Some(Size::from((TEST_WIDTH, TEST_HEIGHT))));

    k.tc.shell.fullscreen_requested(&mut k.tc.host, w, true, None);
    assert_eq!(k.tc.placement(w), Some(Placement::Fullscreen));
    assert!(!k.tc.host.is_maximized(surface));
    assert!(k.tc.host.is_fullscreen(surface));
}

#[test]
fn unmaximize_only_affects_maximized_windows() {
    let mut k = fixtures::kiosk();
    let w = k.tc.add_mapped_window(None, TEST_WIDTH, TEST_HEIGHT);

    k.tc.shell.maximize_requested(&mut k.tc.host, w, false);
    assert_eq!(k.tc.placement(w), Some(Placement::Fullscreen));

    k.tc.shell.maximize_requested(&mut k.tc.host, w, true);
    k.tc.shell.maximize_requested(&mut k.tc.host, w, false);
    assert_eq!(k.tc.placement(w), Some(Placement::Normal));
}

#[test]
fn child_requests_always_end_normal() {
    let (mut k, _root, dialog) = fixtures::root_with_dialog();

    k.tc.shell.fullscreen_requested(&mut k.tc.host, dialog, true, Some(k.output));
    assert_eq!(k.tc.placement(dialog), Some(Placement::Normal));

    k.tc.shell.maximize_requested(&mut k.tc.host, dialog, true);
    assert_eq!(k.tc.placement(dialog), Some(Placement::Normal));

    k.tc.shell.set_maximized(&mut k.tc.host, dialog);
    k.tc.shell.set_fullscreen(&mut k.tc.host, dialog, None);
    assert_eq!(k.tc.placement(dialog), Some(Placement::Normal));

    let surface = k.tc.surface(dialog);
    assert!(!k.tc.host.is_fullscreen(surface));
    assert!(!k.tc.host.is_maximized(surface));
    assert_shell_consistent(&k.tc);
}

#[test]
fn minimize_and_resize_requests_are_ignored() {
    let mut k = fixtures::kiosk();
    let w = k.tc.add_mapped_window(None, TEST_WIDTH, TEST_HEIGHT);
    let before = k.tc.snapshot();
    let commands = k.tc.host.commands().len();

    k.tc.shell.minimize_requested(w);
    k.tc.shell.resize_requested(w);

    assert_eq!(k.tc.snapshot(), before);
    assert_eq!(k.tc.host.commands().len(), commands);
}

#[test]
fn set_normal_twice_repeats_the_same_configuration() {
    let mut k = fixtures::kiosk();
    let w = k.tc.add_mapped_window(None, TEST_WIDTH, TEST_HEIGHT);

    k.tc.host.take_commands();
    k.tc.shell.set_normal(&mut k.tc.host, w);
    let first = k.tc.host.take_commands();
    let state = k.tc.snapshot();

    k.tc.shell.set_normal(&mut k.tc.host, w);

    assert_eq!(k.tc.host.take_commands(), first);
    assert_eq!(k.tc.snapshot(), state);
}
