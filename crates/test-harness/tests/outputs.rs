//! Output lifecycle: backgrounds, resize, move and removal

use kiosk_shell::{Placement, ShellError};
use smithay::utils::{Point, Rectangle, Size};
use test_harness::assertions::assert_shell_consistent;
use test_harness::fixtures::{self, TEST_HEIGHT, TEST_WIDTH};
use test_harness::{HostCommand, TestError, TestShell};

#[test]
fn output_gets_background_covering_geometry() {
    let mut tc = TestShell::new();
    let output = tc.add_output_at("DP-1", Rectangle::new((100, 50).into(), (800, 600).into()));

    let background = tc.shell.outputs().get(output).unwrap().background();
    assert!(tc.host.is_view_live(background));
    assert_eq!(
        tc.host.commands(),
        &[HostCommand::CreateBackground {
            output: 1,
            view: background.0,
            x: 100,
            y: 50,
            width: 800,
            height: 600,
        }]
    );
}

#[test]
fn output_without_background_memory_is_not_registered() {
    let mut tc = TestShell::new();
    tc.host.fail_next_view = true;

    let result = tc.try_add_output("DP-1", Rectangle::new((0, 0).into(), (800, 600).into()));

    assert!(matches!(
        result,
        Err(TestError::Shell(ShellError::NoMemory { what: "output background" }))
    ));
    assert!(tc.shell.outputs().is_empty());
}

#[test]
fn output_affinity_is_loaded_from_config() {
    let (tc, [primary, media], _seat) = fixtures::dual_output_with_affinity();

    let outputs = tc.shell.outputs();
    assert!(outputs.get(primary).unwrap().affinity().is_empty());
    let media_ids: Vec<_> = outputs.get(media).unwrap().affinity().iter().collect();
    assert_eq!(media_ids, vec!["vlc", "mpv"]);
}

#[test]
fn removed_output_releases_background() {
    let (mut tc, output) = fixtures::single_output();
    let background = tc.shell.outputs().get(output).unwrap().background();

    tc.remove_output(output);

    assert!(!tc.host.is_view_live(background));
    assert!(!tc.shell.outputs().contains(output));

    // Already gone
    let commands = tc.host.commands().len();
    tc.remove_output(output);
    assert_eq!(tc.host.commands().len(), commands);
}

#[test]
fn removed_output_unbinds_only_its_windows() {
    let (mut tc, [primary, media], _seat) = fixtures::dual_output_with_affinity();
    let browser = tc.add_mapped_window(Some("browser"), TEST_WIDTH, TEST_HEIGHT);
    let player = tc.add_mapped_window(Some("vlc"), 1280, 720);

    tc.remove_output(media);

    assert_eq!(tc.bound_output(player), None);
    assert_eq!(tc.bound_output(browser), Some(primary));
    assert_eq!(tc.placement(player), Some(Placement::Fullscreen));
    assert_shell_consistent(&tc);
}

#[test]
fn resized_output_resizes_fullscreen_windows() {
    let mut k = fixtures::kiosk();
    let w = k.tc.add_mapped_window(None, TEST_WIDTH, TEST_HEIGHT);
    let old_background = k.tc.shell.outputs().get(k.output).unwrap().background();

    k.tc.shell
        .output_resized(&mut k.tc.host, k.output, Rectangle::new((0, 0).into(), (1280, 720).into()));

    let record = k.tc.shell.outputs().get(k.output).unwrap();
    assert_eq!(record.geometry().size, Size::from((1280, 720)));
    assert_ne!(record.background(), old_background);
    assert!(!k.tc.host.is_view_live(old_background));
    assert!(k.tc.host.is_view_live(record.background()));
    assert_eq!(k.tc.host.size(k.tc.surface(w)), Some(Size::from((1280, 720))));

    // The client follows with a matching buffer and is centred again
    k.tc.map(w, 1280, 720);
    assert_eq!(k.tc.position(w), Some(Point::from((0, 0))));
}

#[test]
fn resized_output_leaves_normal_window_size_alone() {
    let (mut k, _root, dialog) = fixtures::root_with_dialog();
    let surface = k.tc.surface(dialog);
    let sizes_before = k.tc.host.count(|c| matches!(c, HostCommand::SetSize { surface: s, .. } if *s == surface.0));

    k.tc.shell
        .output_resized(&mut k.tc.host, k.output, Rectangle::new((0, 0).into(), (1280, 720).into()));

    let sizes_after = k.tc.host.count(|c| matches!(c, HostCommand::SetSize { surface: s, .. } if *s == surface.0));
    assert_eq!(sizes_after, sizes_before);
    assert_eq!(k.tc.host.size(surface), Some(Size::from((0, 0))));
}

#[test]
fn resize_keeps_old_background_when_allocation_fails() {
    let (mut tc, output) = fixtures::single_output();
    let background = tc.shell.outputs().get(output).unwrap().background();
    tc.host.fail_next_view = true;

    tc.shell
        .output_resized(&mut tc.host, output, Rectangle::new((0, 0).into(), (1280, 720).into()));

    let record = tc.shell.outputs().get(output).unwrap();
    assert_eq!(record.background(), background);
    assert!(tc.host.is_view_live(background));
    assert_eq!(record.geometry().size, Size::from((1280, 720)));
}

#[test]
fn moved_output_carries_background_and_windows() {
    let (mut k, root, dialog) = fixtures::root_with_dialog();
    let dialog_before = k.tc.position(dialog).unwrap();

    k.tc.shell.output_moved(&mut k.tc.host, k.output, Point::from((1920, 0)));

    let record = k.tc.shell.outputs().get(k.output).unwrap();
    assert_eq!(record.geometry().loc, Point::from((1920, 0)));
    assert_eq!(k.tc.host.view_position(record.background()), Some(Point::from((1920, 0))));
    assert_eq!(k.tc.position(root), Some(Point::from((1920, 0))));
    assert_eq!(k.tc.position(dialog), Some(dialog_before + Point::from((1920, 0))));
}

#[test]
fn moved_output_does_not_touch_other_outputs() {
    let (mut tc, [primary, media], _seat) = fixtures::dual_output_with_affinity();
    let browser = tc.add_mapped_window(Some("browser"), TEST_WIDTH, TEST_HEIGHT);
    let player = tc.add_mapped_window(Some("vlc"), 1280, 720);
    let browser_at = tc.position(browser);

    tc.shell.output_moved(&mut tc.host, media, Point::from((0, 100)));

    assert_eq!(tc.position(browser), browser_at);
    assert_eq!(tc.position(player), Some(Point::from((1920, 100))));
    assert_eq!(tc.shell.windows_on(primary), vec![browser]);
    assert_eq!(tc.shell.windows_on(media), vec![player]);
}
