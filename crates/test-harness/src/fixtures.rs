//! Test fixtures for common test scenarios

use kiosk_shell::config::OutputConfig;
use kiosk_shell::{Config, OutputId, SeatId, WindowId};

use crate::headless::TestShell;

/// Standard test output dimensions
pub const TEST_WIDTH: i32 = 1920;
pub const TEST_HEIGHT: i32 = 1080;

/// One output and one seat with a keyboard
pub struct Kiosk {
    pub tc: TestShell,
    pub output: OutputId,
    pub seat: SeatId,
}

/// A shell with a single output and no seats
pub fn single_output() -> (TestShell, OutputId) {
    let mut tc = TestShell::new();
    let output = tc.add_output("DP-1", TEST_WIDTH, TEST_HEIGHT);
    (tc, output)
}

/// A shell with a single output and a keyboard seat
pub fn kiosk() -> Kiosk {
    kiosk_with_config(Config::default())
}

pub fn kiosk_with_config(config: Config) -> Kiosk {
    let mut tc = TestShell::with_config(config);
    let output = tc.add_output("DP-1", TEST_WIDTH, TEST_HEIGHT);
    let seat = tc.add_seat("seat0");
    Kiosk { tc, output, seat }
}

/// Configuration pinning `app_ids` to the output called `name`
pub fn config_with_affinity(name: &str, app_ids: &str) -> Config {
    Config {
        outputs: vec![OutputConfig {
            name: name.to_string(),
            app_ids: Some(app_ids.to_string()),
        }],
        ..Default::default()
    }
}

/// Two outputs side by side; "HDMI-A-1" (the second) carries media players
///
/// Returns: (shell, [DP-1, HDMI-A-1], seat)
pub fn dual_output_with_affinity() -> (TestShell, [OutputId; 2], SeatId) {
    let mut tc = TestShell::with_config(config_with_affinity("HDMI-A-1", "vlc,mpv"));
    let primary = tc.add_output("DP-1", TEST_WIDTH, TEST_HEIGHT);
    let media = tc.add_output("HDMI-A-1", 1280, 720);
    let seat = tc.add_seat("seat0");
    (tc, [primary, media], seat)
}

/// A mapped root with a mapped dialog on top
///
/// Returns: (kiosk, root, dialog)
pub fn root_with_dialog() -> (Kiosk, WindowId, WindowId) {
    let mut k = kiosk();
    let root = k.tc.add_mapped_window(Some("app"), TEST_WIDTH, TEST_HEIGHT);
    let dialog = k.tc.add_mapped_child(root, 400, 300);
    (k, root, dialog)
}
