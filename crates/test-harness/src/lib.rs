//! Test harness for kiosk-shell
//!
//! Provides infrastructure for driving the shell without a compositor.
//!
//! # Modules
//!
//! - `headless`: Shell wrapper around the recording host (no display required)
//! - `assertions`: Cross-record invariant checks
//! - `fixtures`: Canned output/seat/window setups

pub mod assertions;
pub mod fixtures;
pub mod headless;

pub use headless::{ShellSnapshot, TestError, TestShell};
pub use kiosk_shell::headless::{HeadlessHost, HostCommand};
