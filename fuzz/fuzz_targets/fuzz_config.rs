#![no_main]
//! Fuzz target for config TOML parsing
//!
//! Feeds random bytes as TOML to the config parser to find panics,
//! hangs, or unexpected behavior in deserialization and output lookup.

use libfuzzer_sys::fuzz_target;

use kiosk_shell::config::Config;
use kiosk_shell::AffinityList;

fuzz_target!(|data: &[u8]| {
    // Try parsing as TOML config - must never panic
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(config) = toml::from_str::<Config>(s) {
            // Every configured output must resolve to its own app ids
            for output in &config.outputs {
                if let Some(raw) = config.output_app_ids(&output.name) {
                    let _ = AffinityList::parse(&raw);
                }
            }
        }
    }
});
