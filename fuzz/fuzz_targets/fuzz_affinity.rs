#![no_main]
//! Fuzz target for affinity list matching
//!
//! Splits random input into a configured list and a candidate app id and
//! checks that matching is exact per token.

use libfuzzer_sys::fuzz_target;

use kiosk_shell::AffinityList;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let (raw, app_id) = s.split_once('\n').unwrap_or((s, ""));

    let list = AffinityList::parse(raw);
    let expected = raw.split(',').any(|token| token == app_id);
    assert_eq!(list.contains(app_id), expected, "list {raw:?} app id {app_id:?}");

    // A candidate containing the separator can never match a single token
    if app_id.contains(',') {
        assert!(!list.contains(app_id));
    }
});
