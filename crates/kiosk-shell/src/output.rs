//! Output registry
//!
//! Tracks live outputs in registration order, each with its geometry, its
//! background fill and the list of application ids pinned to it by
//! configuration.

use slotmap::SlotMap;
use smithay::utils::{Logical, Rectangle};

use crate::host::{OutputHandle, ViewHandle};
use crate::signal::DestroySignal;

slotmap::new_key_type! {
    /// Stable handle to an output record; resolves to nothing once destroyed
    pub struct OutputId;
}

/// Application ids preferentially placed on one output
///
/// Parsed from a comma-separated configuration string. Matching is by whole
/// token: `"foo,bar"` contains `"foo"` and `"bar"` but not `"oo"` or `"o,b"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffinityList {
    app_ids: Vec<String>,
}

impl AffinityList {
    pub fn parse(raw: &str) -> Self {
        Self {
            app_ids: raw.split(',').map(str::to_owned).collect(),
        }
    }

    pub fn contains(&self, app_id: &str) -> bool {
        self.app_ids.iter().any(|candidate| candidate == app_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.app_ids.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.app_ids.is_empty()
    }
}

/// Shell state for one output
#[derive(Debug)]
pub struct OutputRecord {
    pub(crate) handle: OutputHandle,
    pub(crate) name: String,
    pub(crate) geometry: Rectangle<i32, Logical>,
    pub(crate) affinity: AffinityList,
    /// INVARIANT: exactly one background view while registered
    pub(crate) background: ViewHandle,
    pub(crate) destroy_signal: DestroySignal,
}

impl OutputRecord {
    pub(crate) fn new(
        handle: OutputHandle,
        name: String,
        geometry: Rectangle<i32, Logical>,
        affinity: AffinityList,
        background: ViewHandle,
    ) -> Self {
        Self {
            handle,
            name,
            geometry,
            affinity,
            background,
            destroy_signal: DestroySignal::new(),
        }
    }

    pub fn handle(&self) -> OutputHandle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> Rectangle<i32, Logical> {
        self.geometry
    }

    pub fn affinity(&self) -> &AffinityList {
        &self.affinity
    }

    pub fn background(&self) -> ViewHandle {
        self.background
    }
}

/// Live outputs in registration order
#[derive(Debug, Default)]
pub struct OutputRegistry {
    outputs: SlotMap<OutputId, OutputRecord>,
    order: Vec<OutputId>,
}

impl OutputRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, record: OutputRecord) -> OutputId {
        let id = self.outputs.insert(record);
        self.order.push(id);
        id
    }

    pub(crate) fn remove(&mut self, id: OutputId) -> Option<OutputRecord> {
        let record = self.outputs.remove(id)?;
        self.order.retain(|o| *o != id);
        Some(record)
    }

    pub fn get(&self, id: OutputId) -> Option<&OutputRecord> {
        self.outputs.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: OutputId) -> Option<&mut OutputRecord> {
        self.outputs.get_mut(id)
    }

    pub fn contains(&self, id: OutputId) -> bool {
        self.outputs.contains_key(id)
    }

    /// Outputs in registration order
    pub fn iter(&self) -> impl Iterator<Item = (OutputId, &OutputRecord)> {
        self.order
            .iter()
            .filter_map(|id| self.outputs.get(*id).map(|record| (*id, record)))
    }

    /// The first registered output still alive
    pub fn default_output(&self) -> Option<OutputId> {
        self.order.first().copied()
    }

    /// The first output (in registration order) whose affinity list names `app_id`
    pub fn find_by_app_id(&self, app_id: &str) -> Option<OutputId> {
        self.iter()
            .find(|(_, record)| record.affinity.contains(app_id))
            .map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, app_ids: Option<&str>) -> OutputRecord {
        OutputRecord::new(
            OutputHandle(0),
            name.to_string(),
            Rectangle::new((0, 0).into(), (1920, 1080).into()),
            app_ids.map(AffinityList::parse).unwrap_or_default(),
            ViewHandle(0),
        )
    }

    // ========== AffinityList tests ==========

    #[test]
    fn affinity_matches_whole_tokens() {
        let list = AffinityList::parse("vlc,mpv");
        assert!(list.contains("vlc"));
        assert!(list.contains("mpv"));
        assert!(!list.contains("vl"));
        assert!(!list.contains("mpvx"));
        assert!(!list.contains("cvlc"));
    }

    #[test]
    fn affinity_does_not_match_across_token_boundary() {
        let list = AffinityList::parse("foo,bar");
        assert!(!list.contains("oo"));
        assert!(!list.contains("o,b"));
        assert!(!list.contains("foo,bar"));
    }

    #[test]
    fn affinity_single_entry() {
        let list = AffinityList::parse("kiosk-app");
        assert!(list.contains("kiosk-app"));
        assert!(!list.contains("kiosk"));
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["kiosk-app"]);
    }

    #[test]
    fn affinity_default_is_empty_and_matches_nothing() {
        let list = AffinityList::default();
        assert!(list.is_empty());
        assert!(!list.contains(""));
        assert!(!list.contains("vlc"));
    }

    #[test]
    fn affinity_tokens_are_not_trimmed() {
        let list = AffinityList::parse("vlc, mpv");
        assert!(list.contains("vlc"));
        assert!(list.contains(" mpv"));
        assert!(!list.contains("mpv"));
    }

    // ========== OutputRegistry tests ==========

    #[test]
    fn default_output_is_first_registered() {
        let mut registry = OutputRegistry::new();
        let first = registry.insert(record("DP-1", None));
        let second = registry.insert(record("DP-2", None));

        assert_eq!(registry.default_output(), Some(first));
        registry.remove(first);
        assert_eq!(registry.default_output(), Some(second));
        registry.remove(second);
        assert_eq!(registry.default_output(), None);
    }

    #[test]
    fn find_by_app_id_prefers_registration_order() {
        let mut registry = OutputRegistry::new();
        let _plain = registry.insert(record("DP-1", None));
        let first = registry.insert(record("DP-2", Some("vlc")));
        let _second = registry.insert(record("DP-3", Some("mpv,vlc")));

        assert_eq!(registry.find_by_app_id("vlc"), Some(first));
        assert_eq!(registry.find_by_app_id("firefox"), None);
    }

    #[test]
    fn removed_output_key_is_stale() {
        let mut registry = OutputRegistry::new();
        let id = registry.insert(record("DP-1", None));
        assert!(registry.remove(id).is_some());
        assert!(!registry.contains(id));
        assert!(registry.get(id).is_none());
        assert!(registry.remove(id).is_none());
        assert!(registry.is_empty());
    }
}
