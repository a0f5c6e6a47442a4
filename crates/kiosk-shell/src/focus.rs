//! Focus successor selection
//!
//! When a window goes away, the seats focused on it move to the top-most
//! remaining window of the same family (same root ancestor). Without one,
//! they fall back to the top-most remaining window of any family.

use crate::window::WindowId;

/// Choose the window that inherits focus from `removed`.
///
/// `stacking` lists mapped windows front to back. `root_of` resolves a window
/// to its root ancestor and returns `None` for windows without a shell
/// record, which are never candidates.
pub fn find_focus_successor<I, F>(stacking: I, removed: WindowId, root_of: F) -> Option<WindowId>
where
    I: IntoIterator<Item = WindowId>,
    F: Fn(WindowId) -> Option<WindowId>,
{
    let removed_root = root_of(removed);
    let mut top = None;

    for candidate in stacking {
        if candidate == removed {
            continue;
        }
        let Some(root) = root_of(candidate) else {
            continue;
        };
        if top.is_none() {
            top = Some(candidate);
        }
        if Some(root) == removed_root {
            return Some(candidate);
        }
    }

    top
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;
    use std::collections::HashMap;

    fn ids(count: usize) -> Vec<WindowId> {
        let mut map: SlotMap<WindowId, ()> = SlotMap::with_key();
        (0..count).map(|_| map.insert(())).collect()
    }

    #[test]
    fn prefers_same_family_over_top_window() {
        let w = ids(4);
        // w[0] root with child w[1]; w[2] unrelated root on top
        let roots: HashMap<_, _> = [(w[0], w[0]), (w[1], w[0]), (w[2], w[2])].into();
        let stacking = vec![w[2], w[1], w[0]];

        let successor = find_focus_successor(stacking, w[1], |id| roots.get(&id).copied());
        assert_eq!(successor, Some(w[0]));
    }

    #[test]
    fn falls_back_to_top_window() {
        let w = ids(3);
        let roots: HashMap<_, _> = [(w[0], w[0]), (w[1], w[1]), (w[2], w[2])].into();
        let stacking = vec![w[1], w[0], w[2]];

        let successor = find_focus_successor(stacking, w[2], |id| roots.get(&id).copied());
        assert_eq!(successor, Some(w[1]));
    }

    #[test]
    fn skips_windows_without_record() {
        let w = ids(3);
        let roots: HashMap<_, _> = [(w[1], w[1]), (w[2], w[2])].into();
        let stacking = vec![w[0], w[1], w[2]];

        let successor = find_focus_successor(stacking, w[2], |id| roots.get(&id).copied());
        assert_eq!(successor, Some(w[1]));
    }

    #[test]
    fn empty_or_only_removed_yields_none() {
        let w = ids(1);
        let roots: HashMap<_, _> = [(w[0], w[0])].into();

        assert_eq!(find_focus_successor(Vec::new(), w[0], |id| roots.get(&id).copied()), None);
        assert_eq!(find_focus_successor(vec![w[0]], w[0], |id| roots.get(&id).copied()), None);
    }

    #[test]
    fn first_same_family_candidate_in_stacking_order_wins() {
        let w = ids(4);
        let roots: HashMap<_, _> = [(w[0], w[0]), (w[1], w[0]), (w[2], w[0]), (w[3], w[0])].into();
        let stacking = vec![w[3], w[2], w[1], w[0]];

        let successor = find_focus_successor(stacking, w[3], |id| roots.get(&id).copied());
        assert_eq!(successor, Some(w[2]));
    }
}
