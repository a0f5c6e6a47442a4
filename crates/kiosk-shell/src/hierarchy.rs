//! Parent/child relationships
//!
//! Windows only hold a weak link to their parent. The reverse direction is
//! kept in a [`ChildIndex`] updated on every re-parent, so listing a
//! window's children does not scan every window.

use slotmap::{SecondaryMap, SlotMap};

use crate::window::{WindowId, WindowNode};

/// parent -> children, in the order they were attached
#[derive(Debug, Default)]
pub struct ChildIndex {
    children: SecondaryMap<WindowId, Vec<WindowId>>,
}

impl ChildIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link(&mut self, parent: WindowId, child: WindowId) {
        match self.children.get_mut(parent) {
            Some(children) => {
                if !children.contains(&child) {
                    children.push(child);
                }
            }
            None => {
                self.children.insert(parent, vec![child]);
            }
        }
    }

    pub fn unlink(&mut self, parent: WindowId, child: WindowId) {
        let now_empty = match self.children.get_mut(parent) {
            Some(children) => {
                children.retain(|c| *c != child);
                children.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.children.remove(parent);
        }
    }

    /// Forget a destroyed parent entirely
    pub fn remove(&mut self, parent: WindowId) {
        self.children.remove(parent);
    }

    pub fn children(&self, parent: WindowId) -> &[WindowId] {
        self.children.get(parent).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Walk the parent chain to the top-most ancestor.
///
/// Returns `None` if `window` is not a live record. A dangling parent link
/// (parent already removed) ends the walk at the last live window.
pub fn root_of(windows: &SlotMap<WindowId, WindowNode>, window: WindowId) -> Option<WindowId> {
    let mut current = window;
    let mut node = windows.get(current)?;
    // Bounded by the number of windows; re-parenting refuses cycles.
    for _ in 0..windows.len() {
        let Some(parent) = node.parent() else { break };
        let Some(parent_node) = windows.get(parent) else { break };
        current = parent;
        node = parent_node;
    }
    Some(current)
}

/// Whether `ancestor` is `window` itself or one of its ancestors
pub fn is_ancestor_or_self(
    windows: &SlotMap<WindowId, WindowNode>,
    ancestor: WindowId,
    window: WindowId,
) -> bool {
    let mut current = Some(window);
    for _ in 0..=windows.len() {
        match current {
            Some(id) if id == ancestor => return true,
            Some(id) => current = windows.get(id).and_then(WindowNode::parent),
            None => return false,
        }
    }
    false
}
