//! Window lifecycle, hierarchy and placement

use smithay::utils::{Logical, Point, Size};

use super::{Shell, ShellError};
use crate::focus;
use crate::hierarchy;
use crate::host::{Host, SurfaceHandle};
use crate::output::OutputId;
use crate::placement::{self, PREFERRED_SIZE};
use crate::signal::{Listener, Subscription};
use crate::window::{Commit, Placement, WindowId, WindowNode};

impl Shell {
    /// Allocate the record for a new desktop surface.
    ///
    /// The window starts unplaced (Normal, no output). Most callers want
    /// [`Shell::window_added`], which also places and focuses it.
    pub fn create_window<H: Host>(
        &mut self,
        host: &mut H,
        surface: SurfaceHandle,
        app_id: Option<String>,
    ) -> Result<WindowId, ShellError> {
        let Some(view) = host.create_view(surface) else {
            if !host.post_no_memory(surface) {
                tracing::error!(?surface, "no memory to allocate shell surface");
            }
            return Err(ShellError::NoMemory { what: "shell surface" });
        };

        let window = self.windows.insert(WindowNode::new(surface, view, app_id));
        host.set_user_data(surface, Some(window));
        tracing::info!(?window, ?surface, ?view, "window created");
        Ok(window)
    }

    /// A desktop surface appeared: create, place and focus it.
    ///
    /// Roots go fullscreen on their best output; windows with a parent start
    /// Normal. Every seat with a keyboard is focused on the new window.
    pub fn window_added<H: Host>(
        &mut self,
        host: &mut H,
        surface: SurfaceHandle,
        app_id: Option<String>,
        parent: Option<WindowId>,
    ) -> Result<WindowId, ShellError> {
        let window = self.create_window(host, surface, app_id)?;

        match parent.filter(|p| self.windows.contains_key(*p)) {
            Some(parent) => self.set_parent(host, window, Some(parent)),
            None => self.set_fullscreen(host, window, None),
        }

        for seat in self.seats.keyboard_seats() {
            self.focus_seat(host, seat, Some(window));
        }

        Ok(window)
    }

    /// A desktop surface went away: hand focus on, then destroy the record.
    pub fn window_removed<H: Host>(&mut self, host: &mut H, window: WindowId) {
        if !self.windows.contains_key(window) {
            tracing::trace!(?window, "removal of unknown window ignored");
            return;
        }

        let successor = self.find_focus_successor(window);
        for seat in self.seats.focused_on(window) {
            tracing::debug!(?window, ?seat, ?successor, "moving focus off removed window");
            self.focus_seat(host, seat, successor);
        }

        self.destroy_window(host, window);
    }

    /// The window that inherits focus when `window` goes away
    pub fn find_focus_successor(&self, window: WindowId) -> Option<WindowId> {
        focus::find_focus_successor(self.stacking.iter().copied(), window, |id| self.root_of(id))
    }

    /// Tear down a window record.
    ///
    /// The record leaves the arena before its destroy signal fires, so
    /// listeners (and anything they trigger) already see it as gone. Calling
    /// this again for the same id is a no-op.
    pub fn destroy_window<H: Host>(&mut self, host: &mut H, window: WindowId) {
        let Some(mut node) = self.windows.remove(window) else {
            return;
        };
        host.set_user_data(node.surface, None);
        self.stacking.retain(|w| *w != window);

        let grandparent = node.parent();
        for listener in node.destroy_signal.take() {
            match listener {
                Listener::Parent(child) => self.set_parent(host, child, grandparent),
                Listener::SeatFocus(seat) => {
                    if let Some(record) = self.seats.get_mut(seat) {
                        if record.focused_window() == Some(window) {
                            record.focused = None;
                        }
                    }
                }
                Listener::Grab(seat) => {
                    if self.grabs.get(seat).is_some_and(|grab| grab.window.source == window) {
                        self.grabs.remove(seat);
                    }
                }
                Listener::BoundOutput(_) => {}
            }
        }

        if let Some(parent) = node.parent.take() {
            if let Some(parent_node) = self.windows.get_mut(parent.source) {
                parent_node.destroy_signal.unsubscribe(parent.token);
            }
            self.children.unlink(parent.source, window);
        }
        if let Some(output) = node.bound_output.take() {
            if let Some(record) = self.outputs.get_mut(output.source) {
                record.destroy_signal.unsubscribe(output.token);
            }
        }
        self.children.remove(window);

        host.destroy_view(node.view);
        tracing::info!(?window, surface = ?node.surface, "window destroyed");
    }

    /// Attach `window` under `parent`, or make it a root.
    ///
    /// With a parent the window drops its output and goes Normal on the best
    /// output (normally its root's). Without one it goes fullscreen. If the
    /// parent is destroyed later, the window moves up to the parent's parent.
    pub fn set_parent<H: Host>(&mut self, host: &mut H, window: WindowId, parent: Option<WindowId>) {
        if !self.windows.contains_key(window) {
            return;
        }
        let parent = parent.filter(|p| self.windows.contains_key(*p));
        if let Some(parent) = parent {
            if hierarchy::is_ancestor_or_self(&self.windows, window, parent) {
                tracing::warn!(?window, ?parent, "refusing re-parent that would create a cycle");
                return;
            }
        }

        if let Some(old) = self.windows.get_mut(window).and_then(|node| node.parent.take()) {
            if let Some(old_parent) = self.windows.get_mut(old.source) {
                old_parent.destroy_signal.unsubscribe(old.token);
            }
            self.children.unlink(old.source, window);
        }

        match parent {
            Some(parent) => {
                let Some(parent_node) = self.windows.get_mut(parent) else {
                    return;
                };
                let token = parent_node.destroy_signal.subscribe(Listener::Parent(window));
                if let Some(node) = self.windows.get_mut(window) {
                    node.parent = Some(Subscription { source: parent, token });
                }
                self.children.link(parent, window);
                tracing::debug!(?window, ?parent, "window attached to parent");

                self.set_output(window, None);
                self.set_normal(host, window);
            }
            None => {
                tracing::debug!(?window, "window is a root");
                let output = self.windows.get(window).and_then(WindowNode::bound_output);
                self.set_fullscreen(host, window, output);
            }
        }
    }

    /// Bind `window` to `output` (or unbind it).
    ///
    /// The binding clears itself if the output is destroyed; the window then
    /// stays outputless until its next placement call.
    pub fn set_output(&mut self, window: WindowId, output: Option<OutputId>) {
        let Some(node) = self.windows.get_mut(window) else {
            return;
        };
        if let Some(old) = node.bound_output.take() {
            if let Some(record) = self.outputs.get_mut(old.source) {
                record.destroy_signal.unsubscribe(old.token);
            }
        }

        let Some(output) = output else { return };
        let Some(record) = self.outputs.get_mut(output) else {
            return;
        };
        let token = record.destroy_signal.subscribe(Listener::BoundOutput(window));
        node.bound_output = Some(Subscription { source: output, token });
    }

    /// Make `window` fullscreen on `output`, or on its best output.
    ///
    /// Windows with a parent are never fullscreen; they go Normal instead.
    pub fn set_fullscreen<H: Host>(&mut self, host: &mut H, window: WindowId, output: Option<OutputId>) {
        let Some(node) = self.windows.get(window) else {
            return;
        };
        if !node.is_root() {
            tracing::debug!(?window, "fullscreen on child window coerced to normal");
            self.set_normal(host, window);
            return;
        }

        let output = output
            .filter(|o| self.outputs.contains(*o))
            .or_else(|| self.find_best_output(window));
        self.set_output(window, output);
        self.apply_output_sized(host, window, Placement::Fullscreen);
    }

    /// Maximize `window` on its best output.
    ///
    /// Windows with a parent cannot claim an output; they go Normal instead.
    pub fn set_maximized<H: Host>(&mut self, host: &mut H, window: WindowId) {
        let Some(node) = self.windows.get(window) else {
            return;
        };
        if !node.is_root() {
            tracing::debug!(?window, "maximize on child window coerced to normal");
            self.set_normal(host, window);
            return;
        }

        let output = self.find_best_output(window);
        self.set_output(window, output);
        self.apply_output_sized(host, window, Placement::Maximized);
    }

    /// Return `window` to its client-chosen size. Binds an output first if
    /// it has none.
    pub fn set_normal<H: Host>(&mut self, host: &mut H, window: WindowId) {
        let Some(node) = self.windows.get(window) else {
            return;
        };
        if node.bound_output.is_none() {
            let output = self.find_best_output(window);
            self.set_output(window, output);
        }

        let Some(node) = self.windows.get_mut(window) else {
            return;
        };
        node.placement = Placement::Normal;
        let surface = node.surface;
        host.set_fullscreen(surface, false);
        host.set_maximized(surface, false);
        host.set_size(surface, Size::from(PREFERRED_SIZE));
        tracing::debug!(?window, output = ?node.bound_output(), "window placed normal");
    }

    fn apply_output_sized<H: Host>(&mut self, host: &mut H, window: WindowId, placement: Placement) {
        let Some(node) = self.windows.get_mut(window) else {
            return;
        };
        let previous = std::mem::replace(&mut node.placement, placement);
        let surface = node.surface;
        let output = node.bound_output();

        match placement {
            Placement::Fullscreen => {
                if previous == Placement::Maximized {
                    host.set_maximized(surface, false);
                }
                host.set_fullscreen(surface, true);
            }
            Placement::Maximized => {
                if previous == Placement::Fullscreen {
                    host.set_fullscreen(surface, false);
                }
                host.set_maximized(surface, true);
            }
            Placement::Normal => {}
        }

        if let Some(record) = output.and_then(|o| self.outputs.get(o)) {
            host.set_size(surface, record.geometry.size);
        }
        tracing::debug!(?window, ?placement, ?output, "window sized to output");
    }

    /// Client asked to enter or leave fullscreen.
    pub fn fullscreen_requested<H: Host>(
        &mut self,
        host: &mut H,
        window: WindowId,
        fullscreen: bool,
        output: Option<OutputId>,
    ) {
        let Some(node) = self.windows.get(window) else {
            return;
        };
        if !node.is_root() {
            self.set_normal(host, window);
        } else if fullscreen || self.config.enforce_root_fullscreen {
            self.set_fullscreen(host, window, output);
        } else if node.placement == Placement::Fullscreen {
            self.set_normal(host, window);
        }
    }

    /// Client asked to enter or leave maximized state.
    pub fn maximize_requested<H: Host>(&mut self, host: &mut H, window: WindowId, maximized: bool) {
        let Some(node) = self.windows.get(window) else {
            return;
        };
        if !node.is_root() {
            self.set_normal(host, window);
        } else if self.config.enforce_root_fullscreen {
            self.set_fullscreen(host, window, None);
        } else if maximized {
            self.set_maximized(host, window);
        } else if node.placement == Placement::Maximized {
            self.set_normal(host, window);
        }
    }

    /// Client asked to be minimized. There is nowhere to minimize to.
    pub fn minimize_requested(&mut self, window: WindowId) {
        tracing::trace!(?window, "minimize request ignored");
    }

    /// Client asked for an interactive resize. Sizes are owned by the shell.
    pub fn resize_requested(&mut self, window: WindowId) {
        tracing::trace!(?window, "resize request ignored");
    }

    pub fn set_app_id(&mut self, window: WindowId, app_id: Option<String>) {
        if let Some(node) = self.windows.get_mut(window) {
            node.app_id = app_id;
        }
    }

    /// Record the position a legacy X11 window asked for.
    ///
    /// Used instead of centring when the window is mapped Normal.
    pub fn set_xwayland_position(&mut self, window: WindowId, position: Point<i32, Logical>) {
        if let Some(node) = self.windows.get_mut(window) {
            node.xwayland_position = Some(position);
        }
    }

    /// Current view position, for compositors that ask
    pub fn window_position(&self, window: WindowId) -> Option<Point<i32, Logical>> {
        self.windows.get(window).map(WindowNode::position)
    }

    /// A surface committed new state.
    ///
    /// Maps the window on its first non-empty commit, re-centres it when an
    /// output-sized window changes size, and applies buffer offsets to
    /// Normal windows.
    pub fn window_committed<H: Host>(&mut self, host: &mut H, window: WindowId, commit: Commit) {
        let Some(node) = self.windows.get(window) else {
            tracing::trace!(?window, "commit for unknown window ignored");
            return;
        };
        if commit.size.w == 0 {
            return;
        }

        let resized = commit.size != node.last_size;
        let fills_output = node.placement.fills_output();
        let was_mapped = node.mapped;

        if !was_mapped || (resized && fills_output) {
            let position = match node.xwayland_position {
                Some(requested) if !fills_output => requested - commit.geometry,
                _ => {
                    let area = node
                        .bound_output()
                        .and_then(|o| self.outputs.get(o))
                        .map(|record| record.geometry);
                    placement::centered_position(area, commit.size)
                }
            };
            self.move_view(host, window, position);
        }

        if !was_mapped {
            if let Some(node) = self.windows.get_mut(window) {
                node.mapped = true;
                host.map_view(node.view);
            }
            self.stacking.insert(0, window);
            tracing::debug!(?window, size = ?commit.size, "window mapped");
        }

        if !fills_output && commit.offset != Point::from((0, 0)) {
            if let Some(position) = self.windows.get(window).map(WindowNode::position) {
                self.move_view(host, window, position + commit.offset);
            }
        }

        if let Some(node) = self.windows.get_mut(window) {
            node.last_size = commit.size;
        }
    }

    /// Re-apply output size (output-sized windows) and re-centre on the bound output
    pub(crate) fn reconfigure_for_output<H: Host>(&mut self, host: &mut H, window: WindowId) {
        let Some(node) = self.windows.get(window) else {
            return;
        };
        let Some(area) = node
            .bound_output()
            .and_then(|o| self.outputs.get(o))
            .map(|record| record.geometry)
        else {
            return;
        };

        if node.placement.fills_output() {
            host.set_size(node.surface, area.size);
        }
        let position = placement::centered_position(Some(area), node.last_size);
        self.move_view(host, window, position);
    }

    pub(crate) fn move_view<H: Host>(&mut self, host: &mut H, window: WindowId, position: Point<i32, Logical>) {
        if let Some(node) = self.windows.get_mut(window) {
            node.position = position;
            host.set_view_position(node.view, position);
        }
    }
}
