//! Output lifecycle

use smithay::utils::{Logical, Point, Rectangle};

use super::{Shell, ShellError};
use crate::host::{Host, OutputHandle};
use crate::output::{AffinityList, OutputId, OutputRecord};
use crate::signal::Listener;
use crate::window::WindowId;

impl Shell {
    /// A new output appeared: give it a background and load its app ids.
    pub fn output_added<H: Host>(
        &mut self,
        host: &mut H,
        handle: OutputHandle,
        name: String,
        geometry: Rectangle<i32, Logical>,
    ) -> Result<OutputId, ShellError> {
        let Some(background) = host.create_background(handle, geometry) else {
            tracing::error!(?handle, %name, "no memory to allocate output background");
            return Err(ShellError::NoMemory { what: "output background" });
        };

        let affinity = self
            .config
            .output_app_ids(&name)
            .map(|raw| AffinityList::parse(&raw))
            .unwrap_or_default();

        tracing::info!(?handle, %name, ?geometry, app_ids = ?affinity, "output added");
        let output = self
            .outputs
            .insert(OutputRecord::new(handle, name, geometry, affinity, background));
        Ok(output)
    }

    /// An output went away.
    ///
    /// Windows bound to it become outputless; they are not moved elsewhere
    /// until their next placement call.
    pub fn output_removed<H: Host>(&mut self, host: &mut H, output: OutputId) {
        let Some(mut record) = self.outputs.remove(output) else {
            return;
        };

        for listener in record.destroy_signal.take() {
            if let Listener::BoundOutput(window) = listener {
                if let Some(node) = self.windows.get_mut(window) {
                    if node.bound_output() == Some(output) {
                        node.bound_output = None;
                    }
                }
            }
        }

        host.destroy_view(record.background);
        tracing::info!(?output, name = %record.name, "output removed");
    }

    /// An output changed size: rebuild its background and resize the
    /// output-sized windows on it.
    pub fn output_resized<H: Host>(&mut self, host: &mut H, output: OutputId, geometry: Rectangle<i32, Logical>) {
        let Some(record) = self.outputs.get_mut(output) else {
            return;
        };
        record.geometry = geometry;

        match host.create_background(record.handle, geometry) {
            Some(background) => {
                let old = std::mem::replace(&mut record.background, background);
                host.destroy_view(old);
            }
            None => {
                tracing::error!(?output, "no memory to recreate output background, keeping the old one");
                host.set_view_position(record.background, geometry.loc);
            }
        }
        tracing::info!(?output, ?geometry, "output resized");

        for window in self.output_sized_windows_on(output) {
            self.reconfigure_for_output(host, window);
        }
    }

    /// An output moved by `delta`: translate everything shown on it.
    pub fn output_moved<H: Host>(&mut self, host: &mut H, output: OutputId, delta: Point<i32, Logical>) {
        let Some(record) = self.outputs.get_mut(output) else {
            return;
        };
        record.geometry.loc = record.geometry.loc + delta;
        host.set_view_position(record.background, record.geometry.loc);
        tracing::info!(?output, ?delta, geometry = ?record.geometry, "output moved");

        for window in self.windows_on(output) {
            if let Some(position) = self.window_position(window) {
                self.move_view(host, window, position + delta);
            }
        }
    }

    /// Windows bound to `output`, in stacking order, unmapped last
    pub fn windows_on(&self, output: OutputId) -> Vec<WindowId> {
        let mapped = self.stacking.iter().copied();
        let unmapped = self
            .windows
            .iter()
            .filter(|(_, node)| !node.mapped)
            .map(|(id, _)| id);
        mapped
            .chain(unmapped)
            .filter(|id| {
                self.windows
                    .get(*id)
                    .is_some_and(|node| node.bound_output() == Some(output))
            })
            .collect()
    }

    fn output_sized_windows_on(&self, output: OutputId) -> Vec<WindowId> {
        self.windows_on(output)
            .into_iter()
            .filter(|id| {
                self.windows
                    .get(*id)
                    .is_some_and(|node| node.placement.fills_output())
            })
            .collect()
    }
}
