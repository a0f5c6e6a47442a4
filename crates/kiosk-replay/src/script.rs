//! Event scripts
//!
//! A script is a TOML file of `[[step]]` tables, each naming one compositor
//! event. Windows, outputs and seats are given labels when they are created
//! and referred to by label afterwards. Labels stay bound after the record is
//! removed, so scripts can replay events for stale ids.
//!
//! ```toml
//! [[step]]
//! event = "output-added"
//! label = "main"
//! name = "DP-1"
//! geometry = [0, 0, 1920, 1080]
//!
//! [[step]]
//! event = "window-added"
//! label = "app"
//! app-id = "kiosk-app"
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use kiosk_shell::grab::{MoveRequest, PointerGrabState, TouchGrabState};
use kiosk_shell::shell::BTN_LEFT;
use kiosk_shell::{
    Commit, Dispatched, OutputHandle, OutputId, SeatHandle, SeatId, ShellEvent, SurfaceHandle, WindowId,
};
use serde::Deserialize;
use smithay::utils::{Logical, Point, Rectangle};

/// Parsed script
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Device that started a scripted move
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Device {
    #[default]
    Pointer,
    Touch,
}

fn default_true() -> bool {
    true
}

fn default_button() -> u32 {
    BTN_LEFT
}

/// One scripted event
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case", rename_all_fields = "kebab-case")]
pub enum Step {
    WindowAdded {
        label: String,
        #[serde(default)]
        app_id: Option<String>,
        #[serde(default)]
        parent: Option<String>,
    },
    WindowRemoved {
        window: String,
    },
    WindowCommitted {
        window: String,
        size: [i32; 2],
        #[serde(default)]
        offset: [i32; 2],
        #[serde(default)]
        geometry: [i32; 2],
    },
    ParentChanged {
        window: String,
        #[serde(default)]
        parent: Option<String>,
    },
    FullscreenRequested {
        window: String,
        fullscreen: bool,
        #[serde(default)]
        output: Option<String>,
    },
    MaximizeRequested {
        window: String,
        maximized: bool,
    },
    MinimizeRequested {
        window: String,
    },
    ResizeRequested {
        window: String,
    },
    MoveRequested {
        window: String,
        seat: String,
        #[serde(default)]
        device: Device,
        location: [i32; 2],
    },
    XwaylandPositionSet {
        window: String,
        position: [i32; 2],
    },
    AppIdChanged {
        window: String,
        #[serde(default)]
        app_id: Option<String>,
    },
    OutputAdded {
        label: String,
        name: String,
        geometry: [i32; 4],
    },
    OutputRemoved {
        output: String,
    },
    OutputResized {
        output: String,
        geometry: [i32; 4],
    },
    OutputMoved {
        output: String,
        delta: [i32; 2],
    },
    SeatAdded {
        label: String,
        #[serde(default = "default_true")]
        has_keyboard: bool,
    },
    SeatCapabilitiesChanged {
        seat: String,
        has_keyboard: bool,
    },
    SeatRemoved {
        seat: String,
    },
    KeyboardFocusChanged {
        seat: String,
        #[serde(default)]
        window: Option<String>,
    },
    PointerButton {
        seat: String,
        #[serde(default = "default_button")]
        button: u32,
        #[serde(default)]
        window: Option<String>,
        #[serde(default = "default_true")]
        default_grab: bool,
    },
    TouchDown {
        seat: String,
        #[serde(default)]
        window: Option<String>,
        #[serde(default = "default_true")]
        default_grab: bool,
    },
    GrabMotion {
        seat: String,
        location: [i32; 2],
    },
    GrabReleased {
        seat: String,
    },
}

/// Serial given to every scripted move; the grab state is built to match
const MOVE_SERIAL: u32 = 1;

fn point([x, y]: [i32; 2]) -> Point<i32, Logical> {
    Point::from((x, y))
}

fn rect([x, y, w, h]: [i32; 4]) -> Rectangle<i32, Logical> {
    Rectangle::new((x, y).into(), (w, h).into())
}

/// Label bindings and handle counters for one replay
#[derive(Debug, Default)]
pub struct Labels {
    windows: HashMap<String, WindowId>,
    outputs: HashMap<String, OutputId>,
    seats: HashMap<String, SeatId>,
    next_surface: u64,
    next_output: u64,
    next_seat: u64,
    /// Label waiting for the id its creation event returns
    pending: Option<String>,
}

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    fn window(&self, label: &str) -> Result<WindowId> {
        self.windows
            .get(label)
            .copied()
            .ok_or_else(|| anyhow!("unknown window label {label:?}"))
    }

    fn optional_window(&self, label: Option<&str>) -> Result<Option<WindowId>> {
        label.map(|l| self.window(l)).transpose()
    }

    fn output(&self, label: &str) -> Result<OutputId> {
        self.outputs
            .get(label)
            .copied()
            .ok_or_else(|| anyhow!("unknown output label {label:?}"))
    }

    fn seat(&self, label: &str) -> Result<SeatId> {
        self.seats
            .get(label)
            .copied()
            .ok_or_else(|| anyhow!("unknown seat label {label:?}"))
    }

    fn claim(&mut self, label: &str) -> Result<()> {
        if self.windows.contains_key(label) || self.outputs.contains_key(label) || self.seats.contains_key(label) {
            return Err(anyhow!("label {label:?} is already bound"));
        }
        self.pending = Some(label.to_string());
        Ok(())
    }

    /// Turn a step into the event it stands for
    pub fn resolve(&mut self, step: &Step) -> Result<ShellEvent> {
        let event = match step {
            Step::WindowAdded { label, app_id, parent } => {
                let parent = self.optional_window(parent.as_deref())?;
                self.claim(label)?;
                self.next_surface += 1;
                ShellEvent::WindowAdded {
                    surface: SurfaceHandle(self.next_surface),
                    app_id: app_id.clone(),
                    parent,
                }
            }
            Step::WindowRemoved { window } => ShellEvent::WindowRemoved {
                window: self.window(window)?,
            },
            Step::WindowCommitted {
                window,
                size,
                offset,
                geometry,
            } => ShellEvent::WindowCommitted {
                window: self.window(window)?,
                commit: Commit::new(size[0], size[1])
                    .with_offset(offset[0], offset[1])
                    .with_geometry(geometry[0], geometry[1]),
            },
            Step::ParentChanged { window, parent } => ShellEvent::ParentChanged {
                window: self.window(window)?,
                parent: self.optional_window(parent.as_deref())?,
            },
            Step::FullscreenRequested {
                window,
                fullscreen,
                output,
            } => ShellEvent::FullscreenRequested {
                window: self.window(window)?,
                fullscreen: *fullscreen,
                output: output.as_deref().map(|o| self.output(o)).transpose()?,
            },
            Step::MaximizeRequested { window, maximized } => ShellEvent::MaximizeRequested {
                window: self.window(window)?,
                maximized: *maximized,
            },
            Step::MinimizeRequested { window } => ShellEvent::MinimizeRequested {
                window: self.window(window)?,
            },
            Step::ResizeRequested { window } => ShellEvent::ResizeRequested {
                window: self.window(window)?,
            },
            Step::MoveRequested {
                window,
                seat,
                device,
                location,
            } => {
                let window = self.window(window)?;
                let request = match device {
                    Device::Pointer => MoveRequest {
                        serial: MOVE_SERIAL,
                        pointer: Some(PointerGrabState {
                            focus: Some(window),
                            button_count: 1,
                            grab_serial: MOVE_SERIAL,
                            location: point(*location),
                        }),
                        touch: None,
                    },
                    Device::Touch => MoveRequest {
                        serial: MOVE_SERIAL,
                        pointer: None,
                        touch: Some(TouchGrabState {
                            focus: Some(window),
                            grab_serial: MOVE_SERIAL,
                            location: point(*location),
                        }),
                    },
                };
                ShellEvent::MoveRequested {
                    window,
                    seat: self.seat(seat)?,
                    request,
                }
            }
            Step::XwaylandPositionSet { window, position } => ShellEvent::XwaylandPositionSet {
                window: self.window(window)?,
                position: point(*position),
            },
            Step::AppIdChanged { window, app_id } => ShellEvent::AppIdChanged {
                window: self.window(window)?,
                app_id: app_id.clone(),
            },
            Step::OutputAdded { label, name, geometry } => {
                self.claim(label)?;
                self.next_output += 1;
                ShellEvent::OutputAdded {
                    handle: OutputHandle(self.next_output),
                    name: name.clone(),
                    geometry: rect(*geometry),
                }
            }
            Step::OutputRemoved { output } => ShellEvent::OutputRemoved {
                output: self.output(output)?,
            },
            Step::OutputResized { output, geometry } => ShellEvent::OutputResized {
                output: self.output(output)?,
                geometry: rect(*geometry),
            },
            Step::OutputMoved { output, delta } => ShellEvent::OutputMoved {
                output: self.output(output)?,
                delta: point(*delta),
            },
            Step::SeatAdded { label, has_keyboard } => {
                self.claim(label)?;
                self.next_seat += 1;
                ShellEvent::SeatAdded {
                    handle: SeatHandle(self.next_seat),
                    name: label.clone(),
                    has_keyboard: *has_keyboard,
                }
            }
            Step::SeatCapabilitiesChanged { seat, has_keyboard } => ShellEvent::SeatCapabilitiesChanged {
                seat: self.seat(seat)?,
                has_keyboard: *has_keyboard,
            },
            Step::SeatRemoved { seat } => ShellEvent::SeatRemoved { seat: self.seat(seat)? },
            Step::KeyboardFocusChanged { seat, window } => ShellEvent::KeyboardFocusChanged {
                seat: self.seat(seat)?,
                focus: self.optional_window(window.as_deref())?,
            },
            Step::PointerButton {
                seat,
                button,
                window,
                default_grab,
            } => ShellEvent::PointerButton {
                seat: self.seat(seat)?,
                button: *button,
                focus: self.optional_window(window.as_deref())?,
                default_grab: *default_grab,
            },
            Step::TouchDown {
                seat,
                window,
                default_grab,
            } => ShellEvent::TouchDown {
                seat: self.seat(seat)?,
                focus: self.optional_window(window.as_deref())?,
                default_grab: *default_grab,
            },
            Step::GrabMotion { seat, location } => ShellEvent::GrabMotion {
                seat: self.seat(seat)?,
                location: point(*location),
            },
            Step::GrabReleased { seat } => ShellEvent::GrabReleased { seat: self.seat(seat)? },
        };
        Ok(event)
    }

    /// Bind the pending label to the record a creation event produced
    pub fn bind(&mut self, dispatched: Dispatched) {
        let Some(label) = self.pending.take() else {
            return;
        };
        match dispatched {
            Dispatched::Window(id) => {
                self.windows.insert(label, id);
            }
            Dispatched::Output(id) => {
                self.outputs.insert(label, id);
            }
            Dispatched::Seat(id) => {
                self.seats.insert(label, id);
            }
            Dispatched::Grab(_) | Dispatched::Handled => {}
        }
    }

    /// Forget a pending label whose creation event failed
    pub fn abandon(&mut self) {
        self.pending = None;
    }
}
