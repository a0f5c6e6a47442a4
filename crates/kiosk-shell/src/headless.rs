//! Headless host
//!
//! [`HeadlessHost`] implements the compositor side of the shell without a
//! display: it hands out handles from counters, remembers the state the shell
//! configured, and records every command in order. It drives the replay tool
//! and the test harness.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use smithay::utils::{Logical, Point, Rectangle, Size};

use crate::host::{Host, OutputHandle, SeatHandle, SurfaceHandle, ViewHandle};
use crate::window::WindowId;

/// One command the shell issued, in a serializable form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum HostCommand {
    SetUserData { surface: u64, attached: bool },
    CreateView { surface: u64, view: u64 },
    DestroyView { view: u64 },
    MapView { view: u64 },
    RaiseView { view: u64 },
    SetViewPosition { view: u64, x: i32, y: i32 },
    CreateBackground { output: u64, view: u64, x: i32, y: i32, width: i32, height: i32 },
    SetFullscreen { surface: u64, fullscreen: bool },
    SetMaximized { surface: u64, maximized: bool },
    SetSize { surface: u64, width: i32, height: i32 },
    SetActivated { surface: u64, activated: bool },
    SetKeyboardFocus { seat: u64, surface: Option<u64> },
    PostNoMemory { surface: u64 },
}

impl fmt::Display for HostCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetUserData { surface, attached } => write!(f, "user-data surface={surface} attached={attached}"),
            Self::CreateView { surface, view } => write!(f, "create-view surface={surface} view={view}"),
            Self::DestroyView { view } => write!(f, "destroy-view view={view}"),
            Self::MapView { view } => write!(f, "map-view view={view}"),
            Self::RaiseView { view } => write!(f, "raise-view view={view}"),
            Self::SetViewPosition { view, x, y } => write!(f, "position view={view} at {x},{y}"),
            Self::CreateBackground {
                output,
                view,
                x,
                y,
                width,
                height,
            } => write!(f, "background output={output} view={view} {width}x{height}+{x}+{y}"),
            Self::SetFullscreen { surface, fullscreen } => {
                write!(f, "fullscreen surface={surface} {fullscreen}")
            }
            Self::SetMaximized { surface, maximized } => write!(f, "maximized surface={surface} {maximized}"),
            Self::SetSize { surface, width, height } => write!(f, "size surface={surface} {width}x{height}"),
            Self::SetActivated { surface, activated } => write!(f, "activated surface={surface} {activated}"),
            Self::SetKeyboardFocus { seat, surface } => match surface {
                Some(surface) => write!(f, "keyboard-focus seat={seat} surface={surface}"),
                None => write!(f, "keyboard-focus seat={seat} none"),
            },
            Self::PostNoMemory { surface } => write!(f, "no-memory surface={surface}"),
        }
    }
}

/// Compositor stand-in that records what the shell asks of it
#[derive(Debug, Default)]
pub struct HeadlessHost {
    commands: Vec<HostCommand>,

    next_view: u64,

    /// Refuse the next view allocation (window or background)
    pub fail_next_view: bool,

    /// Whether a client is around to receive no-memory errors
    pub clients_connected: bool,

    user_data: HashMap<SurfaceHandle, WindowId>,
    live_views: Vec<ViewHandle>,
    /// Mapped views, top first
    view_stack: Vec<ViewHandle>,
    view_positions: HashMap<ViewHandle, Point<i32, Logical>>,
    keyboard_focus: HashMap<SeatHandle, SurfaceHandle>,
    activated: HashMap<SurfaceHandle, bool>,
    fullscreen: HashMap<SurfaceHandle, bool>,
    maximized: HashMap<SurfaceHandle, bool>,
    sizes: HashMap<SurfaceHandle, Size<i32, Logical>>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self {
            clients_connected: true,
            ..Default::default()
        }
    }

    /// Every command issued so far, oldest first
    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }

    /// Drain the command log
    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn count(&self, pred: impl Fn(&HostCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    /// Activation changes sent for `surface`, in order
    pub fn activation_changes(&self, surface: SurfaceHandle) -> Vec<bool> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                HostCommand::SetActivated { surface: s, activated } if *s == surface.0 => Some(*activated),
                _ => None,
            })
            .collect()
    }

    pub fn user_data(&self, surface: SurfaceHandle) -> Option<WindowId> {
        self.user_data.get(&surface).copied()
    }

    pub fn is_activated(&self, surface: SurfaceHandle) -> bool {
        self.activated.get(&surface).copied().unwrap_or(false)
    }

    pub fn is_fullscreen(&self, surface: SurfaceHandle) -> bool {
        self.fullscreen.get(&surface).copied().unwrap_or(false)
    }

    pub fn is_maximized(&self, surface: SurfaceHandle) -> bool {
        self.maximized.get(&surface).copied().unwrap_or(false)
    }

    /// Last size configured for `surface`
    pub fn size(&self, surface: SurfaceHandle) -> Option<Size<i32, Logical>> {
        self.sizes.get(&surface).copied()
    }

    pub fn view_position(&self, view: ViewHandle) -> Option<Point<i32, Logical>> {
        self.view_positions.get(&view).copied()
    }

    pub fn keyboard_focus(&self, seat: SeatHandle) -> Option<SurfaceHandle> {
        self.keyboard_focus.get(&seat).copied()
    }

    pub fn is_view_live(&self, view: ViewHandle) -> bool {
        self.live_views.contains(&view)
    }

    pub fn live_view_count(&self) -> usize {
        self.live_views.len()
    }

    /// Mapped views, top first
    pub fn view_stack(&self) -> &[ViewHandle] {
        &self.view_stack
    }

    fn allocate_view(&mut self) -> Option<ViewHandle> {
        if std::mem::take(&mut self.fail_next_view) {
            return None;
        }
        self.next_view += 1;
        let view = ViewHandle(self.next_view);
        self.live_views.push(view);
        Some(view)
    }
}

impl Host for HeadlessHost {
    fn set_user_data(&mut self, surface: SurfaceHandle, window: Option<WindowId>) {
        match window {
            Some(window) => self.user_data.insert(surface, window),
            None => self.user_data.remove(&surface),
        };
        self.commands.push(HostCommand::SetUserData {
            surface: surface.0,
            attached: window.is_some(),
        });
    }

    fn create_view(&mut self, surface: SurfaceHandle) -> Option<ViewHandle> {
        let view = self.allocate_view()?;
        self.commands.push(HostCommand::CreateView {
            surface: surface.0,
            view: view.0,
        });
        Some(view)
    }

    fn destroy_view(&mut self, view: ViewHandle) {
        self.live_views.retain(|v| *v != view);
        self.view_stack.retain(|v| *v != view);
        self.view_positions.remove(&view);
        self.commands.push(HostCommand::DestroyView { view: view.0 });
    }

    fn map_view(&mut self, view: ViewHandle) {
        self.view_stack.retain(|v| *v != view);
        self.view_stack.insert(0, view);
        self.commands.push(HostCommand::MapView { view: view.0 });
    }

    fn raise_view(&mut self, view: ViewHandle) {
        self.view_stack.retain(|v| *v != view);
        self.view_stack.insert(0, view);
        self.commands.push(HostCommand::RaiseView { view: view.0 });
    }

    fn set_view_position(&mut self, view: ViewHandle, position: Point<i32, Logical>) {
        self.view_positions.insert(view, position);
        self.commands.push(HostCommand::SetViewPosition {
            view: view.0,
            x: position.x,
            y: position.y,
        });
    }

    fn create_background(&mut self, output: OutputHandle, area: Rectangle<i32, Logical>) -> Option<ViewHandle> {
        let view = self.allocate_view()?;
        self.view_positions.insert(view, area.loc);
        self.commands.push(HostCommand::CreateBackground {
            output: output.0,
            view: view.0,
            x: area.loc.x,
            y: area.loc.y,
            width: area.size.w,
            height: area.size.h,
        });
        Some(view)
    }

    fn set_fullscreen(&mut self, surface: SurfaceHandle, fullscreen: bool) {
        self.fullscreen.insert(surface, fullscreen);
        self.commands.push(HostCommand::SetFullscreen {
            surface: surface.0,
            fullscreen,
        });
    }

    fn set_maximized(&mut self, surface: SurfaceHandle, maximized: bool) {
        self.maximized.insert(surface, maximized);
        self.commands.push(HostCommand::SetMaximized {
            surface: surface.0,
            maximized,
        });
    }

    fn set_size(&mut self, surface: SurfaceHandle, size: Size<i32, Logical>) {
        self.sizes.insert(surface, size);
        self.commands.push(HostCommand::SetSize {
            surface: surface.0,
            width: size.w,
            height: size.h,
        });
    }

    fn set_activated(&mut self, surface: SurfaceHandle, activated: bool) {
        self.activated.insert(surface, activated);
        self.commands.push(HostCommand::SetActivated {
            surface: surface.0,
            activated,
        });
    }

    fn set_keyboard_focus(&mut self, seat: SeatHandle, surface: Option<SurfaceHandle>) {
        match surface {
            Some(surface) => self.keyboard_focus.insert(seat, surface),
            None => self.keyboard_focus.remove(&seat),
        };
        self.commands.push(HostCommand::SetKeyboardFocus {
            seat: seat.0,
            surface: surface.map(|s| s.0),
        });
    }

    fn post_no_memory(&mut self, surface: SurfaceHandle) -> bool {
        self.commands.push(HostCommand::PostNoMemory { surface: surface.0 });
        self.clients_connected
    }
}
