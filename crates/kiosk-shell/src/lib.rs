//! Kiosk shell library
//!
//! Decides which output each window occupies, which window holds keyboard
//! focus, and keeps both consistent as outputs, windows and seats come and go.
//! The compositor drives it through [`Shell`] and receives commands back
//! through the [`Host`] trait.

pub mod config;
pub mod event;
pub mod focus;
pub mod grab;
#[cfg(feature = "headless")]
pub mod headless;
pub mod hierarchy;
pub mod host;
pub mod output;
pub mod placement;
pub mod seat;
pub mod shell;
pub mod signal;
pub mod window;

pub use config::Config;
pub use event::{Dispatched, ShellEvent};
pub use host::{Host, OutputHandle, SeatHandle, SurfaceHandle, ViewHandle};
pub use output::{AffinityList, OutputId};
pub use seat::SeatId;
pub use shell::{Shell, ShellError};
pub use window::{Commit, Placement, WindowId};
