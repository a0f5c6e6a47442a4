//! Output selection and window geometry
//!
//! Pure functions for deciding which output a window belongs on and where its
//! view goes. No side effects: the same query against the same registry
//! always yields the same answer.

use smithay::utils::{Logical, Point, Rectangle, Size};

use crate::output::{OutputId, OutputRegistry};

/// Size sent for Normal placement: the client picks its own
pub const PREFERRED_SIZE: (i32, i32) = (0, 0);

/// Everything the output choice depends on besides the registry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputQuery<'a> {
    /// Output the window is already bound to
    pub bound_output: Option<OutputId>,
    /// Application id of the window
    pub app_id: Option<&'a str>,
    /// Output of the window's root ancestor
    pub root_output: Option<OutputId>,
    /// Output currently holding input focus
    pub focused_output: Option<OutputId>,
}

/// Pick the output for a window. First match wins:
///
/// 1. the output it is already bound to
/// 2. an output whose affinity list names its app id
/// 3. its root ancestor's output
/// 4. the focused output
/// 5. the default output
pub fn find_best_output(query: &OutputQuery<'_>, outputs: &OutputRegistry) -> Option<OutputId> {
    if let Some(output) = query.bound_output {
        return Some(output);
    }

    if let Some(output) = query.app_id.and_then(|app_id| outputs.find_by_app_id(app_id)) {
        return Some(output);
    }

    query
        .root_output
        .or(query.focused_output)
        .or_else(|| outputs.default_output())
}

/// Position that centres a surface of `size` on `area`.
///
/// Without an output the view goes to the global origin.
pub fn centered_position(
    area: Option<Rectangle<i32, Logical>>,
    size: Size<i32, Logical>,
) -> Point<i32, Logical> {
    match area {
        Some(area) => Point::from((
            area.loc.x + (area.size.w - size.w) / 2,
            area.loc.y + (area.size.h - size.h) / 2,
        )),
        None => Point::from((0, 0)),
    }
}
