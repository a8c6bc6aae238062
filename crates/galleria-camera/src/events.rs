//! Notifications raised by the interaction controller.

use serde::Serialize;

use crate::state::CameraState;

/// What caused a selection change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SelectionSource {
    /// Mouse click on a frame.
    Click,
    /// Double tap on a frame.
    DoubleTap,
    /// `focus_on_frame` called by external code.
    Programmatic,
    /// Escape pressed.
    Cleared,
    /// View reset.
    Reset,
}

/// Selected item changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SelectionChanged {
    pub previous: Option<usize>,
    pub current: Option<usize>,
    pub source: SelectionSource,
}

/// Hovered item changed. Only raised on change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HoverChanged {
    pub previous: Option<usize>,
    pub current: Option<usize>,
}

/// Queued until the end of the tick.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Notification {
    Selection(SelectionChanged),
    Hover(HoverChanged),
    CameraMoved(CameraState),
}
