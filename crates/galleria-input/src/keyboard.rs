//! Keyboard navigation bindings.
//!
//! Physical key codes are used so the arrows behave identically on every layout.

use winit::keyboard::KeyCode;

/// A navigation command bound to a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavigationKey {
    /// Turn left by one keyboard step.
    YawLeft,
    /// Turn right by one keyboard step.
    YawRight,
    /// Tilt up by one keyboard step.
    PitchUp,
    /// Tilt down by one keyboard step.
    PitchDown,
    /// Return to the home pose and clear the selection.
    ResetView,
    /// Clear the selection, leaving the camera where it is.
    ClearSelection,
}

impl NavigationKey {
    /// Look up the command bound to `key`.
    pub fn from_key_code(key: KeyCode) -> Option<Self> {
        Some(match key {
            KeyCode::ArrowLeft => Self::YawLeft,
            KeyCode::ArrowRight => Self::YawRight,
            KeyCode::ArrowUp => Self::PitchUp,
            KeyCode::ArrowDown => Self::PitchDown,
            KeyCode::Space => Self::ResetView,
            KeyCode::Escape => Self::ClearSelection,
            _ => return None,
        })
    }

    /// Whether holding the key should keep applying the command.
    pub fn repeats(self) -> bool {
        matches!(
            self,
            Self::YawLeft | Self::YawRight | Self::PitchUp | Self::PitchDown
        )
    }
}
