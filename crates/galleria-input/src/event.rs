//! Platform-neutral input events consumed by the interaction controller.

use winit::event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase};
use winit::keyboard::KeyCode;

/// One input event, in window-logical pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// The cursor moved to `(x, y)`.
    CursorMoved { x: f64, y: f64 },
    /// A mouse button changed state.
    MouseButton {
        button: MouseButton,
        state: ElementState,
    },
    /// The wheel scrolled.
    MouseWheel { delta: MouseScrollDelta },
    /// A touch point started, moved, ended, or was cancelled.
    Touch {
        id: u64,
        phase: TouchPhase,
        x: f64,
        y: f64,
    },
    /// A physical key changed state.
    Key {
        key: KeyCode,
        state: ElementState,
        repeat: bool,
    },
}

impl InputEvent {
    /// Convenience constructor for a key press.
    pub fn key_pressed(key: KeyCode) -> Self {
        Self::Key {
            key,
            state: ElementState::Pressed,
            repeat: false,
        }
    }

    /// Convenience constructor for a touch event.
    pub fn touch(id: u64, phase: TouchPhase, x: f64, y: f64) -> Self {
        Self::Touch { id, phase, x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_pressed_is_not_repeat() {
        assert_eq!(
            InputEvent::key_pressed(KeyCode::Space),
            InputEvent::Key {
                key: KeyCode::Space,
                state: ElementState::Pressed,
                repeat: false,
            }
        );
    }
}
