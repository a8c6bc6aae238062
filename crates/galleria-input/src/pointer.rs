//! Pointer (mouse) state tracker with click-versus-drag detection.
//!
//! A primary press followed by a release counts as a click only if the cursor
//! travelled no further than the click slop in between.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Default click slop in logical pixels.
pub const DEFAULT_CLICK_SLOP: f32 = 4.0;

/// Outcome of a mouse button event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerButtonEvent {
    /// The primary button went down.
    PrimaryPressed,
    /// The primary button came up. `click` is set when the pointer stayed within the slop.
    PrimaryReleased { click: bool },
    /// Any other button, or a redundant transition.
    Ignored,
}

/// Pointer position, primary button, and travel since the last press.
#[derive(Debug, Clone)]
pub struct PointerState {
    position: Vec2,
    has_position: bool,
    primary_down: bool,
    travelled: f32,
    click_slop: f32,
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new(DEFAULT_CLICK_SLOP)
    }
}

impl PointerState {
    /// Create a tracker with the given click slop in logical pixels.
    #[must_use]
    pub fn new(click_slop: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            has_position: false,
            primary_down: false,
            travelled: 0.0,
            click_slop: click_slop.max(0.0),
        }
    }

    /// Process a cursor move and return the delta since the previous position.
    ///
    /// The first move after creation reports a zero delta.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) -> Vec2 {
        let new_pos = Vec2::new(x as f32, y as f32);
        let delta = if self.has_position {
            new_pos - self.position
        } else {
            Vec2::ZERO
        };
        self.position = new_pos;
        self.has_position = true;
        if self.primary_down {
            self.travelled += delta.length();
        }
        delta
    }

    /// Process a button transition.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) -> PointerButtonEvent {
        if button != MouseButton::Left {
            return PointerButtonEvent::Ignored;
        }
        match state {
            ElementState::Pressed if !self.primary_down => {
                self.primary_down = true;
                self.travelled = 0.0;
                PointerButtonEvent::PrimaryPressed
            }
            ElementState::Released if self.primary_down => {
                self.primary_down = false;
                PointerButtonEvent::PrimaryReleased {
                    click: self.travelled <= self.click_slop,
                }
            }
            _ => PointerButtonEvent::Ignored,
        }
    }

    /// Convert a wheel delta to lines (positive = scroll up).
    pub fn on_scroll(&self, delta: MouseScrollDelta) -> f32 {
        match delta {
            MouseScrollDelta::LineDelta(_x, y) => y,
            // ~40 pixels per line
            MouseScrollDelta::PixelDelta(pos) => (pos.y / 40.0) as f32,
        }
    }

    /// Current cursor position in window-logical coordinates.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Whether the primary button is held.
    #[must_use]
    pub fn is_primary_down(&self) -> bool {
        self.primary_down
    }
}
