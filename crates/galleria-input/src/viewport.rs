//! Conversion from window coordinates to normalized device coordinates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Size of the drawable area in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in logical pixels.
    pub width: f32,
    /// Height in logical pixels.
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    /// Create a viewport of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width divided by height, or 1.0 for a degenerate viewport.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height <= 0.0 {
            1.0
        } else {
            self.width / self.height
        }
    }

    /// Map a window position to NDC: x in `[-1, 1]` left to right, y in
    /// `[-1, 1]` bottom to top. A degenerate viewport maps everything to the center.
    pub fn to_ndc(&self, position: Vec2) -> Vec2 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            position.x / self.width * 2.0 - 1.0,
            -(position.y / self.height) * 2.0 + 1.0,
        )
    }

    /// Window position of the viewport center.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}
