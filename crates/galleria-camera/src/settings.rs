//! Interaction tuning: drag and key rates, field-of-view range, home pose,
//! gesture windows, and animation timing.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Tuning for the interaction controller. Angles in radians unless the field
/// name says degrees, times in seconds, distances in meters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Radians of yaw/pitch per pixel of drag.
    pub rotation_speed: f32,
    /// Yaw change per arrow-key press.
    pub key_yaw_step: f32,
    /// Pitch change per arrow-key press.
    pub key_pitch_step: f32,
    /// Pitch is clamped to `±pitch_limit`.
    pub pitch_limit: f32,
    pub fov_min_deg: f32,
    pub fov_max_deg: f32,
    /// Field-of-view change per wheel line.
    pub wheel_fov_step_deg: f32,
    pub home_position: Vec3,
    pub home_yaw: f32,
    pub home_fov_deg: f32,
    /// Maximum gap between a release and the next touch start for a double tap.
    pub double_tap_window: f64,
    /// Idle time before auto-rotation starts.
    pub auto_rotate_delay: f64,
    /// Auto-rotation rate in radians per second.
    pub auto_rotate_speed: f32,
    /// Duration of focus and reset animations.
    pub animation_duration: f64,
    /// How far in front of a frame the camera stops when focusing it.
    pub focus_distance: f32,
    /// Maximum pointer travel in pixels for a press/release to count as a click.
    pub click_slop: f32,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            rotation_speed: 0.005,
            key_yaw_step: 0.1,
            key_pitch_step: 0.05,
            pitch_limit: 30.0_f32.to_radians(),
            fov_min_deg: 30.0,
            fov_max_deg: 90.0,
            wheel_fov_step_deg: 2.0,
            home_position: Vec3::new(0.0, 1.6, 0.0),
            home_yaw: 0.0,
            home_fov_deg: 75.0,
            double_tap_window: 0.3,
            auto_rotate_delay: 10.0,
            auto_rotate_speed: 0.06,
            animation_duration: 1.0,
            focus_distance: 3.0,
            click_slop: 4.0,
        }
    }
}

impl InteractionSettings {
    /// Clamp a field of view to the configured range.
    pub fn clamp_fov(&self, fov_deg: f32) -> f32 {
        fov_deg.clamp(self.fov_min_deg, self.fov_max_deg.max(self.fov_min_deg))
    }

    /// Clamp a pitch to the configured limit.
    pub fn clamp_pitch(&self, pitch: f32) -> f32 {
        let limit = self.pitch_limit.abs();
        pitch.clamp(-limit, limit)
    }
}
