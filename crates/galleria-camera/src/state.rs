//! Camera pose and the read-only state snapshot handed to external code.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use serde::Serialize;

/// Which part of the interaction state machine the camera is in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum NavigationMode {
    /// No gesture, no animation.
    #[default]
    Idle,
    /// Primary button or single finger held; movement rotates the view.
    Dragging,
    /// Two fingers down; distance changes zoom.
    Pinching,
    /// A smooth transition toward a target pose is in flight.
    Animating,
    /// Slow idle rotation after the auto-rotate delay.
    AutoRotating,
}

/// Camera position, orientation, and vertical field of view.
///
/// Yaw 0 looks down +Z; positive yaw turns toward +X. Positive pitch looks up.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CameraPose {
    /// World position in meters.
    pub position: Vec3,
    /// Heading in radians, kept in `[0, 2π)`.
    pub yaw: f32,
    /// Elevation in radians.
    pub pitch: f32,
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
}

impl CameraPose {
    /// Construct a pose, normalizing yaw.
    pub fn new(position: Vec3, yaw: f32, pitch: f32, fov_deg: f32) -> Self {
        Self {
            position,
            yaw: wrap_angle(yaw),
            pitch,
            fov_deg,
        }
    }

    /// A pose at `position` looking at `target`.
    pub fn looking_at(position: Vec3, target: Vec3, fov_deg: f32) -> Self {
        let dir = (target - position).normalize_or_zero();
        if dir == Vec3::ZERO {
            return Self::new(position, 0.0, 0.0, fov_deg);
        }
        Self::new(
            position,
            dir.x.atan2(dir.z),
            dir.y.clamp(-1.0, 1.0).asin(),
            fov_deg,
        )
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch)
    }

    /// Whether two poses match within `eps` on every component. Yaw is compared
    /// along the shortest arc.
    pub fn approx_eq(&self, other: &Self, eps: f32) -> bool {
        self.position.distance(other.position) <= eps
            && shortest_arc(self.yaw, other.yaw).abs() <= eps
            && (self.pitch - other.pitch).abs() <= eps
            && (self.fov_deg - other.fov_deg).abs() <= eps
    }
}

/// Wrap an angle into `[0, 2π)`.
pub(crate) fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Signed difference `to - from` in `(-π, π]`.
pub(crate) fn shortest_arc(from: f32, to: f32) -> f32 {
    let diff = (to - from).rem_euclid(TAU);
    if diff > PI { diff - TAU } else { diff }
}

/// Snapshot of everything the controller exposes about the camera.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CameraState {
    /// Current pose.
    pub pose: CameraPose,
    /// Selected item index, if any.
    pub selected: Option<usize>,
    /// Item index under the pointer, if any.
    pub hovered: Option<usize>,
    /// State machine mode.
    pub mode: NavigationMode,
}
