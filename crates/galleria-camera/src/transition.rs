//! Smooth camera transitions: interpolates position, heading, pitch, and field
//! of view between two poses over a fixed duration with cubic ease-in-out.

use galleria_runtime::ease_in_out_cubic;

use crate::state::{CameraPose, shortest_arc, wrap_angle};

/// An in-flight interpolation from one pose to another.
#[derive(Clone, Debug)]
pub struct CameraTransition {
    from: CameraPose,
    to: CameraPose,
    duration: f64,
    elapsed: f64,
}

impl CameraTransition {
    /// Create a transition. A non-positive duration snaps on the first advance.
    pub fn new(from: CameraPose, to: CameraPose, duration: f64) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds and return the pose at the new progress.
    pub fn advance(&mut self, dt: f64) -> CameraPose {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.sample()
    }

    /// Pose at the current progress.
    pub fn sample(&self) -> CameraPose {
        if self.is_finished() {
            return self.to;
        }
        let t = ease_in_out_cubic(self.progress());
        CameraPose {
            position: self.from.position.lerp(self.to.position, t),
            yaw: wrap_angle(self.from.yaw + shortest_arc(self.from.yaw, self.to.yaw) * t),
            pitch: self.from.pitch + (self.to.pitch - self.from.pitch) * t,
            fov_deg: self.from.fov_deg + (self.to.fov_deg - self.from.fov_deg) * t,
        }
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration) as f32
    }

    /// Whether the full duration has elapsed.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
