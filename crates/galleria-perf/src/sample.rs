use std::fmt;

use serde::Serialize;

/// Point-in-time performance snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PerformanceSample {
    /// Frames per second, rounded.
    pub fps: f32,
    /// Mean frame time in milliseconds, rounded.
    pub frame_time_ms: f32,
    /// Used over available memory, `0.0..=1.0`. Zero when unknown.
    pub memory_ratio: f32,
    pub draw_calls: u32,
    pub triangles: u64,
    /// Distinct textures referenced by scene materials.
    pub textures: usize,
    /// Distinct geometries referenced by scene meshes.
    pub geometries: usize,
}

/// Coarse quality band derived from fps alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceGrade {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl PerformanceGrade {
    /// `>= 60` excellent, `>= 45` good, `>= 30` fair, otherwise poor.
    pub fn from_fps(fps: f32) -> Self {
        if fps >= 60.0 {
            Self::Excellent
        } else if fps >= 45.0 {
            Self::Good
        } else if fps >= 30.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

impl fmt::Display for PerformanceGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        })
    }
}
