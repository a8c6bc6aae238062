use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sample::PerformanceSample;

/// Acceptable bounds for each sampled metric.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceThresholds {
    pub min_fps: f32,
    pub max_frame_time_ms: f32,
    pub max_memory_ratio: f32,
    pub max_draw_calls: u32,
}

impl Default for PerformanceThresholds {
    fn default() -> Self {
        Self {
            min_fps: 30.0,
            max_frame_time_ms: 33.0,
            max_memory_ratio: 0.8,
            max_draw_calls: 1000,
        }
    }
}

/// Metric a warning refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Fps,
    FrameTime,
    Memory,
    DrawCalls,
}

impl Metric {
    pub fn name(self) -> &'static str {
        match self {
            Self::Fps => "fps",
            Self::FrameTime => "frameTime",
            Self::Memory => "memory",
            Self::DrawCalls => "drawCalls",
        }
    }

    /// Remediation hint shown alongside a breach of this metric.
    pub fn hint(self) -> &'static str {
        match self {
            Self::Fps | Self::FrameTime => {
                "lower render quality and shadow resolution, enable level of detail"
            }
            Self::Memory => "evict the texture cache and release unused geometry",
            Self::DrawCalls => "batch draw calls by merging geometry or instancing shared meshes",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Advisory event raised once per breached metric per sampling interval.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PerformanceWarning {
    pub metric: Metric,
    pub message: String,
    pub hint: &'static str,
    pub sample: PerformanceSample,
}

impl PerformanceThresholds {
    /// Compare `sample` against every bound. Timing bounds are skipped until
    /// `timing_known` is set.
    pub fn evaluate(&self, sample: &PerformanceSample, timing_known: bool) -> Vec<PerformanceWarning> {
        let mut breaches = Vec::new();
        if timing_known && sample.fps < self.min_fps {
            breaches.push((
                Metric::Fps,
                format!("low frame rate: {} fps (minimum {})", sample.fps, self.min_fps),
            ));
        }
        if timing_known && sample.frame_time_ms > self.max_frame_time_ms {
            breaches.push((
                Metric::FrameTime,
                format!(
                    "slow frames: {} ms (maximum {})",
                    sample.frame_time_ms, self.max_frame_time_ms
                ),
            ));
        }
        if sample.memory_ratio > self.max_memory_ratio {
            breaches.push((
                Metric::Memory,
                format!(
                    "memory usage at {:.0}% (maximum {:.0}%)",
                    sample.memory_ratio * 100.0,
                    self.max_memory_ratio * 100.0
                ),
            ));
        }
        if sample.draw_calls > self.max_draw_calls {
            breaches.push((
                Metric::DrawCalls,
                format!(
                    "too many draw calls: {} (maximum {})",
                    sample.draw_calls, self.max_draw_calls
                ),
            ));
        }
        breaches
            .into_iter()
            .map(|(metric, message)| PerformanceWarning {
                metric,
                message,
                hint: metric.hint(),
                sample: *sample,
            })
            .collect()
    }
}
