//! Adaptive performance governor: frame-rate sampling, periodic resource
//! sampling, threshold checks with remediation hints, and a coarse grade.

mod governor;
mod probe;
mod sample;
mod sampler;
mod thresholds;

pub use governor::{PerformanceGovernor, SamplingSettings};
pub use probe::{DrawStats, RenderProbe, SceneCensus, census};
pub use sample::{PerformanceGrade, PerformanceSample};
pub use sampler::{FrameRateFigure, FrameRateSampler};
pub use thresholds::{Metric, PerformanceThresholds, PerformanceWarning};
