//! Tick-driven performance monitor.
//!
//! Two timing domains run off the same `tick(dt)`: the frame-rate sampler
//! counts every frame, and a fixed interval snapshots renderer and scene
//! counters, checks them against the thresholds and notifies listeners.

use galleria_runtime::{EventChannel, Interval, Subscription};
use tracing::{debug, info, warn};

use crate::probe::{RenderProbe, census};
use crate::sample::{PerformanceGrade, PerformanceSample};
use crate::sampler::FrameRateSampler;
use crate::thresholds::{PerformanceThresholds, PerformanceWarning};

/// Timing of the two sampling domains.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingSettings {
    /// Seconds between resource snapshots and threshold checks.
    pub interval: f64,
    /// Seconds of frames folded into one fps figure.
    pub fps_window: f64,
    /// Frame-time figures kept for averaging.
    pub history: usize,
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self {
            interval: 1.0,
            fps_window: 1.0,
            history: 10,
        }
    }
}

pub struct PerformanceGovernor {
    thresholds: PerformanceThresholds,
    settings: SamplingSettings,
    sampler: FrameRateSampler,
    interval: Interval,
    stats: PerformanceSample,
    timing_known: bool,
    monitoring: bool,
    warnings: EventChannel<PerformanceWarning>,
    updates: EventChannel<PerformanceSample>,
}

impl std::fmt::Debug for PerformanceGovernor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerformanceGovernor")
            .field("thresholds", &self.thresholds)
            .field("monitoring", &self.monitoring)
            .field("stats", &self.stats)
            .finish()
    }
}

impl PerformanceGovernor {
    pub fn new(thresholds: PerformanceThresholds, settings: SamplingSettings) -> Self {
        Self {
            thresholds,
            settings,
            sampler: FrameRateSampler::new(settings.fps_window, settings.history),
            interval: Interval::new(settings.interval),
            stats: PerformanceSample::default(),
            timing_known: false,
            monitoring: false,
            warnings: EventChannel::new(),
            updates: EventChannel::new(),
        }
    }

    pub fn thresholds(&self) -> &PerformanceThresholds {
        &self.thresholds
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitoring
    }

    /// Begin sampling on subsequent ticks. A second call is a no-op.
    pub fn start_monitoring(&mut self) {
        if self.monitoring {
            return;
        }
        self.monitoring = true;
        self.interval.reset();
        info!(interval = self.settings.interval, "performance monitoring started");
    }

    pub fn stop_monitoring(&mut self) {
        if !self.monitoring {
            return;
        }
        self.monitoring = false;
        info!("performance monitoring stopped");
    }

    /// Advance both sampling domains by `dt` seconds. Returns the number of
    /// warnings raised during this tick.
    pub fn tick<P: RenderProbe + ?Sized>(&mut self, dt: f64, probe: &P) -> usize {
        if !self.monitoring {
            return 0;
        }

        if let Some(figure) = self.sampler.tick(dt) {
            self.stats.fps = figure.fps;
            self.stats.frame_time_ms = figure.frame_time_ms;
            self.timing_known = true;
        }

        // Several elapsed periods in one long frame collapse into one check.
        if self.interval.tick(dt) == 0 {
            return 0;
        }
        self.sample_resources(probe);
        self.check_thresholds()
    }

    fn sample_resources<P: RenderProbe + ?Sized>(&mut self, probe: &P) {
        let draw = probe.draw_stats();
        let counts = census(probe);
        self.stats.draw_calls = draw.draw_calls;
        self.stats.triangles = draw.triangles;
        self.stats.memory_ratio = probe.memory_ratio().unwrap_or(0.0);
        self.stats.textures = counts.textures;
        self.stats.geometries = counts.geometries;
        debug!(
            fps = self.stats.fps,
            frame_time_ms = self.stats.frame_time_ms,
            draw_calls = self.stats.draw_calls,
            textures = self.stats.textures,
            geometries = self.stats.geometries,
            "performance sample"
        );
    }

    fn check_thresholds(&mut self) -> usize {
        let warnings = self.thresholds.evaluate(&self.stats, self.timing_known);
        for warning in &warnings {
            warn!(metric = %warning.metric, hint = warning.hint, "{}", warning.message);
            self.warnings.emit(warning);
        }
        self.updates.emit(&self.stats);
        warnings.len()
    }

    /// Latest snapshot.
    pub fn stats(&self) -> PerformanceSample {
        self.stats
    }

    /// Mean frame time in milliseconds over the retained history.
    pub fn average_frame_time(&self) -> f32 {
        self.sampler.average_frame_time()
    }

    pub fn grade(&self) -> PerformanceGrade {
        PerformanceGrade::from_fps(self.stats.fps)
    }

    /// Zero every counter and the history. Thresholds, listeners and the
    /// monitoring flag are kept.
    pub fn reset(&mut self) {
        self.stats = PerformanceSample::default();
        self.sampler.reset();
        self.interval.reset();
        self.timing_known = false;
    }

    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn on_warning(&self, listener: impl FnMut(&PerformanceWarning) + 'static) -> Subscription {
        self.warnings.subscribe(listener)
    }

    /// Fired once per sampling interval with the fresh snapshot.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn on_update(&self, listener: impl FnMut(&PerformanceSample) + 'static) -> Subscription {
        self.updates.subscribe(listener)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use galleria_assets::Mesh;

    use super::*;
    use crate::probe::DrawStats;
    use crate::thresholds::Metric;

    #[derive(Default)]
    struct FakeProbe {
        draw_calls: u32,
        memory: Option<f32>,
    }

    impl RenderProbe for FakeProbe {
        fn draw_stats(&self) -> DrawStats {
            DrawStats {
                draw_calls: self.draw_calls,
                triangles: u64::from(self.draw_calls) * 2,
            }
        }

        fn memory_ratio(&self) -> Option<f32> {
            self.memory
        }

        fn visit_meshes(&self, _f: &mut dyn FnMut(&Mesh)) {}
    }

    fn governor(min_fps: f32) -> PerformanceGovernor {
        PerformanceGovernor::new(
            PerformanceThresholds {
                min_fps,
                ..PerformanceThresholds::default()
            },
            SamplingSettings::default(),
        )
    }

    fn collect(governor: &PerformanceGovernor) -> (Rc<RefCell<Vec<PerformanceWarning>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = governor.on_warning(move |w| sink.borrow_mut().push(w.clone()));
        (seen, sub)
    }

    fn run_at_45_fps(governor: &mut PerformanceGovernor) {
        let probe = FakeProbe::default();
        for _ in 0..140 {
            governor.tick(1.0 / 45.0, &probe);
        }
    }

    #[test]
    fn test_45_fps_above_minimum_is_quiet() {
        let mut governor = governor(30.0);
        let (seen, _sub) = collect(&governor);
        governor.start_monitoring();
        run_at_45_fps(&mut governor);
        assert!(seen.borrow().is_empty());
        assert_eq!(governor.stats().fps, 45.0);
    }

    #[test]
    fn test_45_fps_below_minimum_warns_each_interval() {
        let mut governor = governor(50.0);
        let (seen, _sub) = collect(&governor);
        governor.start_monitoring();
        run_at_45_fps(&mut governor);
        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|w| w.metric == Metric::Fps));
        assert!(seen.iter().all(|w| w.sample.fps == 45.0));
    }

    #[test]
    fn test_idle_until_started() {
        let mut governor = governor(30.0);
        let probe = FakeProbe {
            draw_calls: 5000,
            memory: None,
        };
        for _ in 0..120 {
            assert_eq!(governor.tick(1.0 / 60.0, &probe), 0);
        }
        assert_eq!(governor.stats(), PerformanceSample::default());
    }

    #[test]
    fn test_stop_halts_sampling() {
        let mut governor = governor(30.0);
        let probe = FakeProbe::default();
        governor.start_monitoring();
        governor.stop_monitoring();
        assert!(!governor.is_monitoring());
        for _ in 0..120 {
            governor.tick(1.0 / 60.0, &probe);
        }
        assert_eq!(governor.stats().fps, 0.0);
    }

    #[test]
    fn test_all_breaches_in_one_interval() {
        let mut governor = governor(30.0);
        let (seen, _sub) = collect(&governor);
        governor.start_monitoring();
        let probe = FakeProbe {
            draw_calls: 1500,
            memory: Some(0.9),
        };
        governor.tick(0.5, &probe);
        assert!(seen.borrow().is_empty());
        let raised = governor.tick(0.5, &probe);
        let metrics: Vec<Metric> = seen.borrow().iter().map(|w| w.metric).collect();
        // fps = 2 and frame time = 500 ms are breaches too.
        assert_eq!(raised, 4);
        assert_eq!(
            metrics,
            vec![Metric::Fps, Metric::FrameTime, Metric::Memory, Metric::DrawCalls]
        );
    }

    #[test]
    fn test_updates_fire_each_interval() {
        let mut governor = governor(30.0);
        let updates = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&updates);
        let _sub = governor.on_update(move |_| *counter.borrow_mut() += 1);
        governor.start_monitoring();
        let probe = FakeProbe {
            draw_calls: 10,
            memory: None,
        };
        for _ in 0..4 {
            governor.tick(0.5, &probe);
        }
        assert_eq!(*updates.borrow(), 2);
        assert_eq!(governor.stats().draw_calls, 10);
        assert_eq!(governor.stats().triangles, 20);
    }

    #[test]
    fn test_grade_and_average() {
        let mut governor = governor(30.0);
        governor.start_monitoring();
        run_at_45_fps(&mut governor);
        assert_eq!(governor.grade(), PerformanceGrade::Good);
        assert!((governor.average_frame_time() - 22.0).abs() < 1.0);
    }

    #[test]
    fn test_reset_keeps_thresholds() {
        let mut governor = governor(50.0);
        governor.start_monitoring();
        run_at_45_fps(&mut governor);
        governor.reset();
        assert_eq!(governor.stats(), PerformanceSample::default());
        assert_eq!(governor.average_frame_time(), 0.0);
        assert_eq!(governor.grade(), PerformanceGrade::Poor);
        assert_eq!(governor.thresholds().min_fps, 50.0);
        assert!(governor.is_monitoring());
    }
}
