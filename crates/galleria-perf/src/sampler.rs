//! Per-tick frame-rate sampler.

use std::collections::VecDeque;

/// One fps / frame-time figure, produced about once per window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameRateFigure {
    pub fps: f32,
    pub frame_time_ms: f32,
}

/// Counts frames until the accumulated time reaches the window, then reports
/// rounded fps and mean frame time and starts a new window.
#[derive(Clone, Debug)]
pub struct FrameRateSampler {
    window: f64,
    frames: u32,
    elapsed: f64,
    history: VecDeque<f32>,
    capacity: usize,
}

impl FrameRateSampler {
    /// `window` in seconds; `capacity` frame-time figures are retained.
    pub fn new(window: f64, capacity: usize) -> Self {
        Self {
            window: window.max(0.001),
            frames: 0,
            elapsed: 0.0,
            history: VecDeque::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
        }
    }

    /// Record one frame lasting `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> Option<FrameRateFigure> {
        self.frames += 1;
        self.elapsed += dt.max(0.0);
        if self.elapsed < self.window {
            return None;
        }
        let elapsed_ms = self.elapsed * 1000.0;
        let figure = FrameRateFigure {
            fps: (f64::from(self.frames) * 1000.0 / elapsed_ms).round() as f32,
            frame_time_ms: (elapsed_ms / f64::from(self.frames)).round() as f32,
        };
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(figure.frame_time_ms);
        self.frames = 0;
        self.elapsed = 0.0;
        Some(figure)
    }

    /// Mean of the retained frame times in milliseconds, 0 when empty.
    pub fn average_frame_time(&self) -> f32 {
        if self.history.is_empty() {
            return 0.0;
        }
        self.history.iter().sum::<f32>() / self.history.len() as f32
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn reset(&mut self) {
        self.frames = 0;
        self.elapsed = 0.0;
        self.history.clear();
    }
}
