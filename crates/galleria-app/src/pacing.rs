//! Tour pacing: rendered frames of arbitrary length are split into fixed
//! simulation steps for the camera and lights.
//!
//! Frame lengths come from the caller, so a scripted tour and a live window
//! replay identically for the same frame-time sequence.

use tracing::warn;

/// Length of one simulation step (60 Hz).
pub const STEP_SECONDS: f64 = 1.0 / 60.0;

/// Longest frame the tour catches up on. A stall beyond this (a slow texture
/// decode, a debugger pause) slows the tour down instead of fast-forwarding
/// the camera through a burst of steps.
pub const FRAME_CAP_SECONDS: f64 = 0.25;

#[derive(Debug, Default)]
pub struct TourClock {
    backlog: f64,
    sim_time: f64,
    frames: u64,
    steps: u64,
}

impl TourClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one rendered frame lasting `frame_time` seconds.
    ///
    /// `step(STEP_SECONDS, sim_time)` runs once per whole step owed, with the
    /// simulated time at the start of that step. Returns the frame time the
    /// frame actually counts for, after clamping to `[0, FRAME_CAP_SECONDS]`.
    pub fn frame(&mut self, frame_time: f64, mut step: impl FnMut(f64, f64)) -> f64 {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > FRAME_CAP_SECONDS {
            warn!(
                frame_ms = frame_time * 1000.0,
                cap_ms = FRAME_CAP_SECONDS * 1000.0,
                "tour frame stalled, camera and lights skip ahead only to the cap"
            );
            frame_time = FRAME_CAP_SECONDS;
        }

        self.backlog += frame_time;
        while self.backlog >= STEP_SECONDS {
            step(STEP_SECONDS, self.sim_time);
            self.sim_time += STEP_SECONDS;
            self.backlog -= STEP_SECONDS;
            self.steps += 1;
        }
        self.frames += 1;
        frame_time
    }

    /// Rendered frames so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Simulation steps so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Simulated seconds.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixty_hz_frame_is_one_step() {
        let mut clock = TourClock::new();
        let mut steps = 0;
        let counted = clock.frame(STEP_SECONDS, |_, _| steps += 1);
        assert_eq!(steps, 1);
        assert_eq!(counted, STEP_SECONDS);
        assert!(clock.backlog.abs() < 1e-12);
    }

    #[test]
    fn test_thirty_hz_frames_step_twice() {
        let mut clock = TourClock::new();
        let mut starts = Vec::new();
        clock.frame(2.0 * STEP_SECONDS + 1e-9, |dt, at| {
            assert_eq!(dt, STEP_SECONDS);
            starts.push(at);
        });
        assert_eq!(starts.len(), 2);
        assert!(starts[0].abs() < 1e-12);
        assert!((starts[1] - STEP_SECONDS).abs() < 1e-12);
    }

    #[test]
    fn test_short_frames_carry_over() {
        let mut clock = TourClock::new();
        let mut steps = 0;
        for _ in 0..3 {
            clock.frame(0.4 * STEP_SECONDS, |_, _| steps += 1);
        }
        assert_eq!(steps, 1);
        assert_eq!(clock.frames(), 3);
    }

    #[test]
    fn test_stalled_frame_is_capped() {
        let mut clock = TourClock::new();
        let mut steps = 0u64;
        let counted = clock.frame(2.0, |_, _| steps += 1);
        assert_eq!(counted, FRAME_CAP_SECONDS);
        assert!(steps <= (FRAME_CAP_SECONDS / STEP_SECONDS).ceil() as u64);
        assert!(clock.sim_time() <= FRAME_CAP_SECONDS + 1e-9);
    }

    #[test]
    fn test_negative_frame_counts_as_empty() {
        let mut clock = TourClock::new();
        let mut steps = 0;
        assert_eq!(clock.frame(-1.0, |_, _| steps += 1), 0.0);
        assert_eq!(steps, 0);
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn test_sim_time_is_whole_steps() {
        let mut clock = TourClock::new();
        for ft in [0.017, 0.015, 0.020, 0.016, 0.033, 0.008, 0.018] {
            clock.frame(ft, |_, _| {});
        }
        let expected = clock.steps() as f64 * STEP_SECONDS;
        assert!((clock.sim_time() - expected).abs() < 1e-10);
    }
}
