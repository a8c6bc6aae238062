//! Tick-driven timers. Time only advances when the owner calls `tick(dt)`.

/// One-shot countdown that fires once after its delay has elapsed.
#[derive(Clone, Debug)]
pub struct Countdown {
    delay: f64,
    remaining: f64,
    fired: bool,
}

impl Countdown {
    /// Create a countdown firing after `delay` seconds.
    pub fn new(delay: f64) -> Self {
        let delay = delay.max(0.0);
        Self {
            delay,
            remaining: delay,
            fired: false,
        }
    }

    /// Advance by `dt` seconds. Returns `true` on the tick the countdown fires.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.fired {
            return false;
        }
        self.remaining -= dt.max(0.0);
        if self.remaining <= 0.0 {
            self.fired = true;
            return true;
        }
        false
    }

    /// Restart from the full delay.
    pub fn restart(&mut self) {
        self.remaining = self.delay;
        self.fired = false;
    }

    /// Seconds left before firing (0 once fired).
    pub fn remaining(&self) -> f64 {
        self.remaining.max(0.0)
    }

    /// Whether the countdown has already fired.
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// Repeating interval timer. Keeps the remainder across periods so long
/// frames do not drift the schedule.
#[derive(Clone, Debug)]
pub struct Interval {
    period: f64,
    accumulated: f64,
}

impl Interval {
    /// Create an interval with the given period in seconds.
    ///
    /// Non-positive periods are clamped to one millisecond.
    pub fn new(period: f64) -> Self {
        Self {
            period: period.max(0.001),
            accumulated: 0.0,
        }
    }

    /// Advance by `dt` seconds and return how many periods elapsed.
    pub fn tick(&mut self, dt: f64) -> u32 {
        self.accumulated += dt.max(0.0);
        let mut fired = 0;
        while self.accumulated >= self.period {
            self.accumulated -= self.period;
            fired += 1;
        }
        fired
    }

    /// The configured period in seconds.
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Drop any accumulated time.
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}
