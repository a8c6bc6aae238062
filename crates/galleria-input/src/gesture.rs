//! Multi-touch gesture tracking: drag, pinch, and double tap.
//!
//! A [`GestureSession`] exists from the first touch start until the last touch
//! ends. The surrounding [`GestureTracker`] outlives sessions so it can match a
//! new touch start against the previous release for double-tap detection.

use glam::Vec2;
use tracing::trace;

/// Default double-tap window in seconds.
pub const DEFAULT_DOUBLE_TAP_WINDOW: f64 = 0.3;

/// One active touch point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    /// Platform touch identifier.
    pub id: u64,
    /// Last known position in window-logical pixels.
    pub position: Vec2,
}

/// Bookkeeping for one continuous multi-touch interaction.
#[derive(Clone, Debug)]
pub struct GestureSession {
    touches: Vec<TouchPoint>,
    pinch_baseline: f32,
    pinching: bool,
}

impl GestureSession {
    fn new() -> Self {
        Self {
            touches: Vec::with_capacity(2),
            pinch_baseline: 0.0,
            pinching: false,
        }
    }

    /// Whether a second touch has turned this session into a pinch.
    pub fn is_pinching(&self) -> bool {
        self.pinching
    }

    fn two_finger_distance(&self) -> Option<f32> {
        match self.touches.as_slice() {
            [a, b, ..] => Some(a.position.distance(b.position)),
            _ => None,
        }
    }
}

/// What a touch event meant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// First finger down. `double_tap` when it follows the previous release
    /// within the double-tap window.
    SingleStart { position: Vec2, double_tap: bool },
    /// Second finger down; a pinch begins with the given baseline distance.
    PinchStart { baseline: f32 },
    /// Single-finger movement.
    Drag { delta: Vec2 },
    /// Two-finger movement. `scale` is current distance over the previous distance.
    Pinch { scale: f32 },
    /// A finger lifted but others remain.
    Lifted { remaining: usize },
    /// The last finger lifted; the session is over.
    Released,
    /// Nothing to act on.
    Ignored,
}

/// Turns raw touch phases into [`GestureEvent`]s.
#[derive(Clone, Debug)]
pub struct GestureTracker {
    session: Option<GestureSession>,
    last_release_at: Option<f64>,
    double_tap_window: f64,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DOUBLE_TAP_WINDOW)
    }
}

impl GestureTracker {
    /// Create a tracker with the given double-tap window in seconds.
    pub fn new(double_tap_window: f64) -> Self {
        Self {
            session: None,
            last_release_at: None,
            double_tap_window: double_tap_window.max(0.0),
        }
    }

    /// The live session, if any finger is down.
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Number of fingers down.
    pub fn touch_count(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.touches.len())
    }

    /// A finger touched down at `now` seconds.
    pub fn touch_start(&mut self, id: u64, position: Vec2, now: f64) -> GestureEvent {
        let session = self.session.get_or_insert_with(GestureSession::new);
        if let Some(existing) = session.touches.iter_mut().find(|t| t.id == id) {
            existing.position = position;
            return GestureEvent::Ignored;
        }
        session.touches.push(TouchPoint { id, position });

        match session.touches.len() {
            1 => {
                let double_tap = self
                    .last_release_at
                    .is_some_and(|released| now - released <= self.double_tap_window);
                if double_tap {
                    // Consumed; the next release re-arms detection.
                    self.last_release_at = None;
                }
                trace!(id, double_tap, "touch start");
                GestureEvent::SingleStart {
                    position,
                    double_tap,
                }
            }
            2 => {
                let baseline = session.two_finger_distance().unwrap_or(0.0);
                session.pinch_baseline = baseline;
                session.pinching = true;
                trace!(baseline, "pinch start");
                GestureEvent::PinchStart { baseline }
            }
            _ => GestureEvent::Ignored,
        }
    }

    /// A finger moved.
    pub fn touch_move(&mut self, id: u64, position: Vec2) -> GestureEvent {
        let Some(session) = self.session.as_mut() else {
            return GestureEvent::Ignored;
        };
        let Some(touch) = session.touches.iter_mut().find(|t| t.id == id) else {
            return GestureEvent::Ignored;
        };
        let delta = position - touch.position;
        touch.position = position;

        if session.pinching {
            let Some(distance) = session.two_finger_distance() else {
                return GestureEvent::Ignored;
            };
            if session.pinch_baseline <= f32::EPSILON {
                session.pinch_baseline = distance;
                return GestureEvent::Ignored;
            }
            let scale = distance / session.pinch_baseline;
            session.pinch_baseline = distance;
            GestureEvent::Pinch { scale }
        } else if session.touches.len() == 1 {
            GestureEvent::Drag { delta }
        } else {
            GestureEvent::Ignored
        }
    }

    /// A finger lifted (or was cancelled) at `now` seconds.
    pub fn touch_end(&mut self, id: u64, now: f64) -> GestureEvent {
        let Some(session) = self.session.as_mut() else {
            return GestureEvent::Ignored;
        };
        let before = session.touches.len();
        session.touches.retain(|t| t.id != id);
        if session.touches.len() == before {
            return GestureEvent::Ignored;
        }
        if session.touches.is_empty() {
            self.session = None;
            self.last_release_at = Some(now);
            GestureEvent::Released
        } else {
            GestureEvent::Lifted {
                remaining: session.touches.len(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_created_and_cleared() {
        let mut g = GestureTracker::default();
        assert!(g.session().is_none());
        g.touch_start(1, Vec2::new(10.0, 10.0), 0.0);
        assert_eq!(g.touch_count(), 1);
        assert_eq!(g.touch_end(1, 0.1), GestureEvent::Released);
        assert!(g.session().is_none());
    }

    #[test]
    fn test_double_tap_within_window() {
        let mut g = GestureTracker::new(0.3);
        g.touch_start(1, Vec2::ZERO, 0.0);
        g.touch_end(1, 0.05);
        assert_eq!(
            g.touch_start(2, Vec2::ZERO, 0.2),
            GestureEvent::SingleStart {
                position: Vec2::ZERO,
                double_tap: true,
            }
        );
    }

    #[test]
    fn test_slow_second_tap_is_not_double() {
        let mut g = GestureTracker::new(0.3);
        g.touch_start(1, Vec2::ZERO, 0.0);
        g.touch_end(1, 0.05);
        assert_eq!(
            g.touch_start(2, Vec2::ZERO, 1.0),
            GestureEvent::SingleStart {
                position: Vec2::ZERO,
                double_tap: false,
            }
        );
    }

    #[test]
    fn test_window_measured_from_latest_release() {
        let mut g = GestureTracker::new(0.3);
        g.touch_start(1, Vec2::ZERO, 0.0);
        g.touch_end(1, 0.05);
        let second = g.touch_start(2, Vec2::ZERO, 0.1);
        assert!(matches!(second, GestureEvent::SingleStart { double_tap: true, .. }));
        g.touch_end(2, 0.15);
        let third = g.touch_start(3, Vec2::ZERO, 0.5);
        assert!(matches!(third, GestureEvent::SingleStart { double_tap: false, .. }));
    }

    #[test]
    fn test_drag_reports_delta() {
        let mut g = GestureTracker::default();
        g.touch_start(1, Vec2::new(10.0, 10.0), 0.0);
        assert_eq!(
            g.touch_move(1, Vec2::new(15.0, 7.0)),
            GestureEvent::Drag {
                delta: Vec2::new(5.0, -3.0)
            }
        );
    }

    #[test]
    fn test_pinch_scale_is_distance_ratio() {
        let mut g = GestureTracker::default();
        g.touch_start(1, Vec2::new(0.0, 0.0), 0.0);
        assert_eq!(
            g.touch_start(2, Vec2::new(100.0, 0.0), 0.0),
            GestureEvent::PinchStart { baseline: 100.0 }
        );
        match g.touch_move(2, Vec2::new(200.0, 0.0)) {
            GestureEvent::Pinch { scale } => assert!((scale - 2.0).abs() < 1e-6),
            other => panic!("expected pinch, got {other:?}"),
        }
        // baseline follows the fingers
        match g.touch_move(2, Vec2::new(100.0, 0.0)) {
            GestureEvent::Pinch { scale } => assert!((scale - 0.5).abs() < 1e-6),
            other => panic!("expected pinch, got {other:?}"),
        }
    }

    #[test]
    fn test_pinch_survives_one_finger_lift() {
        let mut g = GestureTracker::default();
        g.touch_start(1, Vec2::ZERO, 0.0);
        g.touch_start(2, Vec2::new(50.0, 0.0), 0.0);
        assert_eq!(g.touch_end(2, 0.1), GestureEvent::Lifted { remaining: 1 });
        assert!(g.session().is_some_and(|s| s.is_pinching()));
        assert_eq!(g.touch_move(1, Vec2::new(5.0, 0.0)), GestureEvent::Ignored);
        assert_eq!(g.touch_end(1, 0.2), GestureEvent::Released);
    }

    #[test]
    fn test_unknown_touch_ignored() {
        let mut g = GestureTracker::default();
        assert_eq!(g.touch_move(9, Vec2::ZERO), GestureEvent::Ignored);
        assert_eq!(g.touch_end(9, 0.0), GestureEvent::Ignored);
    }
}
