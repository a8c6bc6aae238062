//! Easing curve shared by camera and light transitions.

/// Cubic ease-in-out: `4t³` for the first half, `1 - (-2t + 2)³ / 2` for the second.
///
/// Input is clamped to `[0, 1]`.
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubic_endpoints_and_midpoint() {
        assert!(ease_in_out_cubic(0.0).abs() < 1e-6);
        assert!((ease_in_out_cubic(1.0) - 1.0).abs() < 1e-6);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_cubic_is_monotonic() {
        let mut prev = ease_in_out_cubic(0.0);
        for i in 1..=1000 {
            let v = ease_in_out_cubic(i as f32 / 1000.0);
            assert!(v + 1e-6 >= prev, "not monotonic at step {i}: {prev} -> {v}");
            prev = v;
        }
    }

    #[test]
    fn test_cubic_clamps_out_of_range_input() {
        assert!(ease_in_out_cubic(-3.0).abs() < 1e-6);
        assert!((ease_in_out_cubic(7.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cubic_first_quarter_matches_formula() {
        let t = 0.25_f32;
        assert!((ease_in_out_cubic(t) - 4.0 * t * t * t).abs() < 1e-6);
    }
}
