//! Spotlight anchor placement.

use std::f32::consts::TAU;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::GalleryConfiguration;

/// Fraction of the wall radius at which spotlights hang.
const ANCHOR_RADIUS_FACTOR: f32 = 0.7;
/// Distance below the ceiling at which spotlights hang.
const CEILING_CLEARANCE: f32 = 0.5;

/// A spotlight mount point and the point it aims at.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightAnchor {
    /// Mount position just below the ceiling.
    pub position: Vec3,
    /// Aim point: the gallery axis at eye height.
    pub target: Vec3,
}

/// Spread `light_count` anchors evenly on a circle of `0.7 * radius`, just
/// below the ceiling, each aimed at the gallery axis at eye height.
pub fn compute_light_anchors(config: &GalleryConfiguration, light_count: usize) -> Vec<LightAnchor> {
    let ring_radius = config.radius * ANCHOR_RADIUS_FACTOR;
    let y = config.height - CEILING_CLEARANCE;
    let target = Vec3::new(0.0, config.frame_height, 0.0);

    (0..light_count)
        .map(|i| {
            let angle = i as f32 / light_count as f32 * TAU;
            LightAnchor {
                position: Vec3::new(ring_radius * angle.cos(), y, ring_radius * angle.sin()),
                target,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutOptions;

    #[test]
    fn test_anchors_on_inner_circle_below_ceiling() {
        let config = GalleryConfiguration::for_item_count(6, &LayoutOptions::default());
        let anchors = compute_light_anchors(&config, 6);
        assert_eq!(anchors.len(), 6);
        for a in &anchors {
            let horizontal = Vec3::new(a.position.x, 0.0, a.position.z).length();
            assert!((horizontal - 5.6).abs() < 1e-4);
            assert!((a.position.y - 7.5).abs() < 1e-6);
            assert_eq!(a.target, Vec3::new(0.0, 1.6, 0.0));
        }
    }

    #[test]
    fn test_zero_lights_is_empty() {
        let config = GalleryConfiguration::for_item_count(6, &LayoutOptions::default());
        assert!(compute_light_anchors(&config, 0).is_empty());
    }

    #[test]
    fn test_first_anchor_on_positive_x() {
        let config = GalleryConfiguration::for_item_count(0, &LayoutOptions::default());
        let anchors = compute_light_anchors(&config, 4);
        assert!((anchors[0].position.x - 5.6).abs() < 1e-4);
        assert!(anchors[0].position.z.abs() < 1e-4);
    }
}
