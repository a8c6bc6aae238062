//! Ring placement of frames.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::Exhibit;
use crate::config::GalleryConfiguration;

/// Where one item hangs.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlacement {
    /// Index of the source item in the input list.
    pub item_index: usize,
    /// Stable identifier of the source item.
    pub item_id: String,
    /// Frame center in world space.
    pub position: Vec3,
    /// Yaw in radians; the frame faces the gallery center.
    pub rotation_y: f32,
    /// Ring index, 0 at eye level.
    pub layer: usize,
    /// Position within the ring.
    pub index_in_layer: usize,
    /// Angular position on the ring in radians.
    pub angle: f32,
}

impl FramePlacement {
    /// Unit vector the frame faces (toward the gallery axis).
    pub fn facing(&self) -> Vec3 {
        Vec3::new(self.rotation_y.sin(), 0.0, self.rotation_y.cos())
    }
}

/// `max(min_radius, item_count * spacing / 2π)`; exactly `min_radius` for no items.
pub fn compute_radius(item_count: usize, min_radius: f32, spacing_per_item: f32) -> f32 {
    if item_count == 0 {
        return min_radius;
    }
    let required_circumference = item_count as f32 * spacing_per_item;
    min_radius.max(required_circumference / TAU)
}

/// `ceil(item_count / max_per_layer)`, 0 for no items.
pub fn compute_layer_count(item_count: usize, max_per_layer: usize) -> usize {
    if item_count == 0 {
        return 0;
    }
    item_count.div_ceil(max_per_layer.max(1))
}

/// Number of items on ring `layer` when `item_count` items are laid out.
pub fn layer_size(item_count: usize, max_per_layer: usize, layer: usize) -> usize {
    let max_per_layer = max_per_layer.max(1);
    item_count
        .saturating_sub(layer * max_per_layer)
        .min(max_per_layer)
}

/// Place `items` on rings of `config.max_frames_per_layer`, preserving item order.
///
/// Within a ring of `k` frames the angular step is `2π / k`, so a partial last
/// ring is spread evenly rather than bunched.
pub fn compute_placements<T: Exhibit>(
    items: &[T],
    config: &GalleryConfiguration,
) -> Vec<FramePlacement> {
    let max_per_layer = config.max_frames_per_layer.max(1);
    let mut placements = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let layer = index / max_per_layer;
        let index_in_layer = index % max_per_layer;
        let frames_in_layer = layer_size(items.len(), max_per_layer, layer);
        if frames_in_layer == 0 {
            continue;
        }

        let step = TAU / frames_in_layer as f32;
        let angle = index_in_layer as f32 * step;
        let position = Vec3::new(
            config.radius * angle.sin(),
            config.layer_height(layer),
            config.radius * angle.cos(),
        );

        placements.push(FramePlacement {
            item_index: index,
            item_id: item.exhibit_id().to_owned(),
            position,
            rotation_y: angle + PI,
            layer,
            index_in_layer,
            angle,
        });
    }

    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutOptions;

    fn items(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("post-{i}")).collect()
    }

    fn layout(n: usize) -> (GalleryConfiguration, Vec<FramePlacement>) {
        let config = GalleryConfiguration::for_item_count(n, &LayoutOptions::default());
        let placements = compute_placements(&items(n), &config);
        (config, placements)
    }

    #[test]
    fn test_radius_is_min_for_zero_items() {
        assert_eq!(compute_radius(0, 8.0, 2.0), 8.0);
    }

    #[test]
    fn test_radius_is_monotonic() {
        let mut prev = compute_radius(0, 8.0, 2.0);
        for n in 1..500 {
            let r = compute_radius(n, 8.0, 2.0);
            assert!(r >= prev, "radius shrank at {n}: {prev} -> {r}");
            prev = r;
        }
    }

    #[test]
    fn test_radius_grows_past_minimum() {
        let r = compute_radius(100, 8.0, 2.0);
        assert!((r - 200.0 / TAU).abs() < 1e-4);
    }

    #[test]
    fn test_layer_count_is_ceiling() {
        assert_eq!(compute_layer_count(0, 16), 0);
        for n in 1..100 {
            for max in 1..20 {
                assert_eq!(compute_layer_count(n, max), n.div_ceil(max));
            }
        }
    }

    #[test]
    fn test_placements_partition_items() {
        for n in 0..70 {
            let (config, placements) = layout(n);
            assert_eq!(placements.len(), n);
            let layers: std::collections::BTreeSet<usize> =
                placements.iter().map(|p| p.layer).collect();
            assert_eq!(layers.len(), config.layer_count);
            for (i, p) in placements.iter().enumerate() {
                assert_eq!(p.item_index, i);
                assert_eq!(p.layer, i / 16);
            }
        }
    }

    #[test]
    fn test_angles_uniform_and_rotation_faces_center() {
        let (_, placements) = layout(11);
        let step = TAU / 11.0;
        for p in &placements {
            assert!((p.angle - p.index_in_layer as f32 * step).abs() < 1e-5);
            assert!((p.rotation_y - (p.angle + PI)).abs() < 1e-5);
            let to_center = Vec3::new(-p.position.x, 0.0, -p.position.z).normalize();
            assert!((p.facing() - to_center).length() < 1e-4);
        }
    }

    #[test]
    fn test_six_items_single_ring() {
        let (config, placements) = layout(6);
        assert_eq!(config.layer_count, 1);
        assert!((config.radius - 8.0).abs() < 1e-6);
        for (i, p) in placements.iter().enumerate() {
            assert!((p.angle.to_degrees() - 60.0 * i as f32).abs() < 1e-3);
            assert!((p.position.y - 1.6).abs() < 1e-6);
            let horizontal = Vec3::new(p.position.x, 0.0, p.position.z).length();
            assert!((horizontal - 8.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_twenty_items_two_rings() {
        let (config, placements) = layout(20);
        assert_eq!(config.layer_count, 2);
        let ring0: Vec<_> = placements.iter().filter(|p| p.layer == 0).collect();
        let ring1: Vec<_> = placements.iter().filter(|p| p.layer == 1).collect();
        assert_eq!(ring0.len(), 16);
        assert_eq!(ring1.len(), 4);
        assert!((ring0[1].angle.to_degrees() - 22.5).abs() < 1e-3);
        assert!((ring1[1].angle.to_degrees() - 90.0).abs() < 1e-3);
        assert!((ring1[0].position.y - (ring0[0].position.y + config.layer_spacing)).abs() < 1e-5);
    }

    #[test]
    fn test_placements_are_deterministic() {
        assert_eq!(layout(37).1, layout(37).1);
    }

    #[test]
    fn test_layer_size_partial_last_ring() {
        assert_eq!(layer_size(20, 16, 0), 16);
        assert_eq!(layer_size(20, 16, 1), 4);
        assert_eq!(layer_size(20, 16, 2), 0);
    }
}
