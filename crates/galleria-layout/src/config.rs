//! Layout inputs and the derived gallery configuration.

use serde::{Deserialize, Serialize};

use crate::placement::{compute_layer_count, compute_radius};

/// Tunables for the layout computation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Smallest allowed gallery radius in meters.
    pub min_radius: f32,
    /// Arc length reserved per frame along the wall, in meters.
    pub spacing_per_item: f32,
    /// Maximum frames on one ring.
    pub max_per_layer: usize,
    /// Wall height in meters.
    pub wall_height: f32,
    /// Height of the first ring of frames (eye level).
    pub frame_height: f32,
    /// Vertical distance between rings.
    pub layer_spacing: f32,
    /// Segment count used when tessellating the cylindrical wall.
    pub wall_segments: u32,
    /// Number of spotlight anchors to place.
    pub spotlight_count: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            min_radius: 8.0,
            spacing_per_item: 2.0,
            max_per_layer: 16,
            wall_height: 8.0,
            frame_height: 1.6,
            layer_spacing: 2.0,
            wall_segments: 64,
            spotlight_count: 6,
        }
    }
}

/// Gallery dimensions derived from the item count.
///
/// `radius` and `layer_count` are outputs: build this with
/// [`for_item_count`](Self::for_item_count) rather than by hand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalleryConfiguration {
    /// Wall radius, large enough for `item_count * frame_spacing` of arc.
    pub radius: f32,
    /// Wall height.
    pub height: f32,
    /// Wall tessellation.
    pub wall_segments: u32,
    /// Height of the first ring.
    pub frame_height: f32,
    /// Arc length per frame.
    pub frame_spacing: f32,
    /// Maximum frames on one ring.
    pub max_frames_per_layer: usize,
    /// Number of rings in use.
    pub layer_count: usize,
    /// Vertical distance between rings.
    pub layer_spacing: f32,
}

impl GalleryConfiguration {
    /// Derive the configuration for `item_count` items.
    pub fn for_item_count(item_count: usize, options: &LayoutOptions) -> Self {
        let max_per_layer = options.max_per_layer.max(1);
        Self {
            radius: compute_radius(item_count, options.min_radius, options.spacing_per_item),
            height: options.wall_height,
            wall_segments: options.wall_segments,
            frame_height: options.frame_height,
            frame_spacing: options.spacing_per_item,
            max_frames_per_layer: max_per_layer,
            layer_count: compute_layer_count(item_count, max_per_layer),
            layer_spacing: options.layer_spacing,
        }
    }

    /// Height of ring `layer`.
    pub fn layer_height(&self, layer: usize) -> f32 {
        self.frame_height + layer as f32 * self.layer_spacing
    }
}
