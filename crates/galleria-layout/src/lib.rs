//! Cylindrical gallery layout: maps an ordered list of exhibits onto ring
//! positions, derives the gallery radius and layer count, and places the
//! spotlight anchors used by the lighting rig.
//!
//! Everything here is a pure function of the item count and [`LayoutOptions`].

mod anchors;
mod config;
mod placement;

pub use anchors::{LightAnchor, compute_light_anchors};
pub use config::{GalleryConfiguration, LayoutOptions};
pub use placement::{
    FramePlacement, compute_layer_count, compute_placements, compute_radius, layer_size,
};

/// Anything that can hang on the gallery wall. Only a stable identifier is required.
pub trait Exhibit {
    /// Stable identifier of the item.
    fn exhibit_id(&self) -> &str;
}

impl Exhibit for String {
    fn exhibit_id(&self) -> &str {
        self
    }
}

impl Exhibit for &str {
    fn exhibit_id(&self) -> &str {
        self
    }
}

/// Full layout output for one item list.
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryLayout {
    /// Derived gallery dimensions.
    pub configuration: GalleryConfiguration,
    /// One placement per item, in item order.
    pub placements: Vec<FramePlacement>,
    /// Spotlight positions and aim points.
    pub light_anchors: Vec<LightAnchor>,
}

/// Compute configuration, placements, and light anchors for `items`.
pub fn compute_layout<T: Exhibit>(items: &[T], options: &LayoutOptions) -> GalleryLayout {
    let configuration = GalleryConfiguration::for_item_count(items.len(), options);
    let placements = compute_placements(items, &configuration);
    let light_anchors = compute_light_anchors(&configuration, options.spotlight_count);
    GalleryLayout {
        configuration,
        placements,
        light_anchors,
    }
}
