//! Builds the gallery scene: walls, floor, and one dressed frame per item.

use std::rc::Rc;

use glam::Vec2;
use tracing::info;

use galleria_assets::{
    FrameSpec, FrameStyle, Geometry, Material, Mesh, Scene, SceneNode, TextureCache, TextureLoader,
    create_frame_materials, fallback_material,
};
use galleria_camera::HitTarget;
use galleria_layout::{GalleryLayout, LayoutOptions, compute_layout};

use crate::manifest::Item;

/// Everything the tour needs from the built gallery.
#[derive(Debug)]
pub struct Gallery {
    pub layout: GalleryLayout,
    pub scene: Scene,
    /// One pickable rectangle per frame, indexed like the items.
    pub targets: Vec<HitTarget>,
}

/// Name of the scene node holding frame `index`.
pub fn frame_node_name(index: usize) -> String {
    format!("frame_{index}")
}

/// Lay out `items` and build their scene. Images load through `cache`; an
/// item whose image fails to load gets the flat fallback material.
pub async fn build_gallery<L: TextureLoader>(
    items: &[Item],
    options: &LayoutOptions,
    style: FrameStyle,
    cache: &mut TextureCache,
    loader: &L,
) -> Gallery {
    let layout = compute_layout(items, options);
    let mut scene = Scene::new();

    let segments = options.wall_segments.max(3);
    scene.add(SceneNode::with_mesh(
        "walls",
        Mesh::new(
            Geometry::new("wall", segments * 2),
            Rc::new(Material::standard("wall", 0xf5f5f5, 0.9, 0.0)),
        ),
    ));
    scene.add(SceneNode::with_mesh(
        "floor",
        Mesh::new(
            Geometry::new("floor", segments),
            Rc::new(Material::standard("floor", 0x8b7355, 0.8, 0.1)),
        ),
    ));

    // Shared across frames so the scene holds one copy of each.
    let preset = FrameSpec::styled(style);
    let border = Geometry::cuboid("frame_border");
    let quad = Geometry::quad("frame_quad");
    let frame_material = Rc::new(preset.frame.clone());
    let glass_material = Rc::new(preset.glass.clone());
    let mat_material = Rc::new(preset.mat.clone());

    let mut targets = Vec::with_capacity(layout.placements.len());
    for placement in &layout.placements {
        let (spec, image) = match items
            .get(placement.item_index)
            .and_then(|item| item.image.as_deref())
        {
            Some(url) => {
                let dressed = create_frame_materials(cache, loader, url, style).await;
                (dressed.spec, dressed.image)
            }
            None => (preset.clone(), fallback_material()),
        };

        let mut node = SceneNode::group(frame_node_name(placement.item_index));
        node.push(SceneNode::with_mesh(
            "border",
            Mesh::new(Rc::clone(&border), Rc::clone(&frame_material)),
        ));
        node.push(SceneNode::with_mesh(
            "mat",
            Mesh::new(Rc::clone(&quad), Rc::clone(&mat_material)),
        ));
        node.push(SceneNode::with_mesh(
            "image",
            Mesh::new(Rc::clone(&quad), Rc::new(image)),
        ));
        node.push(SceneNode::with_mesh(
            "glass",
            Mesh::new(Rc::clone(&quad), Rc::clone(&glass_material)),
        ));
        scene.add(node);

        targets.push(HitTarget::from_placement(
            placement,
            Vec2::new(spec.width, spec.height),
        ));
    }

    info!(
        frames = layout.placements.len(),
        radius = layout.configuration.radius,
        layers = layout.configuration.layer_count,
        textures = cache.len(),
        "gallery built"
    );
    Gallery {
        layout,
        scene,
        targets,
    }
}
