//! Renderer and scene statistics consumed by the governor.

use std::rc::Rc;

use galleria_assets::{Geometry, Mesh, Texture};
use rustc_hash::FxHashSet;

/// Per-frame renderer counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub draw_calls: u32,
    pub triangles: u64,
}

/// Read-only view of the renderer and scene.
pub trait RenderProbe {
    fn draw_stats(&self) -> DrawStats;

    /// Used over available memory, if the platform reports it.
    fn memory_ratio(&self) -> Option<f32> {
        None
    }

    /// Visit every mesh currently in the scene.
    fn visit_meshes(&self, f: &mut dyn FnMut(&Mesh));
}

/// Distinct resource counts from one scene traversal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneCensus {
    pub textures: usize,
    pub geometries: usize,
}

/// Count distinct textures and geometries. Resources are deduplicated by
/// identity, so two equal textures behind different handles count twice.
pub fn census<P: RenderProbe + ?Sized>(probe: &P) -> SceneCensus {
    let mut textures: FxHashSet<*const Texture> = FxHashSet::default();
    let mut geometries: FxHashSet<*const Geometry> = FxHashSet::default();
    probe.visit_meshes(&mut |mesh: &Mesh| {
        geometries.insert(Rc::as_ptr(&mesh.geometry));
        for material in &mesh.materials {
            for texture in material.textures.iter() {
                textures.insert(Rc::as_ptr(texture));
            }
        }
    });
    SceneCensus {
        textures: textures.len(),
        geometries: geometries.len(),
    }
}

#[cfg(test)]
mod tests {
    use galleria_assets::{Material, Scene, SceneNode, TextureSlots};

    use super::*;

    struct SceneProbe(Scene);

    impl RenderProbe for SceneProbe {
        fn draw_stats(&self) -> DrawStats {
            DrawStats::default()
        }

        fn visit_meshes(&self, f: &mut dyn FnMut(&Mesh)) {
            self.0.visit_meshes(f);
        }
    }

    fn textured(texture: &Rc<Texture>, normal: Option<&Rc<Texture>>) -> Rc<Material> {
        let mut material = Material::standard("image", 0xffffff, 0.1, 0.0);
        material.textures = TextureSlots {
            map: Some(Rc::clone(texture)),
            normal_map: normal.map(Rc::clone),
            ..TextureSlots::default()
        };
        Rc::new(material)
    }

    fn texture(url: &str) -> Rc<Texture> {
        Rc::new(Texture {
            url: url.to_string(),
            width: 4,
            height: 4,
        })
    }

    #[test]
    fn test_empty_scene() {
        let probe = SceneProbe(Scene::new());
        assert_eq!(census(&probe), SceneCensus::default());
    }

    #[test]
    fn test_shared_resources_counted_once() {
        let quad = Geometry::quad("canvas");
        let a = texture("a.png");
        let n = texture("n.png");
        let mut scene = Scene::new();
        let mut group = SceneNode::group("frame_0");
        group.push(SceneNode::with_mesh(
            "image",
            Mesh::new(Rc::clone(&quad), textured(&a, Some(&n))),
        ));
        scene.add(group);
        scene.add(SceneNode::with_mesh("image_1", Mesh::new(Rc::clone(&quad), textured(&a, None))));

        let counts = census(&SceneProbe(scene));
        assert_eq!(counts.geometries, 1);
        assert_eq!(counts.textures, 2);
    }

    #[test]
    fn test_identity_not_value() {
        let mut scene = Scene::new();
        scene.add(SceneNode::with_mesh(
            "left",
            Mesh::new(Geometry::quad("canvas"), textured(&texture("same.png"), None)),
        ));
        scene.add(SceneNode::with_mesh(
            "right",
            Mesh::new(Geometry::quad("canvas"), textured(&texture("same.png"), None)),
        ));
        let counts = census(&SceneProbe(scene));
        assert_eq!(counts.geometries, 2);
        assert_eq!(counts.textures, 2);
    }
}
