use galleria_assets::{Mesh, Scene};
use galleria_perf::{DrawStats, RenderProbe};

/// Render statistics read straight off the scene graph: one draw call per
/// mesh material, triangles summed over meshes.
#[derive(Clone, Copy, Debug)]
pub struct SceneProbe<'a> {
    scene: &'a Scene,
    memory_ratio: Option<f32>,
}

impl<'a> SceneProbe<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            memory_ratio: None,
        }
    }

    /// Report `used / budget` as the memory ratio.
    pub fn with_memory(mut self, used: u64, budget: u64) -> Self {
        self.memory_ratio = (budget > 0).then(|| used as f32 / budget as f32);
        self
    }
}

impl RenderProbe for SceneProbe<'_> {
    fn draw_stats(&self) -> DrawStats {
        let mut stats = DrawStats::default();
        self.scene.visit_meshes(&mut |mesh: &Mesh| {
            stats.draw_calls += mesh.materials.len() as u32;
            stats.triangles += u64::from(mesh.geometry.triangle_count);
        });
        stats
    }

    fn memory_ratio(&self) -> Option<f32> {
        self.memory_ratio
    }

    fn visit_meshes(&self, f: &mut dyn FnMut(&Mesh)) {
        self.scene.visit_meshes(f);
    }
}
