//! Minimal scene graph: named nodes with optional meshes. Geometry and
//! materials are shared by `Rc` so identity can be used for deduplication.

use std::rc::Rc;

use crate::material::Material;

/// Triangle geometry, identified by pointer.
#[derive(Debug, PartialEq, Eq)]
pub struct Geometry {
    pub label: String,
    pub triangle_count: u32,
}

impl Geometry {
    pub fn new(label: impl Into<String>, triangle_count: u32) -> Rc<Self> {
        Rc::new(Self {
            label: label.into(),
            triangle_count,
        })
    }

    /// Axis-aligned box: 6 faces of 2 triangles.
    pub fn cuboid(label: impl Into<String>) -> Rc<Self> {
        Self::new(label, 12)
    }

    /// Flat quad: 2 triangles.
    pub fn quad(label: impl Into<String>) -> Rc<Self> {
        Self::new(label, 2)
    }
}

/// Geometry plus one or more materials.
#[derive(Clone, Debug)]
pub struct Mesh {
    pub geometry: Rc<Geometry>,
    pub materials: Vec<Rc<Material>>,
}

impl Mesh {
    pub fn new(geometry: Rc<Geometry>, material: Rc<Material>) -> Self {
        Self {
            geometry,
            materials: vec![material],
        }
    }
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: String,
    pub mesh: Option<Mesh>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Node without a mesh, used for grouping.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mesh: None,
            children: Vec::new(),
        }
    }

    pub fn with_mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            mesh: Some(mesh),
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    fn visit(&self, f: &mut dyn FnMut(&Mesh)) {
        if let Some(mesh) = &self.mesh {
            f(mesh);
        }
        for child in &self.children {
            child.visit(f);
        }
    }
}

/// Root of the scene.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    /// Remove every top-level node called `name`. Returns how many were removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.name != name);
        before - self.nodes.len()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Depth-first visit of every mesh.
    pub fn visit_meshes(&self, f: &mut dyn FnMut(&Mesh)) {
        for node in &self.nodes {
            node.visit(f);
        }
    }

    pub fn mesh_count(&self) -> usize {
        let mut count = 0;
        self.visit_meshes(&mut |_: &Mesh| count += 1);
        count
    }
}
