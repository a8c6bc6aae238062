//! Asset-side collaborators of the gallery: a per-session texture cache keyed
//! by URL, image materials with a flat-color fallback, frame material
//! presets, and the minimal scene graph the performance governor traverses.

mod cache;
mod frame_style;
mod material;
mod scene;
mod texture;

pub use cache::{CacheStats, TextureCache};
pub use frame_style::{FrameMaterials, FrameSpec, FrameStyle, create_frame_materials};
pub use material::{Material, TextureSlots, fallback_material, image_material, load_image_material, rgb_from_hex};
pub use scene::{Geometry, Mesh, Scene, SceneNode};
pub use texture::{ImageFileLoader, Texture, TextureHandle, TextureLoadError, TextureLoader};
