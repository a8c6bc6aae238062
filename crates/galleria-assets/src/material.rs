//! Surface materials and the image-material fallback policy.

use glam::Vec3;
use tracing::warn;

use crate::cache::TextureCache;
use crate::texture::{TextureHandle, TextureLoader};

// ---------------------------------------------------------------------------
// TextureSlots
// ---------------------------------------------------------------------------

/// Texture maps a material may reference.
#[derive(Clone, Debug, Default)]
pub struct TextureSlots {
    pub map: Option<TextureHandle>,
    pub normal_map: Option<TextureHandle>,
    pub roughness_map: Option<TextureHandle>,
    pub metalness_map: Option<TextureHandle>,
    pub emissive_map: Option<TextureHandle>,
    pub ao_map: Option<TextureHandle>,
}

impl TextureSlots {
    /// Every bound texture, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &TextureHandle> {
        [
            &self.map,
            &self.normal_map,
            &self.roughness_map,
            &self.metalness_map,
            &self.emissive_map,
            &self.ao_map,
        ]
        .into_iter()
        .flatten()
    }
}

// ---------------------------------------------------------------------------
// Material
// ---------------------------------------------------------------------------

/// Physically based surface description.
#[derive(Clone, Debug)]
pub struct Material {
    pub name: String,
    /// Base color, RGB in `[0, 1]`.
    pub color: Vec3,
    pub roughness: f32,
    pub metalness: f32,
    pub transmission: f32,
    pub clearcoat: f32,
    pub opacity: f32,
    pub transparent: bool,
    pub double_sided: bool,
    pub textures: TextureSlots,
}

impl Material {
    /// Opaque single-sided material with the given color and roughness.
    pub fn standard(name: impl Into<String>, hex: u32, roughness: f32, metalness: f32) -> Self {
        Self {
            name: name.into(),
            color: rgb_from_hex(hex),
            roughness,
            metalness,
            transmission: 0.0,
            clearcoat: 0.0,
            opacity: 1.0,
            transparent: false,
            double_sided: false,
            textures: TextureSlots::default(),
        }
    }
}

/// Convert a 24-bit `0xRRGGBB` color to RGB in `[0, 1]`.
pub fn rgb_from_hex(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vec3::new(r, g, b)
}

/// Glossy material showing `texture`.
pub fn image_material(texture: TextureHandle) -> Material {
    let mut material = Material::standard("image", 0xffffff, 0.1, 0.0);
    material.textures.map = Some(texture);
    material
}

/// Flat dark-grey material used when an image cannot be loaded.
pub fn fallback_material() -> Material {
    Material::standard("image-fallback", 0x333333, 0.8, 0.1)
}

/// Image material for `url`, or the fallback material if loading fails.
/// Never fails; a failed load is logged as a warning.
pub async fn load_image_material<L: TextureLoader>(
    cache: &mut TextureCache,
    loader: &L,
    url: &str,
) -> Material {
    match cache.load(url, loader).await {
        Ok(texture) => image_material(texture),
        Err(err) => {
            warn!(url, error = %err, "texture load failed, using fallback material");
            fallback_material()
        }
    }
}
