//! Picture-frame presets: dimensions plus frame, glass, and mat materials.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cache::TextureCache;
use crate::material::{Material, load_image_material};
use crate::texture::TextureLoader;

/// Named frame look.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameStyle {
    Standard,
    #[default]
    Modern,
    Classic,
    Minimalist,
}

impl fmt::Display for FrameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FrameStyle::Standard => "standard",
            FrameStyle::Modern => "modern",
            FrameStyle::Classic => "classic",
            FrameStyle::Minimalist => "minimalist",
        })
    }
}

/// Frame dimensions in meters and its three surface materials.
#[derive(Clone, Debug)]
pub struct FrameSpec {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub frame: Material,
    pub glass: Material,
    pub mat: Material,
}

impl Default for FrameSpec {
    fn default() -> Self {
        Self {
            width: 1.2,
            height: 1.2,
            depth: 0.1,
            frame: Material::standard("frame", 0x111111, 0.2, 0.1),
            glass: glass(0.9, 0.3),
            mat: Material::standard("mat", 0xffffff, 0.3, 0.0),
        }
    }
}

fn glass(transmission: f32, opacity: f32) -> Material {
    let mut material = Material::standard("glass", 0xffffff, 0.0, 0.1);
    material.transmission = transmission;
    material.clearcoat = 1.0;
    material.opacity = opacity;
    material.transparent = true;
    material.double_sided = true;
    material
}

impl FrameSpec {
    /// Preset for `style`.
    pub fn styled(style: FrameStyle) -> Self {
        let base = Self::default();
        match style {
            FrameStyle::Standard => base,
            FrameStyle::Modern => Self {
                frame: Material::standard("frame", 0x000000, 0.1, 0.2),
                glass: glass(0.95, base.glass.opacity),
                ..base
            },
            FrameStyle::Classic => Self {
                depth: 0.15,
                frame: Material::standard("frame", 0x8b4513, 0.4, 0.0),
                mat: Material::standard("mat", 0xf5f5dc, 0.5, 0.0),
                ..base
            },
            FrameStyle::Minimalist => Self {
                depth: 0.05,
                frame: Material::standard("frame", 0xffffff, 0.2, 0.0),
                glass: glass(base.glass.transmission, 0.1),
                ..base
            },
        }
    }

    /// Standard preset sized to an image: `base_height` tall, width following
    /// the image aspect ratio.
    pub fn for_image(image_width: u32, image_height: u32, base_height: f32) -> Self {
        let aspect = if image_height == 0 {
            1.0
        } else {
            image_width as f32 / image_height as f32
        };
        Self {
            width: base_height * aspect,
            height: base_height,
            ..Self::default()
        }
    }
}

/// Everything needed to dress one frame.
#[derive(Clone, Debug)]
pub struct FrameMaterials {
    pub spec: FrameSpec,
    pub image: Material,
}

/// Materials for a frame in `style` showing the image at `url`. The frame is
/// resized to the image's aspect ratio when the image loads; otherwise the
/// fallback image material is used at the preset size.
pub async fn create_frame_materials<L: TextureLoader>(
    cache: &mut TextureCache,
    loader: &L,
    url: &str,
    style: FrameStyle,
) -> FrameMaterials {
    let mut spec = FrameSpec::styled(style);
    let image = load_image_material(cache, loader, url).await;
    if let Some(texture) = &image.textures.map {
        spec.width = spec.height * texture.aspect_ratio();
    }
    FrameMaterials { spec, image }
}
