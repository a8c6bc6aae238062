//! Texture handles and the asynchronous loader capability.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;

/// Decoded texture metadata. Pixel data stays with the renderer.
#[derive(Debug, PartialEq, Eq)]
pub struct Texture {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Estimated GPU footprint assuming RGBA8.
    pub fn estimated_bytes(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height) * 4
    }

    /// Width over height, or 1.0 for a degenerate texture.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Shared texture handle. Identity (pointer equality) distinguishes textures.
pub type TextureHandle = Rc<Texture>;

/// Why a texture could not be loaded.
#[derive(Debug, Error)]
pub enum TextureLoadError {
    /// Nothing exists at the URL.
    #[error("texture not found: {0}")]
    NotFound(String),

    /// The file exists but is not a supported image.
    #[error("failed to decode texture {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: image::ImageError,
    },

    /// I/O error while reading the file.
    #[error("io error loading texture {url}: {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// Asynchronously resolves a URL into a texture.
#[allow(async_fn_in_trait)]
pub trait TextureLoader {
    async fn load(&self, url: &str) -> Result<Texture, TextureLoadError>;
}

/// Loads textures from files under a root directory. Only the image header is
/// read, to obtain dimensions.
#[derive(Debug, Clone)]
pub struct ImageFileLoader {
    root: PathBuf,
}

impl ImageFileLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TextureLoader for ImageFileLoader {
    async fn load(&self, url: &str) -> Result<Texture, TextureLoadError> {
        let path = self.root.join(url);
        if !path.is_file() {
            return Err(TextureLoadError::NotFound(url.to_string()));
        }
        let (width, height) = image::image_dimensions(&path).map_err(|err| match err {
            image::ImageError::IoError(source) => TextureLoadError::Io {
                url: url.to_string(),
                source,
            },
            source => TextureLoadError::Decode {
                url: url.to_string(),
                source,
            },
        })?;
        Ok(Texture {
            url: url.to_string(),
            width,
            height,
        })
    }
}
