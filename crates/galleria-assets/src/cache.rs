//! Texture cache keyed by URL.
//!
//! One cache per gallery session. A hit returns the shared handle without
//! touching the loader; a miss loads, stores, and returns it.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::debug;

use crate::texture::{TextureHandle, TextureLoadError, TextureLoader};

/// Cache occupancy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    /// Sum of `width * height * 4` over cached textures.
    pub estimated_bytes: u64,
}

#[derive(Debug, Default)]
pub struct TextureCache {
    entries: FxHashMap<String, TextureHandle>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached handle for `url`, if present.
    pub fn get(&self, url: &str) -> Option<TextureHandle> {
        self.entries.get(url).cloned()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    /// Return the cached texture for `url`, loading it through `loader` on a miss.
    /// Failed loads are not cached.
    pub async fn load<L: TextureLoader>(
        &mut self,
        url: &str,
        loader: &L,
    ) -> Result<TextureHandle, TextureLoadError> {
        if let Some(hit) = self.get(url) {
            return Ok(hit);
        }
        let texture = Rc::new(loader.load(url).await?);
        debug!(url, width = texture.width, height = texture.height, "texture cached");
        self.entries.insert(url.to_string(), Rc::clone(&texture));
        Ok(texture)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            estimated_bytes: self.entries.values().map(|t| t.estimated_bytes()).sum(),
        }
    }

    /// Drop every cached handle.
    pub fn clear(&mut self) {
        debug!(entries = self.entries.len(), "texture cache cleared");
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
