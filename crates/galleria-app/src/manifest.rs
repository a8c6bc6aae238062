//! Ordered item list exhibited by the gallery.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use galleria_layout::Exhibit;
use serde::{Deserialize, Serialize};

/// One exhibited item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identifier, unique within a manifest.
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Image path relative to the manifest's directory.
    #[serde(default)]
    pub image: Option<String>,
}

impl Exhibit for Item {
    fn exhibit_id(&self) -> &str {
        &self.id
    }
}

/// Errors raised while loading a manifest file.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("duplicate item id `{0}`")]
    DuplicateId(String),
}

/// A RON document of the form `(items: [(id: "a", title: "A", image: Some("a.png"))])`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub items: Vec<Item>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Parse manifest text. `path` is only used in error messages.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ManifestError> {
        let manifest: Manifest = ron::from_str(text).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let mut seen = HashSet::new();
        for item in &manifest.items {
            if !seen.insert(item.id.as_str()) {
                return Err(ManifestError::DuplicateId(item.id.clone()));
            }
        }
        Ok(manifest)
    }

    /// `count` untitled items without images.
    pub fn placeholders(count: usize) -> Self {
        Self {
            items: (0..count)
                .map(|i| Item {
                    id: format!("item-{:03}", i + 1),
                    title: format!("Untitled {}", i + 1),
                    image: None,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
