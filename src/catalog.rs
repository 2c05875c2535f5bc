//! Spawn Catalog
//!
//! The catalog is the list of things the spawner may drop: sprite images found
//! in the asset directory, or the fixed set of procedural shapes.
//!
//! Texture loading itself lives in the platform layer. This module only knows
//! how to find candidate image files and how to name them:
//!
//! ```text
//! assets/Pikachu.PNG  ->  "pikachu"
//! assets/mr-mime.jpg  ->  "mr-mime"
//! assets/notes.txt    ->  (skipped)
//! ```

use crate::entity::{ShapeKind, SpriteHandle};
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};

/// File extensions accepted as sprite images (compared case-insensitively)
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// What a catalog entry spawns as
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogLook {
    Sprite {
        handle: SpriteHandle,
        width: u32,
        height: u32,
    },
    Shape(ShapeKind),
}

/// One spawnable thing and its canonical name
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub look: CatalogLook,
    pub name: String,
}

/// Set of spawnable items. May be empty, in which case nothing ever spawns.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Catalog { items }
    }

    /// Catalog of the four procedural shapes, named after their kind
    pub fn shapes() -> Self {
        Catalog {
            items: ShapeKind::ALL
                .iter()
                .map(|kind| CatalogItem {
                    look: CatalogLook::Shape(*kind),
                    name: kind.name().to_string(),
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Uniformly picks one item. `None` only when the catalog is empty.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&CatalogItem> {
        if self.items.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.items.len());
        self.items.get(index)
    }
}

/// Returns true if the path has an image extension we can load
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Canonical name for an image: the file stem, lowercased.
pub fn canonical_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(|stem| stem.to_lowercase())
}

/// Lists the image files directly inside `dir`, sorted by path.
///
/// A missing or unreadable directory is not an error: it is logged and
/// yields an empty list, which in turn yields an empty (but playable) game.
/// Sorting keeps catalog order stable so seeded runs replay identically.
pub fn discover_images(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Asset directory {} unavailable: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut images: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_image_file(path))
        .collect();
    images.sort();

    log::debug!("Found {} image files in {}", images.len(), dir.display());
    images
}
