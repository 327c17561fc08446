use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, warn};
use thiserror::Error;

/// Opaque image handle for a piece sprite.
///
/// Holds the raw encoded image; decoding is left to whatever renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    name: String,
    bytes: Arc<[u8]>,
}

impl Sprite {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Error type for asset lookups.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset '{0}' not found")]
    NotFound(String),
    #[error("asset '{0}' is empty")]
    Empty(String),
    #[error("failed to read asset '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

/// Source of piece images, keyed by resource name (`"wbishop"`, `"bking"`, ...).
pub trait AssetSource {
    /// Error type for load failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    fn load(&mut self, name: &str) -> Result<Sprite, Self::Error>;
}

/// Loads a sprite, logging failures instead of returning them.
///
/// A piece without a sprite still plays; only its rendering degrades.
pub fn load_sprite(assets: &mut impl AssetSource, name: &str) -> Option<Sprite> {
    match assets.load(name) {
        Ok(sprite) => Some(sprite),
        Err(err) => {
            warn!("failed to load sprite '{name}': {err}");
            None
        }
    }
}

/// Reads `<root>/<name>.png` from disk.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.png"))
    }
}

impl AssetSource for DirectoryAssets {
    type Error = AssetError;

    fn load(&mut self, name: &str) -> Result<Sprite, Self::Error> {
        let path = self.path_for(name);
        let bytes = std::fs::read(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => AssetError::NotFound(name.to_string()),
            _ => AssetError::Io {
                name: name.to_string(),
                source,
            },
        })?;
        if bytes.is_empty() {
            return Err(AssetError::Empty(name.to_string()));
        }
        debug!("loaded sprite '{name}' from {}", path.display());
        Ok(Sprite::new(name, bytes))
    }
}

/// In-memory sprites registered up front.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    sprites: HashMap<String, Sprite>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, bytes: impl Into<Arc<[u8]>>) {
        self.sprites
            .insert(name.to_string(), Sprite::new(name, bytes));
    }
}

impl AssetSource for MemoryAssets {
    type Error = AssetError;

    fn load(&mut self, name: &str) -> Result<Sprite, Self::Error> {
        self.sprites
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(name.to_string()))
    }
}

/// Headless source: every piece is created without a sprite.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetSource for NoAssets {
    type Error = AssetError;

    fn load(&mut self, name: &str) -> Result<Sprite, Self::Error> {
        Err(AssetError::NotFound(name.to_string()))
    }
}
