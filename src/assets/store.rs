//! Decoded-image cache keyed by asset path, with LRU eviction.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::png::{self, DecodedPng, PngMetadata};
use crate::foundation::error::{PulpError, PulpResult};
use crate::surface::pixel_buffer::PixelBuffer;

/// Environment variable overriding [`ImageStoreOpts::capacity`].
pub const CAPACITY_ENV: &str = "PULPGFX_IMAGE_CACHE_CAPACITY";

const DEFAULT_CAPACITY: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageStoreOpts {
    /// Maximum number of decoded images kept alive by the store.
    pub capacity: usize,
}

impl Default for ImageStoreOpts {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl ImageStoreOpts {
    /// Defaults, with the capacity taken from `PULPGFX_IMAGE_CACHE_CAPACITY` when it holds a
    /// positive integer.
    pub fn from_env() -> Self {
        let capacity = std::env::var(CAPACITY_ENV)
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_CAPACITY);
        Self { capacity }
    }
}

/// Normalize a root-relative asset path to `a/b/c.png` form.
pub(crate) fn normalize_rel_path(source: &str) -> PulpResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(PulpError::validation("image paths must be relative"));
    }
    if s.is_empty() {
        return Err(PulpError::validation("image path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(PulpError::validation("image paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(PulpError::validation("image path must contain a file name"));
    }

    Ok(out.join("/"))
}

/// Loads PNGs from below a root directory and keeps the most recently used ones decoded.
///
/// Lookups that fail to read or decode fall back to a shared placeholder so a missing asset
/// shows up on screen instead of aborting the frame. Failures are not cached.
#[derive(Debug)]
pub struct ImageStore {
    root: PathBuf,
    capacity: usize,
    images: HashMap<String, Arc<DecodedPng>>,
    lru: VecDeque<String>,
    broken: Arc<DecodedPng>,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>, opts: ImageStoreOpts) -> Self {
        Self {
            root: root.into(),
            capacity: opts.capacity.max(1),
            images: HashMap::new(),
            lru: VecDeque::new(),
            broken: Arc::new(DecodedPng {
                image: PixelBuffer::broken(),
                metadata: PngMetadata::default(),
            }),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn contains(&self, rel: &str) -> bool {
        normalize_rel_path(rel).is_ok_and(|k| self.images.contains_key(&k))
    }

    /// The image at `rel`, or the placeholder if it cannot be loaded.
    pub fn get(&mut self, rel: &str) -> Arc<DecodedPng> {
        match self.try_get(rel) {
            Ok(img) => img,
            Err(err) => {
                tracing::warn!(path = rel, error = %err, "image load failed, using placeholder");
                Arc::clone(&self.broken)
            }
        }
    }

    /// The image at `rel`, loading and caching it on a miss.
    pub fn try_get(&mut self, rel: &str) -> PulpResult<Arc<DecodedPng>> {
        let key = normalize_rel_path(rel)?;
        if let Some(img) = self.images.get(&key).cloned() {
            self.touch(&key);
            return Ok(img);
        }

        let decoded = Arc::new(png::read_file(self.root.join(&key))?);
        tracing::debug!(path = %key, "image cache miss");
        self.insert_entry(key, Arc::clone(&decoded));
        Ok(decoded)
    }

    /// Register an already decoded image under `rel`, replacing any cached entry.
    pub fn insert(&mut self, rel: &str, image: DecodedPng) -> PulpResult<Arc<DecodedPng>> {
        let key = normalize_rel_path(rel)?;
        let image = Arc::new(image);
        self.insert_entry(key, Arc::clone(&image));
        Ok(image)
    }

    pub fn remove(&mut self, rel: &str) -> Option<Arc<DecodedPng>> {
        let key = normalize_rel_path(rel).ok()?;
        let removed = self.images.remove(&key)?;
        if let Some(pos) = self.lru.iter().position(|k| *k == key) {
            self.lru.remove(pos);
        }
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.images.clear();
        self.lru.clear();
    }

    fn insert_entry(&mut self, key: String, image: Arc<DecodedPng>) {
        self.images.insert(key.clone(), image);
        self.touch(&key);
        while self.lru.len() > self.capacity {
            if let Some(old) = self.lru.pop_front() {
                tracing::trace!(path = %old, "evicting image");
                self.images.remove(&old);
            }
        }
    }

    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.lru.iter().position(|k| k == key) {
            self.lru.remove(pos);
        }
        self.lru.push_back(key.to_owned());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
