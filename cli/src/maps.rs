//! Country-highlight map images, loaded from pre-rendered PNG files
//!
//! One bitmap per country, named `map-<slug>.png`, 1920x1080. Loaded
//! bitmaps are cached under the slug so repeated call signs from the same
//! country decode the PNG once.

use cwtrainer_core::{Frame, MapSource, Result, TrainerError};
use log::info;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Normalize a country name to its map file slug: lower-case,
/// alphanumeric runs joined by single hyphens
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

pub struct PngMapSource {
    dir: PathBuf,
    cache: HashMap<String, Arc<Frame>>,
}

impl PngMapSource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            cache: HashMap::new(),
        }
    }

    fn load(&self, path: &Path) -> Result<Frame> {
        if !path.is_file() {
            return Err(TrainerError::AssetMissing(path.to_path_buf()));
        }
        let image = image::open(path).map_err(|e| TrainerError::AssetUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let rgb = image.into_rgb8();
        Frame::new(rgb.width(), rgb.height(), rgb.into_raw())
    }
}

impl MapSource for PngMapSource {
    fn map_image(&mut self, country: &str) -> Result<Arc<Frame>> {
        let slug = slugify(country);
        if let Some(frame) = self.cache.get(&slug) {
            return Ok(frame.clone());
        }
        let path = self.dir.join(format!("map-{slug}.png"));
        info!("loading map for {} from {}", country, path.display());
        let frame = Arc::new(self.load(&path)?);
        self.cache.insert(slug, frame.clone());
        Ok(frame)
    }
}
