//! CLI command implementations

pub mod apply;
pub mod convert;
pub mod info;
pub mod ops;

use anyhow::{Context, Result};
use pnm_core::Image;
use std::path::{Path, PathBuf};

/// Load an image from a path.
pub fn load_image(path: &Path) -> Result<Image> {
    pnm_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save an image, returning the path actually written.
pub fn save_image(image: &Image, path: &Path) -> Result<PathBuf> {
    pnm_io::write(image, path).with_context(|| format!("Failed to save: {}", path.display()))
}
