//! Loading assets from disk and turning them into GPU resources.
//!
//! - `texture` reads and decodes the image file the cube is textured with
//! - `set` bundles the cube's vertex buffer and texture bindings

use std::path::{Path, PathBuf};

use anyhow::Context;

pub mod set;
pub mod texture;

/// Resolve an asset name to a file on disk.
///
/// A name that already points at a file is used as is. Otherwise the name
/// is looked up under `./assets/` and finally in the copy of the crate's
/// `assets/` the build script leaves in `OUT_DIR`.
pub fn asset_path(file_name: &str) -> PathBuf {
    let direct = Path::new(file_name);
    if direct.is_file() {
        return direct.to_path_buf();
    }
    let local = Path::new("./").join("assets").join(file_name);
    if local.is_file() {
        return local;
    }
    Path::new(env!("OUT_DIR"))
        .join("assets")
        .join(file_name)
}

pub fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    let path = asset_path(file_name);
    std::fs::read(&path).with_context(|| format!("failed to read asset {}", path.display()))
}
