//! Resource list and storage location collaborators.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use gridfetch_core::parse_url_list;

const BUILTIN_IMAGE_COUNT: u32 = 30;

/// Static image list used when no url file is given.
pub fn builtin_urls() -> Vec<String> {
    (0..BUILTIN_IMAGE_COUNT)
        .map(|i| format!("https://picsum.photos/id/{}/600/600", 10 + i))
        .collect()
}

pub fn load_urls(path: Option<&Path>) -> anyhow::Result<Vec<String>> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read url list {}", path.display()))?;
            Ok(parse_url_list(&raw))
        }
        None => Ok(builtin_urls()),
    }
}

/// Per-user data directory.
///
/// - Windows: `LOCALAPPDATA`
/// - macOS: `~/Library/Application Support`
/// - Linux: `$XDG_DATA_HOME` or `~/.local/share`
fn user_data() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        env::var_os("LOCALAPPDATA").map(PathBuf::from)
    } else if cfg!(target_os = "macos") {
        home::home_dir().map(|p| p.join("Library/Application Support"))
    } else {
        env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| home::home_dir().map(|p| p.join(".local/share")))
    }
}

/// Root for everything gridfetch stores; falls back to `./gridfetch`.
pub fn storage_root() -> PathBuf {
    user_data()
        .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
        .join("gridfetch")
}

pub fn default_image_dir() -> PathBuf {
    storage_root().join("images")
}
