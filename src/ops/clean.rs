//! Implementation of `prebuilt-mk clean`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::makefile::{remove_include_dirs, INCLUDE_DIR_PREFIX};

/// Remove the header include directories a previous `generate` left in
/// `include_root`. Returns the directories found.
///
/// Removal is best effort: failures are logged, never returned.
pub fn clean_include_dirs(include_root: &Path) -> Result<Vec<PathBuf>> {
    if !include_root.is_dir() {
        return Ok(Vec::new());
    }

    let mut dirs = Vec::new();
    let entries = std::fs::read_dir(include_root)
        .with_context(|| format!("failed to read directory: {}", include_root.display()))?;
    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed to read directory: {}", include_root.display()))?;
        let is_include_dir = entry.file_name().to_string_lossy().starts_with(INCLUDE_DIR_PREFIX);
        if is_include_dir && entry.path().is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();

    remove_include_dirs(&dirs);
    Ok(dirs)
}
