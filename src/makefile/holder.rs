//! Generated makefile plus the include directories created for it.
//!
//! The directories outlive the generator call: ownership passes to the
//! caller, who removes them with [`cleanup_after_build`] or by turning the
//! holder into an [`IncludeDirsGuard`].

use std::path::{Path, PathBuf};

use crate::util::fs::remove_dir_all_if_exists;

/// Result of creating a makefile.
#[derive(Debug)]
pub struct MakefileHolder {
    makefile: String,
    include_directories: Vec<PathBuf>,
}

impl MakefileHolder {
    pub fn new(makefile: String, include_directories: Vec<PathBuf>) -> Self {
        MakefileHolder {
            makefile,
            include_directories,
        }
    }

    /// The makefile text.
    pub fn makefile(&self) -> &str {
        &self.makefile
    }

    /// Directories holding extracted header archives.
    pub fn include_directories(&self) -> &[PathBuf] {
        &self.include_directories
    }

    /// Split into the makefile text and a guard removing the include
    /// directories when dropped.
    pub fn into_guard(self) -> (String, IncludeDirsGuard) {
        (
            self.makefile,
            IncludeDirsGuard {
                dirs: self.include_directories,
            },
        )
    }
}

/// Removes a set of include directories when dropped.
#[derive(Debug, Default)]
pub struct IncludeDirsGuard {
    dirs: Vec<PathBuf>,
}

impl IncludeDirsGuard {
    pub fn new() -> Self {
        IncludeDirsGuard::default()
    }

    /// Take ownership of another directory.
    pub fn push(&mut self, dir: PathBuf) {
        self.dirs.push(dir);
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Release the directories without removing them.
    pub fn keep(mut self) -> Vec<PathBuf> {
        std::mem::take(&mut self.dirs)
    }
}

impl Drop for IncludeDirsGuard {
    fn drop(&mut self) {
        remove_include_dirs(&self.dirs);
    }
}

/// Remove all include directories created for `holder`.
///
/// Best effort: failures are logged, never returned.
pub fn cleanup_after_build(holder: &MakefileHolder) {
    remove_include_dirs(holder.include_directories());
}

/// Remove include directories, logging failures.
pub fn remove_include_dirs(dirs: &[PathBuf]) {
    for dir in dirs {
        remove_one(dir);
    }
}

fn remove_one(dir: &Path) {
    match remove_dir_all_if_exists(dir) {
        Ok(()) => tracing::debug!("Removed include directory {}", dir.display()),
        Err(e) => tracing::warn!("{:#}", e),
    }
}
