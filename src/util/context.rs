//! Global context for prebuilt-mk operations.
//!
//! Provides centralized access to the working directory, configuration
//! locations and output settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::manifest::find_manifest;
use crate::util::config::{self, Config};
use crate::util::diagnostic::ManifestNotFoundError;

/// Global context.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Global configuration directory (~/.prebuilt-mk/)
    home: Option<PathBuf>,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        GlobalContext {
            cwd,
            home: config::global_config_dir(),
            color: true,
        }
    }

    /// Override the global configuration directory.
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// Global config path (~/.prebuilt-mk/config.toml), if a home is known.
    pub fn global_config_path(&self) -> Option<PathBuf> {
        self.home.as_ref().map(|home| home.join("config.toml"))
    }

    /// Configuration for a project rooted at `project_root`.
    pub fn load_config(&self, project_root: &Path) -> Config {
        config::load_config(
            self.global_config_path().as_deref(),
            &config::project_config_path(project_root),
        )
    }

    /// Resolve the manifest to use: an explicit path relative to cwd, or
    /// `NativeDeps.toml` found by searching upward from cwd.
    pub fn find_manifest(&self, explicit: Option<&Path>) -> Result<PathBuf, ManifestNotFoundError> {
        match explicit {
            Some(path) => {
                let path = self.cwd.join(path);
                if path.is_file() {
                    Ok(path)
                } else {
                    Err(ManifestNotFoundError { start: path })
                }
            }
            None => find_manifest(&self.cwd).ok_or_else(|| ManifestNotFoundError {
                start: self.cwd.clone(),
            }),
        }
    }

    /// Make a user supplied path absolute against cwd.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        self.cwd.join(path)
    }
}
