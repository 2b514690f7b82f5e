//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.prebuilt-mk/config.toml` - User-wide defaults
//! - Project: `.prebuilt-mk/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config; command line flags
//! take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Architecture used when neither flags nor config name one.
pub const DEFAULT_ARCHITECTURE: &str = "armeabi";

/// Configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// NDK settings
    pub ndk: NdkConfig,

    /// Artifact repository settings
    pub repository: RepositoryConfig,
}

/// NDK related settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NdkConfig {
    /// Target architecture (e.g. armeabi-v7a)
    pub architecture: Option<String>,

    /// Architecture for artifacts whose classifier names none
    pub default_architecture: Option<String>,

    /// Export header archives through LOCAL_EXPORT_C_INCLUDES
    pub export_headers: Option<bool>,

    /// Directory bundle packages (apklib/aar) were unpacked into
    pub unpack_dir: Option<PathBuf>,
}

/// Repositories searched for artifacts and header archives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Maven-layout repository roots, searched in order
    pub roots: Vec<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.ndk.architecture.is_some() {
            self.ndk.architecture = other.ndk.architecture;
        }
        if other.ndk.default_architecture.is_some() {
            self.ndk.default_architecture = other.ndk.default_architecture;
        }
        if other.ndk.export_headers.is_some() {
            self.ndk.export_headers = other.ndk.export_headers;
        }
        if other.ndk.unpack_dir.is_some() {
            self.ndk.unpack_dir = other.ndk.unpack_dir;
        }

        if !other.repository.roots.is_empty() {
            self.repository.roots = other.repository.roots;
        }
    }

    /// Join relative directories onto `base`.
    fn anchor_paths(&mut self, base: &Path) {
        if let Some(dir) = self.ndk.unpack_dir.as_mut() {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
        for repo in &mut self.repository.roots {
            if repo.is_relative() {
                *repo = base.join(&*repo);
            }
        }
    }

    /// Target architecture, falling back to [`DEFAULT_ARCHITECTURE`].
    pub fn architecture(&self) -> &str {
        self.ndk.architecture.as_deref().unwrap_or(DEFAULT_ARCHITECTURE)
    }

    /// Default architecture, falling back to the target architecture.
    pub fn default_architecture(&self) -> &str {
        self.ndk
            .default_architecture
            .as_deref()
            .unwrap_or_else(|| self.architecture())
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.prebuilt-mk/config.toml)
/// 2. Global config (~/.prebuilt-mk/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        let mut global = Config::load_or_default(global_path);
        // relative paths in the global config are relative to ~/.prebuilt-mk
        if let Some(dir) = global_path.parent() {
            global.anchor_paths(dir);
        }
        config.merge(global);
    }

    let mut project = Config::load_or_default(project_path);
    // relative paths in the project config are relative to the project root
    if let Some(root) = project_path.parent().and_then(Path::parent) {
        project.anchor_paths(root);
    }
    config.merge(project);

    config
}

/// Get the global config directory (~/.prebuilt-mk).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".prebuilt-mk"))
}

/// Get the project config path (.prebuilt-mk/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".prebuilt-mk").join("config.toml")
}
