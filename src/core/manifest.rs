//! NativeDeps.toml parsing.
//!
//! The manifest lists the native dependencies a makefile is generated for.
//! Entries keep their declaration order, which is the order the makefile
//! blocks are emitted in.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use indexmap::IndexSet;
use serde::Deserialize;

use crate::core::{Artifact, ArtifactType};

/// Canonical manifest file name.
pub const MANIFEST_NAME: &str = "NativeDeps.toml";

/// A parsed dependency manifest.
#[derive(Debug, Clone)]
pub struct DependencyManifest {
    artifacts: IndexSet<Artifact>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    #[serde(default, rename = "dependency")]
    dependencies: Vec<RawDependency>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDependency {
    group: String,
    artifact: String,
    version: String,
    #[serde(default)]
    classifier: Option<String>,
    #[serde(rename = "type")]
    artifact_type: ArtifactType,
    /// Resolved file, relative to the manifest directory.
    #[serde(default)]
    file: Option<PathBuf>,
}

impl DependencyManifest {
    /// Load a manifest from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        Self::parse(&content, path)
    }

    /// Parse manifest content. `path` anchors relative `file` entries.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let raw: RawManifest = toml::from_str(content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        let manifest_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();

        let mut artifacts = IndexSet::with_capacity(raw.dependencies.len());
        for dep in raw.dependencies {
            if dep.group.is_empty() || dep.artifact.is_empty() || dep.version.is_empty() {
                bail!(
                    "dependency `{}:{}:{}` in {} has an empty coordinate",
                    dep.group,
                    dep.artifact,
                    dep.version,
                    path.display()
                );
            }

            let mut artifact =
                Artifact::new(dep.group, dep.artifact, dep.version, dep.artifact_type);
            if let Some(classifier) = dep.classifier {
                artifact = artifact.with_classifier(classifier);
            }
            if let Some(file) = dep.file {
                artifact = artifact.with_file(manifest_dir.join(file));
            }

            let id = artifact.id();
            if !artifacts.insert(artifact) {
                bail!("dependency `{}` is declared twice in {}", id, path.display());
            }
        }

        Ok(DependencyManifest { artifacts })
    }

    /// Declared artifacts in declaration order.
    pub fn artifacts(&self) -> &IndexSet<Artifact> {
        &self.artifacts
    }
}

/// Find `NativeDeps.toml` in `start` or one of its ancestors.
pub fn find_manifest(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(MANIFEST_NAME))
        .find(|candidate| candidate.is_file())
}
