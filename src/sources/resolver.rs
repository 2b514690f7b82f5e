//! Artifact resolution - mapping coordinates to files on disk.

use std::path::{Path, PathBuf};

use crate::core::Artifact;
use crate::makefile::MakefileError;

/// Maps a logical artifact coordinate to a file on disk.
pub trait ArtifactResolver {
    /// Locate the artifact's file, failing if no configured repository has it.
    fn resolve_to_file(&self, artifact: &Artifact) -> Result<PathBuf, MakefileError>;
}

/// Resolver over Maven-layout repositories on the local filesystem.
///
/// Files live at
/// `<root>/<group as dirs>/<artifact>/<version>/<artifact>-<version>[-<classifier>].<type>`.
/// Roots are searched in order; first match wins.
#[derive(Debug, Clone, Default)]
pub struct LocalRepository {
    roots: Vec<PathBuf>,
}

impl LocalRepository {
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        LocalRepository {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// The user's `~/.m2/repository`, if a home directory is known.
    pub fn user_default() -> Option<Self> {
        directories::BaseDirs::new()
            .map(|b| LocalRepository::new([b.home_dir().join(".m2").join("repository")]))
    }

    /// Path of an artifact relative to a repository root.
    pub fn relative_path(artifact: &Artifact) -> PathBuf {
        let mut path = PathBuf::new();
        for segment in artifact.group_id().split('.') {
            path.push(segment);
        }
        path.push(artifact.artifact_id());
        path.push(artifact.version());

        let file_name = match artifact.classifier() {
            Some(classifier) => format!(
                "{}-{}-{}.{}",
                artifact.artifact_id(),
                artifact.version(),
                classifier,
                artifact.artifact_type()
            ),
            None => format!(
                "{}-{}.{}",
                artifact.artifact_id(),
                artifact.version(),
                artifact.artifact_type()
            ),
        };
        path.push(file_name);
        path
    }

    fn locate(&self, relative: &Path) -> Option<PathBuf> {
        self.roots
            .iter()
            .map(|root| root.join(relative))
            .find(|candidate| candidate.is_file())
    }
}

impl ArtifactResolver for LocalRepository {
    fn resolve_to_file(&self, artifact: &Artifact) -> Result<PathBuf, MakefileError> {
        if let Some(file) = artifact.file() {
            if file.is_file() {
                return Ok(file.to_path_buf());
            }
            tracing::debug!(
                "Declared file {} for {} does not exist, searching repositories",
                file.display(),
                artifact
            );
        }

        let relative = Self::relative_path(artifact);
        self.locate(&relative).ok_or_else(|| {
            let searched: Vec<String> = self
                .roots
                .iter()
                .map(|r| r.display().to_string())
                .collect();
            MakefileError::Resolution {
                artifact: artifact.id(),
                reason: if searched.is_empty() {
                    "no repositories configured".to_string()
                } else {
                    format!(
                        "{} not found in any of: {}",
                        relative.display(),
                        searched.join(", ")
                    )
                },
            }
        })
    }
}
