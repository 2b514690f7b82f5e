//! Locating native binaries inside unpacked bundle packages.

use std::path::{Path, PathBuf};

use crate::core::Artifact;
use crate::util::fs::glob_files;

/// Finds candidate native binaries for a bundle artifact.
pub trait NativeArtifactClassifier {
    /// List the static (`want_static`) or shared binaries the unpacked bundle
    /// holds for `architecture`.
    ///
    /// Returns `None` or an empty list when nothing was unpacked for this
    /// artifact and architecture.
    fn list_native_files(
        &self,
        artifact: &Artifact,
        unpack_root: &Path,
        architecture: &str,
        want_static: bool,
    ) -> Option<Vec<PathBuf>>;
}

/// Classifier for bundles unpacked as `<root>/<group>_<artifact>/libs/<arch>/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnpackedBundleClassifier;

impl UnpackedBundleClassifier {
    /// Directory a bundle is unpacked into.
    pub fn unpack_dir(artifact: &Artifact, unpack_root: &Path) -> PathBuf {
        unpack_root.join(format!("{}_{}", artifact.group_id(), artifact.artifact_id()))
    }

    /// Directory holding one architecture's binaries.
    pub fn libs_dir(artifact: &Artifact, unpack_root: &Path, architecture: &str) -> PathBuf {
        Self::unpack_dir(artifact, unpack_root)
            .join("libs")
            .join(architecture)
    }
}

impl NativeArtifactClassifier for UnpackedBundleClassifier {
    fn list_native_files(
        &self,
        artifact: &Artifact,
        unpack_root: &Path,
        architecture: &str,
        want_static: bool,
    ) -> Option<Vec<PathBuf>> {
        let libs_dir = Self::libs_dir(artifact, unpack_root, architecture);
        if !libs_dir.is_dir() {
            tracing::debug!("No unpacked libraries for {} at {}", artifact, libs_dir.display());
            return None;
        }

        let pattern = if want_static { "lib*.a" } else { "lib*.so" };
        match glob_files(&libs_dir, &[pattern.to_string()]) {
            Ok(files) => Some(files),
            Err(e) => {
                tracing::warn!("Failed to list {}: {:#}", libs_dir.display(), e);
                None
            }
        }
    }
}
