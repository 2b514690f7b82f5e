//! Module lists for `LOCAL_STATIC_LIBRARIES` / `LOCAL_SHARED_LIBRARIES`.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;

use crate::core::{Artifact, ArtifactType};
use crate::sources::NativeArtifactClassifier;

/// Builds the space separated module list a consuming makefile links with.
pub struct LibraryListBuilder<'a> {
    classifier: &'a dyn NativeArtifactClassifier,
    unpack_dir: PathBuf,
}

impl<'a> LibraryListBuilder<'a> {
    pub fn new(classifier: &'a dyn NativeArtifactClassifier, unpack_dir: impl Into<PathBuf>) -> Self {
        LibraryListBuilder {
            classifier,
            unpack_dir: unpack_dir.into(),
        }
    }

    /// Names of the artifacts providing a static (`want_static`) or shared
    /// library for `architecture`, first-seen order, no duplicates.
    pub fn build(
        &self,
        artifacts: &IndexSet<Artifact>,
        architecture: &str,
        want_static: bool,
    ) -> String {
        let mut names: IndexSet<&str> = IndexSet::new();

        for artifact in artifacts {
            let wanted_type = if want_static {
                ArtifactType::NativeStaticArchive
            } else {
                ArtifactType::NativeSharedObject
            };

            if artifact.artifact_type() == wanted_type
                || (artifact.is_bundle()
                    && self.bundle_provides(artifact, &self.unpack_dir, architecture, want_static))
            {
                names.insert(artifact.artifact_id());
            }
        }

        names.into_iter().collect::<Vec<_>>().join(" ")
    }

    fn bundle_provides(
        &self,
        artifact: &Artifact,
        unpack_dir: &Path,
        architecture: &str,
        want_static: bool,
    ) -> bool {
        self.classifier
            .list_native_files(artifact, unpack_dir, architecture, want_static)
            .is_some_and(|files| !files.is_empty())
    }
}
