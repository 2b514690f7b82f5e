//! Test doubles for the makefile generator's collaborators.
//!
//! Only compiled for tests. The fakes answer from in-memory tables instead
//! of looking at a repository or an unpack directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use prebuilt_mk::test_support::{FakeClassifier, FakeResolver};
//!
//! let classifier = FakeClassifier::new()
//!     .with_shared("armeabi", vec![PathBuf::from("/u/libfoo.so")]);
//! let resolver = FakeResolver::new();
//! ```

pub mod fixtures;

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::Artifact;
use crate::makefile::MakefileError;
use crate::sources::{ArtifactResolver, NativeArtifactClassifier};

/// Classifier answering per `(architecture, static)` regardless of artifact.
#[derive(Debug, Default)]
pub struct FakeClassifier {
    files: HashMap<(String, bool), Vec<PathBuf>>,
    calls: RefCell<Vec<(String, String, bool)>>,
}

impl FakeClassifier {
    pub fn new() -> Self {
        FakeClassifier::default()
    }

    /// Static libraries reported for `architecture`.
    pub fn with_static(mut self, architecture: &str, files: Vec<PathBuf>) -> Self {
        self.files.insert((architecture.to_string(), true), files);
        self
    }

    /// Shared libraries reported for `architecture`.
    pub fn with_shared(mut self, architecture: &str, files: Vec<PathBuf>) -> Self {
        self.files.insert((architecture.to_string(), false), files);
        self
    }

    /// Recorded `(artifact id, architecture, want_static)` queries.
    pub fn calls(&self) -> Vec<(String, String, bool)> {
        self.calls.borrow().clone()
    }
}

impl NativeArtifactClassifier for FakeClassifier {
    fn list_native_files(
        &self,
        artifact: &Artifact,
        _unpack_root: &Path,
        architecture: &str,
        want_static: bool,
    ) -> Option<Vec<PathBuf>> {
        self.calls.borrow_mut().push((
            artifact.artifact_id().to_string(),
            architecture.to_string(),
            want_static,
        ));
        self.files
            .get(&(architecture.to_string(), want_static))
            .cloned()
    }
}

/// Resolver backed by a table of known artifacts.
#[derive(Debug, Default)]
pub struct FakeResolver {
    files: HashMap<Artifact, PathBuf>,
}

impl FakeResolver {
    pub fn new() -> Self {
        FakeResolver::default()
    }

    pub fn insert(&mut self, artifact: Artifact, file: PathBuf) {
        self.files.insert(artifact, file);
    }
}

impl ArtifactResolver for FakeResolver {
    fn resolve_to_file(&self, artifact: &Artifact) -> Result<PathBuf, MakefileError> {
        self.files
            .get(artifact)
            .cloned()
            .ok_or_else(|| MakefileError::Resolution {
                artifact: artifact.id(),
                reason: "not in fake repository".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ArtifactType;

    #[test]
    fn test_fake_classifier_records_calls() {
        let classifier =
            FakeClassifier::new().with_static("x86", vec![PathBuf::from("/u/libfoo.a")]);
        let artifact = Artifact::new("g", "foo", "1", ArtifactType::Aar);

        assert!(classifier
            .list_native_files(&artifact, Path::new("/u"), "x86", true)
            .is_some());
        assert!(classifier
            .list_native_files(&artifact, Path::new("/u"), "x86", false)
            .is_none());
        assert_eq!(
            classifier.calls(),
            vec![
                ("foo".to_string(), "x86".to_string(), true),
                ("foo".to_string(), "x86".to_string(), false),
            ]
        );
    }
}
