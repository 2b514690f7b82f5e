//! Library detail blocks and bundle library selection.

use std::path::{Path, PathBuf};

use crate::core::Artifact;
use crate::makefile::errors::{Ambiguity, MakefileError};
use crate::sources::NativeArtifactClassifier;
use crate::util::fs::absolute_path;

/// Picks the index of the library to link against among several candidates.
pub type LibrarySelector = fn(&[PathBuf], &str) -> Result<usize, Ambiguity>;

/// One physical library file as `ndk-build` should see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryDetails {
    /// Directory containing the file (`LOCAL_PATH`)
    pub directory: PathBuf,
    /// File name (`LOCAL_SRC_FILES`)
    pub file_name: String,
    /// Output name (`LOCAL_MODULE_FILENAME`)
    pub module_filename: String,
}

impl LibraryDetails {
    /// Describe `lib_file`. Without an explicit output name the file name
    /// minus its extension is used.
    ///
    /// Returns `None` if the path has no file name.
    pub fn new(lib_file: &Path, output_name: Option<&str>) -> Option<Self> {
        let file_name = lib_file.file_name()?.to_string_lossy().into_owned();
        let module_filename = match output_name {
            Some(name) => name.to_string(),
            None => lib_file.file_stem()?.to_string_lossy().into_owned(),
        };
        let absolute = absolute_path(lib_file);
        let directory = absolute.parent()?.to_path_buf();

        Some(LibraryDetails {
            directory,
            file_name,
            module_filename,
        })
    }

    /// Append the `LOCAL_PATH`/`LOCAL_SRC_FILES`/`LOCAL_MODULE_FILENAME` lines.
    pub fn write_to(&self, makefile: &mut String) {
        makefile.push_str(&format!("LOCAL_PATH := {}\n", self.directory.display()));
        makefile.push_str(&format!("LOCAL_SRC_FILES := {}\n", self.file_name));
        makefile.push_str(&format!(
            "LOCAL_MODULE_FILENAME := {}\n",
            self.module_filename
        ));
    }
}

/// The binary chosen from a bundle package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleLibrary {
    pub file: PathBuf,
    pub is_static: bool,
}

/// Default selection heuristic: a single candidate is taken as is, otherwise
/// the unique candidate whose name starts with `lib<artifact_id>` wins.
///
/// When several names start with the prefix, the ones where it runs on into
/// another letter are dropped: `libFooBar.so` names a different library than
/// `Foo`, while `libFoo2.so` or `libFoo_jni.so` are variants of it.
pub fn select_bundle_library(candidates: &[PathBuf], artifact_id: &str) -> Result<usize, Ambiguity> {
    if candidates.len() == 1 {
        return Ok(0);
    }

    tracing::info!("Found multiple library files, looking for name match with artifact");

    let prefix = format!("lib{}", artifact_id);
    let matching: Vec<usize> = candidates
        .iter()
        .enumerate()
        .filter(|(_, candidate)| file_name(candidate).starts_with(&prefix))
        .map(|(idx, _)| idx)
        .collect();

    match matching.as_slice() {
        [] => Err(Ambiguity::NoMatch),
        [idx] => Ok(*idx),
        _ => {
            let exact: Vec<usize> = matching
                .into_iter()
                .filter(|&idx| ends_prefix(&file_name(&candidates[idx]), &prefix))
                .collect();
            match exact.as_slice() {
                [idx] => Ok(*idx),
                _ => Err(Ambiguity::MultipleMatches),
            }
        }
    }
}

/// Locate the single binary to link against in a bundle package.
///
/// Static binaries are preferred; shared ones are only considered when the
/// bundle has no static binary for `architecture`.
pub fn resolve_bundle_library(
    classifier: &dyn NativeArtifactClassifier,
    selector: LibrarySelector,
    artifact: &Artifact,
    unpack_root: &Path,
    architecture: &str,
) -> Result<BundleLibrary, MakefileError> {
    let (candidates, is_static) =
        match non_empty(classifier.list_native_files(artifact, unpack_root, architecture, true)) {
            Some(statics) => (statics, true),
            None => {
                match non_empty(classifier.list_native_files(
                    artifact,
                    unpack_root,
                    architecture,
                    false,
                )) {
                    Some(shared) => (shared, false),
                    None => {
                        return Err(MakefileError::MissingLibrary {
                            artifact: artifact.id(),
                            architecture: architecture.to_string(),
                        })
                    }
                }
            }
        };

    let idx = selector(&candidates, artifact.artifact_id()).map_err(|kind| {
        MakefileError::AmbiguousLibrary {
            artifact: artifact.artifact_id().to_string(),
            candidates: candidates.iter().map(|c| file_name(c)).collect(),
            kind,
        }
    })?;

    Ok(BundleLibrary {
        file: candidates[idx].clone(),
        is_static,
    })
}

/// `name` starts with `prefix` and the prefix is not followed by a letter.
fn ends_prefix(name: &str, prefix: &str) -> bool {
    match name.strip_prefix(prefix) {
        Some(rest) => !rest.starts_with(|c: char| c.is_alphabetic()),
        None => false,
    }
}

fn non_empty(files: Option<Vec<PathBuf>>) -> Option<Vec<PathBuf>> {
    files.filter(|f| !f.is_empty())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ArtifactType;
    use crate::test_support::FakeClassifier;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from("/unpacked/libs/armeabi").join(n)).collect()
    }

    fn bundle(id: &str) -> Artifact {
        Artifact::new("com.example", id, "1.0", ArtifactType::ApkLib)
    }

    #[test]
    fn test_single_candidate_regardless_of_name() {
        assert_eq!(select_bundle_library(&paths(&["libother.so"]), "Foo"), Ok(0));
    }

    #[test]
    fn test_unique_prefix_match() {
        let candidates = paths(&["libFoo.so", "libFooBar.so"]);
        assert_eq!(select_bundle_library(&candidates, "Foo"), Ok(0));

        let candidates = paths(&["libBar.so", "libFoo.so"]);
        assert_eq!(select_bundle_library(&candidates, "Foo"), Ok(1));

        let candidates = paths(&["libBar.so", "libFoo_jni.so"]);
        assert_eq!(select_bundle_library(&candidates, "Foo"), Ok(1));
    }

    #[test]
    fn test_single_loose_prefix_match() {
        let candidates = paths(&["libFooBar.so", "libOther.so"]);
        assert_eq!(select_bundle_library(&candidates, "Foo"), Ok(0));

        let candidates = paths(&["libOther.so", "libFooBar.so", "libThird.so"]);
        assert_eq!(select_bundle_library(&candidates, "Foo"), Ok(1));
    }

    #[test]
    fn test_loose_matches_only_is_ambiguous() {
        let candidates = paths(&["libFooBar.so", "libFooBaz.so"]);
        assert_eq!(
            select_bundle_library(&candidates, "Foo"),
            Err(Ambiguity::MultipleMatches)
        );
    }

    #[test]
    fn test_prefix_collision_is_ambiguous() {
        let candidates = paths(&["libFoo.so", "libFoo2.so"]);
        assert_eq!(
            select_bundle_library(&candidates, "Foo"),
            Err(Ambiguity::MultipleMatches)
        );
    }

    #[test]
    fn test_no_match() {
        let candidates = paths(&["libA.so", "libB.so"]);
        assert_eq!(select_bundle_library(&candidates, "Foo"), Err(Ambiguity::NoMatch));
    }

    #[test]
    fn test_static_preferred() {
        let classifier = FakeClassifier::new()
            .with_static("armeabi", paths(&["libwhatever.a"]))
            .with_shared("armeabi", paths(&["libFoo.so"]));

        let lib = resolve_bundle_library(
            &classifier,
            select_bundle_library,
            &bundle("Foo"),
            Path::new("/unpacked"),
            "armeabi",
        )
        .unwrap();

        assert!(lib.is_static);
        assert!(lib.file.ends_with("libwhatever.a"));
        // shared libraries are never looked at
        assert_eq!(classifier.calls().len(), 1);
    }

    #[test]
    fn test_falls_back_to_shared() {
        let classifier = FakeClassifier::new()
            .with_static("armeabi", Vec::new())
            .with_shared("armeabi", paths(&["libFoo.so", "libBar.so"]));

        let lib = resolve_bundle_library(
            &classifier,
            select_bundle_library,
            &bundle("Foo"),
            Path::new("/unpacked"),
            "armeabi",
        )
        .unwrap();

        assert!(!lib.is_static);
        assert!(lib.file.ends_with("libFoo.so"));
    }

    #[test]
    fn test_missing_library() {
        let err = resolve_bundle_library(
            &FakeClassifier::new(),
            select_bundle_library,
            &bundle("Foo"),
            Path::new("/unpacked"),
            "x86",
        )
        .unwrap_err();

        assert!(matches!(err, MakefileError::MissingLibrary { ref architecture, .. } if architecture == "x86"));
    }

    #[test]
    fn test_ambiguity_names_all_candidates() {
        let classifier =
            FakeClassifier::new().with_shared("armeabi", paths(&["libFoo.so", "libFoo2.so"]));

        match resolve_bundle_library(
            &classifier,
            select_bundle_library,
            &bundle("Foo"),
            Path::new("/unpacked"),
            "armeabi",
        ) {
            Err(MakefileError::AmbiguousLibrary {
                artifact,
                candidates,
                kind,
            }) => {
                assert_eq!(artifact, "Foo");
                assert_eq!(candidates, vec!["libFoo.so", "libFoo2.so"]);
                assert_eq!(kind, Ambiguity::MultipleMatches);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_custom_selector() {
        fn last(candidates: &[PathBuf], _: &str) -> Result<usize, Ambiguity> {
            Ok(candidates.len() - 1)
        }

        let classifier =
            FakeClassifier::new().with_shared("armeabi", paths(&["libFoo.so", "libFoo2.so"]));
        let lib = resolve_bundle_library(
            &classifier,
            last,
            &bundle("Foo"),
            Path::new("/unpacked"),
            "armeabi",
        )
        .unwrap();
        assert!(lib.file.ends_with("libFoo2.so"));
    }

    #[test]
    fn test_library_details() {
        let details = LibraryDetails::new(Path::new("/repo/foo/libfoo-1.0.so"), None).unwrap();
        assert_eq!(details.directory, PathBuf::from("/repo/foo"));
        assert_eq!(details.file_name, "libfoo-1.0.so");
        assert_eq!(details.module_filename, "libfoo-1.0");

        let named = LibraryDetails::new(Path::new("/repo/foo/foo-1.0.a"), Some("foo")).unwrap();
        assert_eq!(named.module_filename, "foo");

        let mut out = String::new();
        named.write_to(&mut out);
        assert_eq!(
            out,
            "LOCAL_PATH := /repo/foo\nLOCAL_SRC_FILES := foo-1.0.a\nLOCAL_MODULE_FILENAME := foo\n"
        );
    }
}
