//! Android.mk generation for prebuilt native dependencies.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use walkdir::WalkDir;

use crate::core::{effective_architecture, Artifact, ArtifactType};
use crate::makefile::errors::MakefileError;
use crate::makefile::holder::{IncludeDirsGuard, MakefileHolder};
use crate::makefile::library::{
    resolve_bundle_library, select_bundle_library, LibraryDetails, LibrarySelector,
};
use crate::makefile::preamble::{CAPTURE_PREAMBLE, GENERATED_HEADER};
use crate::sources::{ArchiveExtractor, ArtifactResolver, NativeArtifactClassifier};
use crate::util::fs::absolute_path;

/// Prefix of the temporary directories header archives are extracted into.
pub const INCLUDE_DIR_PREFIX: &str = "prebuilt_mk_native_includes";

/// Creates makefiles declaring artifacts as prebuilt `ndk-build` modules.
pub struct MakefileGenerator<'a> {
    resolver: &'a dyn ArtifactResolver,
    classifier: &'a dyn NativeArtifactClassifier,
    extractor: &'a dyn ArchiveExtractor,
    unpack_dir: PathBuf,
    include_root: PathBuf,
    selector: LibrarySelector,
}

impl<'a> MakefileGenerator<'a> {
    /// Create a generator. `unpack_dir` is where bundle packages were unpacked.
    pub fn new(
        resolver: &'a dyn ArtifactResolver,
        classifier: &'a dyn NativeArtifactClassifier,
        extractor: &'a dyn ArchiveExtractor,
        unpack_dir: impl Into<PathBuf>,
    ) -> Self {
        MakefileGenerator {
            resolver,
            classifier,
            extractor,
            unpack_dir: unpack_dir.into(),
            include_root: std::env::temp_dir(),
            selector: select_bundle_library,
        }
    }

    /// Set the directory include directories are created in (default: the
    /// system temp directory).
    pub fn include_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.include_root = dir.into();
        self
    }

    /// Replace the heuristic picking one library out of a bundle.
    pub fn library_selector(mut self, selector: LibrarySelector) -> Self {
        self.selector = selector;
        self
    }

    /// Create a makefile declaring every artifact as a prebuilt module.
    ///
    /// With `use_header_archives`, each artifact's header archive is
    /// extracted and exported through `LOCAL_EXPORT_C_INCLUDES`. The returned
    /// holder owns the extracted directories. On error, directories created
    /// so far are removed.
    pub fn create_makefile(
        &self,
        artifacts: &IndexSet<Artifact>,
        ndk_architecture: &str,
        default_ndk_architecture: &str,
        use_header_archives: bool,
    ) -> Result<MakefileHolder, MakefileError> {
        let mut makefile = String::from(CAPTURE_PREAMBLE);
        makefile.push_str(GENERATED_HEADER);

        let mut include_dirs = IncludeDirsGuard::new();

        for artifact in artifacts {
            let architecture = effective_architecture(artifact, default_ndk_architecture);

            makefile.push('\n');
            makefile.push_str(&format!("ifeq ($(TARGET_ARCH_ABI),{})\n", architecture));

            makefile.push_str("#\n");
            makefile.push_str(&format!("# Group ID: {}\n", artifact.group_id()));
            makefile.push_str(&format!("# Artifact ID: {}\n", artifact.artifact_id()));
            makefile.push_str(&format!("# Artifact Type: {}\n", artifact.artifact_type()));
            makefile.push_str(&format!("# Version: {}\n", artifact.version()));
            makefile.push_str("include $(CLEAR_VARS)\n");
            makefile.push_str(&format!("LOCAL_MODULE    := {}\n", artifact.artifact_id()));

            let bundle_static =
                self.add_library_details(&mut makefile, artifact, ndk_architecture)?;

            if use_header_archives {
                let include_dir =
                    self.extract_header_archive(artifact, ndk_architecture, &mut include_dirs)?;
                makefile.push_str(&format!(
                    "LOCAL_EXPORT_C_INCLUDES := {}\n",
                    include_dir.display()
                ));
            }

            if artifact.artifact_type() == ArtifactType::NativeStaticArchive || bundle_static {
                makefile.push_str("include $(PREBUILT_STATIC_LIBRARY)\n");
            } else {
                makefile.push_str("include $(PREBUILT_SHARED_LIBRARY)\n");
            }

            makefile.push_str(&format!(
                "endif #{}\n",
                artifact.classifier().unwrap_or(&architecture)
            ));
            makefile.push('\n');
        }

        Ok(MakefileHolder::new(makefile, include_dirs.keep()))
    }

    /// Emit the library detail block(s) for an artifact.
    ///
    /// Returns whether a bundle resolved to a static library.
    fn add_library_details(
        &self,
        makefile: &mut String,
        artifact: &Artifact,
        ndk_architecture: &str,
    ) -> Result<bool, MakefileError> {
        if artifact.is_bundle() {
            let architecture = artifact.classifier().unwrap_or(ndk_architecture);
            let library = resolve_bundle_library(
                self.classifier,
                self.selector,
                artifact,
                &self.unpack_dir,
                architecture,
            )?;

            let details = LibraryDetails::new(&library.file, None).ok_or_else(|| {
                MakefileError::Resolution {
                    artifact: artifact.id(),
                    reason: format!("invalid library path {}", library.file.display()),
                }
            })?;
            details.write_to(makefile);

            return Ok(library.is_static);
        }

        let file = artifact.file().ok_or_else(|| MakefileError::Resolution {
            artifact: artifact.id(),
            reason: "artifact has no resolved file".to_string(),
        })?;
        let details = LibraryDetails::new(file, Some(artifact.artifact_id())).ok_or_else(|| {
            MakefileError::Resolution {
                artifact: artifact.id(),
                reason: format!("invalid library path {}", file.display()),
            }
        })?;
        details.write_to(makefile);

        Ok(false)
    }

    /// Resolve and extract an artifact's header archive into a fresh
    /// directory owned by `include_dirs`.
    fn extract_header_archive(
        &self,
        artifact: &Artifact,
        ndk_architecture: &str,
        include_dirs: &mut IncludeDirsGuard,
    ) -> Result<PathBuf, MakefileError> {
        let har_artifact = artifact.header_archive(ndk_architecture);

        let har_file = self
            .resolver
            .resolve_to_file(&har_artifact)
            .map_err(|e| MakefileError::Resolution {
                artifact: artifact.artifact_id().to_string(),
                reason: format!("error while resolving header archive: {}", e),
            })?;
        tracing::debug!("Resolved header archive file: {}", har_file.display());

        let include_dir = self
            .create_include_dir(har_artifact.artifact_id())
            .map_err(|source| MakefileError::Extraction {
                archive: har_file.clone(),
                source,
            })?;
        include_dirs.push(include_dir.clone());

        self.extractor.extract(&har_file, &include_dir, &|name: &str| {
            !name.starts_with("META-INF")
        })?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            let includes: Vec<String> = WalkDir::new(&include_dir)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| e.path().display().to_string())
                .collect();
            tracing::debug!(
                "Listing LOCAL_EXPORT_C_INCLUDES for {}: {:?}",
                artifact,
                includes
            );
        }

        Ok(include_dir)
    }

    fn create_include_dir(&self, artifact_id: &str) -> std::io::Result<PathBuf> {
        let root = absolute_path(&self.include_root);
        std::fs::create_dir_all(&root)?;

        let dir = tempfile::Builder::new()
            .prefix(INCLUDE_DIR_PREFIX)
            .suffix(&format!("_{}", artifact_id))
            .tempdir_in(&root)?;

        Ok(dir.keep())
    }
}
