//! Implementation of `prebuilt-mk generate` and `prebuilt-mk libs`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use indexmap::IndexSet;

use crate::core::{Artifact, DependencyManifest};
use crate::makefile::{cleanup_after_build, LibraryListBuilder, MakefileError, MakefileGenerator};
use crate::sources::{
    ArtifactResolver, HeaderArchiveExtractor, LocalRepository, UnpackedBundleClassifier,
};
use crate::util::fs::write_string;

/// Options for generating a makefile.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Dependency manifest (NativeDeps.toml)
    pub manifest_path: PathBuf,

    /// Where to write the makefile (None = only return it)
    pub output: Option<PathBuf>,

    /// Target architecture
    pub ndk_architecture: String,

    /// Architecture for artifacts whose classifier names none
    pub default_ndk_architecture: String,

    /// Export header archives through LOCAL_EXPORT_C_INCLUDES
    pub export_headers: bool,

    /// Directory bundle packages were unpacked into
    pub unpack_dir: PathBuf,

    /// Maven-layout repositories (empty = ~/.m2/repository)
    pub repositories: Vec<PathBuf>,

    /// Parent of the include directories (None = system temp directory)
    pub include_root: Option<PathBuf>,

    /// Remove include directories right after writing the makefile
    pub remove_include_dirs: bool,
}

/// Outcome of [`generate_makefile`].
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// The makefile text
    pub makefile: String,

    /// Number of prebuilt modules declared
    pub modules: usize,

    /// Include directories left on disk for ndk-build
    pub include_directories: Vec<PathBuf>,

    /// Include directories that were created and removed again
    pub removed_include_directories: usize,
}

/// Options for listing the modules a makefile links with.
#[derive(Debug, Clone)]
pub struct LibraryListOptions {
    /// Dependency manifest (NativeDeps.toml)
    pub manifest_path: PathBuf,

    /// Target architecture
    pub ndk_architecture: String,

    /// Directory bundle packages were unpacked into
    pub unpack_dir: PathBuf,

    /// List static libraries instead of shared ones
    pub want_static: bool,
}

/// Generate the makefile for every dependency in the manifest.
pub fn generate_makefile(opts: &GenerateOptions) -> Result<GenerateResult> {
    let manifest = DependencyManifest::load(&opts.manifest_path)?;
    tracing::debug!(
        "Loaded {} dependencies from {}",
        manifest.artifacts().len(),
        opts.manifest_path.display()
    );

    let resolver = repository(&opts.repositories);
    let artifacts = resolve_library_files(manifest.artifacts(), &resolver)?;

    let classifier = UnpackedBundleClassifier;
    let extractor = HeaderArchiveExtractor;
    let mut generator =
        MakefileGenerator::new(&resolver, &classifier, &extractor, &opts.unpack_dir);
    if let Some(root) = &opts.include_root {
        generator = generator.include_root(root);
    }

    let holder = generator.create_makefile(
        &artifacts,
        &opts.ndk_architecture,
        &opts.default_ndk_architecture,
        opts.export_headers,
    )?;

    let written = match &opts.output {
        Some(path) => write_string(path, holder.makefile()),
        None => Ok(()),
    };

    let created = holder.include_directories().len();
    let kept = if opts.remove_include_dirs || written.is_err() {
        cleanup_after_build(&holder);
        Vec::new()
    } else {
        holder.include_directories().to_vec()
    };
    written?;

    Ok(GenerateResult {
        removed_include_directories: created - kept.len(),
        include_directories: kept,
        modules: artifacts.len(),
        makefile: holder.makefile().to_string(),
    })
}

/// Space separated names of the dependencies providing a static or shared
/// library for the target architecture.
pub fn library_list(opts: &LibraryListOptions) -> Result<String> {
    let manifest = DependencyManifest::load(&opts.manifest_path)?;

    let classifier = UnpackedBundleClassifier;
    let builder = LibraryListBuilder::new(&classifier, &opts.unpack_dir);

    Ok(builder.build(
        manifest.artifacts(),
        &opts.ndk_architecture,
        opts.want_static,
    ))
}

fn repository(roots: &[PathBuf]) -> LocalRepository {
    if roots.is_empty() {
        LocalRepository::user_default().unwrap_or_default()
    } else {
        LocalRepository::new(roots.iter().cloned())
    }
}

/// Attach a file to every non-bundle artifact that declared none.
///
/// Bundles are read from the unpack directory instead.
fn resolve_library_files(
    artifacts: &IndexSet<Artifact>,
    resolver: &dyn ArtifactResolver,
) -> Result<IndexSet<Artifact>, MakefileError> {
    artifacts
        .iter()
        .map(|artifact| {
            if artifact.is_bundle() || artifact.file().is_some_and(Path::is_file) {
                return Ok(artifact.clone());
            }
            let file = resolver.resolve_to_file(artifact)?;
            tracing::debug!("Resolved {} to {}", artifact, file.display());
            Ok(artifact.clone().with_file(file))
        })
        .collect()
}
