//! Collaborators the makefile generator consumes.
//!
//! Each concern is a trait with filesystem-backed implementations:
//! resolving coordinates to files, listing binaries inside unpacked bundles,
//! and extracting header archives.

pub mod classifier;
pub mod extract;
pub mod resolver;

pub use classifier::{NativeArtifactClassifier, UnpackedBundleClassifier};
pub use extract::{ArchiveExtractor, HeaderArchiveExtractor, TarExtractor, ZipExtractor};
pub use resolver::{ArtifactResolver, LocalRepository};
