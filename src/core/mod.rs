//! Core data structures.
//!
//! - Artifacts and their packaging types
//! - NDK architecture selection
//! - The dependency manifest

pub mod abi;
pub mod artifact;
pub mod manifest;

pub use abi::{effective_architecture, NDK_ARCHITECTURES};
pub use artifact::{Artifact, ArtifactType};
pub use manifest::{find_manifest, DependencyManifest, MANIFEST_NAME};
