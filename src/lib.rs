//! prebuilt-mk - Android.mk generation for prebuilt native dependencies
//!
//! This crate declares prebuilt static and shared libraries, as well as the
//! native libraries inside apklib/aar bundles, as `ndk-build` modules. It can
//! export the headers shipped in companion header archives and list the
//! modules a consuming makefile links with.

pub mod core;
pub mod makefile;
pub mod ops;
pub mod sources;
pub mod util;

/// Test doubles and fixtures for prebuilt-mk unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests.
#[cfg(test)]
pub mod test_support;

pub use core::{Artifact, ArtifactType, DependencyManifest};
pub use makefile::{MakefileError, MakefileGenerator, MakefileHolder};
pub use util::context::GlobalContext;
