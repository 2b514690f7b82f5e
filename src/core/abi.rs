//! NDK architecture (ABI) selection.
//!
//! An artifact may declare its architecture through its classifier
//! (`armeabi-v7a`, `x86-debug`, ...). Otherwise the caller's default applies.

use crate::core::Artifact;

/// Architectures known to `ndk-build`.
pub const NDK_ARCHITECTURES: &[&str] = &[
    "armeabi",
    "armeabi-v7a",
    "arm64-v8a",
    "mips",
    "mips64",
    "x86",
    "x86_64",
];

/// Find the known architecture a classifier starts with.
///
/// The longest match wins so that `armeabi-v7a` is not read as `armeabi`
/// and `x86_64` is not read as `x86`.
pub fn architecture_from_classifier(classifier: &str) -> Option<&'static str> {
    NDK_ARCHITECTURES
        .iter()
        .copied()
        .filter(|arch| classifier.starts_with(arch))
        .max_by_key(|arch| arch.len())
}

/// The architecture an artifact's makefile block is conditioned on.
pub fn effective_architecture(artifact: &Artifact, default_architecture: &str) -> String {
    artifact
        .classifier()
        .and_then(architecture_from_classifier)
        .unwrap_or(default_architecture)
        .to_string()
}
