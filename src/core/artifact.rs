//! Artifact identification - WHICH native dependency (coordinates + packaging).
//!
//! An [`Artifact`] is a logical build dependency identified by its Maven-style
//! coordinates. The resolved file is carried alongside but does not take part
//! in identity.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Packaging type of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ArtifactType {
    /// Native shared object (`.so`)
    #[serde(rename = "so")]
    NativeSharedObject,

    /// Native static archive (`.a`)
    #[serde(rename = "a")]
    NativeStaticArchive,

    /// Archive holding only the public headers of a native library
    #[serde(rename = "har")]
    NativeHeaderArchive,

    /// Bundle package distributed with sources
    #[serde(rename = "apklib")]
    ApkLib,

    /// Compiled bundle package
    #[serde(rename = "aar")]
    Aar,
}

impl ArtifactType {
    /// The type string as it appears in coordinates and file extensions.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactType::NativeSharedObject => "so",
            ArtifactType::NativeStaticArchive => "a",
            ArtifactType::NativeHeaderArchive => "har",
            ArtifactType::ApkLib => "apklib",
            ArtifactType::Aar => "aar",
        }
    }

    /// Bundle packages may hold several native binaries and need
    /// unpack-then-select resolution.
    pub fn is_bundle(&self) -> bool {
        matches!(self, ArtifactType::ApkLib | ArtifactType::Aar)
    }
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "so" => Ok(ArtifactType::NativeSharedObject),
            "a" => Ok(ArtifactType::NativeStaticArchive),
            "har" => Ok(ArtifactType::NativeHeaderArchive),
            "apklib" => Ok(ArtifactType::ApkLib),
            "aar" => Ok(ArtifactType::Aar),
            other => Err(format!(
                "unknown artifact type `{}` (expected one of: so, a, har, apklib, aar)",
                other
            )),
        }
    }
}

/// A native build dependency.
#[derive(Clone)]
pub struct Artifact {
    group_id: String,
    artifact_id: String,
    version: String,
    classifier: Option<String>,
    artifact_type: ArtifactType,
    file: Option<PathBuf>,
}

impl Artifact {
    /// Create an unresolved artifact.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        artifact_type: ArtifactType,
    ) -> Self {
        Artifact {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            classifier: None,
            artifact_type,
            file: None,
        }
    }

    /// Set the classifier. Empty classifiers are treated as absent.
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        let classifier = classifier.into();
        self.classifier = if classifier.is_empty() {
            None
        } else {
            Some(classifier)
        };
        self
    }

    /// Attach the resolved file.
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    pub fn artifact_type(&self) -> ArtifactType {
        self.artifact_type
    }

    /// The resolved file, if resolution has happened.
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn is_bundle(&self) -> bool {
        self.artifact_type.is_bundle()
    }

    /// The companion header archive sharing these coordinates.
    ///
    /// Bundle packages can carry several architectures, so their header
    /// archive is looked up under `<architecture>[-<classifier>]`.
    pub fn header_archive(&self, architecture: &str) -> Artifact {
        let classifier = if self.is_bundle() {
            match &self.classifier {
                Some(c) => Some(format!("{}-{}", architecture, c)),
                None => Some(architecture.to_string()),
            }
        } else {
            self.classifier.clone()
        };

        Artifact {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
            version: self.version.clone(),
            classifier,
            artifact_type: ArtifactType::NativeHeaderArchive,
            file: None,
        }
    }

    /// Coordinate string `group:artifact:type[:classifier]:version`.
    pub fn id(&self) -> String {
        match &self.classifier {
            Some(c) => format!(
                "{}:{}:{}:{}:{}",
                self.group_id, self.artifact_id, self.artifact_type, c, self.version
            ),
            None => format!(
                "{}:{}:{}:{}",
                self.group_id, self.artifact_id, self.artifact_type, self.version
            ),
        }
    }

    fn identity(&self) -> (&str, &str, &str, Option<&str>, ArtifactType) {
        (
            &self.group_id,
            &self.artifact_id,
            &self.version,
            self.classifier.as_deref(),
            self.artifact_type,
        )
    }
}

impl PartialEq for Artifact {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Artifact {}

impl Hash for Artifact {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state)
    }
}

impl PartialOrd for Artifact {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Artifact {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl fmt::Debug for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Artifact")
            .field("id", &self.id())
            .field("file", &self.file)
            .finish()
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_ignores_file() {
        let a = Artifact::new("com.example", "foo", "1.0", ArtifactType::NativeSharedObject);
        let b = a.clone().with_file("/tmp/libfoo.so");

        assert_eq!(a, b);
    }

    #[test]
    fn test_identity_includes_classifier_and_type() {
        let a = Artifact::new("com.example", "foo", "1.0", ArtifactType::NativeSharedObject);
        let b = a.clone().with_classifier("x86");
        let c = Artifact::new("com.example", "foo", "1.0", ArtifactType::NativeStaticArchive);

        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_empty_classifier_is_absent() {
        let a = Artifact::new("g", "a", "1", ArtifactType::Aar).with_classifier("");
        assert_eq!(a.classifier(), None);
    }

    #[test]
    fn test_header_archive_for_bundle() {
        let apklib = Artifact::new("g", "foo", "1.0", ArtifactType::ApkLib);
        let har = apklib.header_archive("armeabi-v7a");
        assert_eq!(har.artifact_type(), ArtifactType::NativeHeaderArchive);
        assert_eq!(har.classifier(), Some("armeabi-v7a"));

        let aar = Artifact::new("g", "foo", "1.0", ArtifactType::Aar).with_classifier("debug");
        assert_eq!(aar.header_archive("x86").classifier(), Some("x86-debug"));
    }

    #[test]
    fn test_header_archive_for_native_keeps_classifier() {
        let so = Artifact::new("g", "foo", "1.0", ArtifactType::NativeSharedObject)
            .with_classifier("armeabi");
        let har = so.header_archive("x86");
        assert_eq!(har.classifier(), Some("armeabi"));
        assert_eq!(har.version(), "1.0");
        assert!(har.file().is_none());
    }

    #[test]
    fn test_type_parse() {
        assert_eq!("apklib".parse::<ArtifactType>().unwrap(), ArtifactType::ApkLib);
        assert_eq!("a".parse::<ArtifactType>().unwrap(), ArtifactType::NativeStaticArchive);
        assert!("jar".parse::<ArtifactType>().is_err());
    }

    #[test]
    fn test_id() {
        let a = Artifact::new("com.example", "foo", "1.0", ArtifactType::NativeSharedObject)
            .with_classifier("x86");
        assert_eq!(a.id(), "com.example:foo:so:x86:1.0");
        assert_eq!(a.to_string(), a.id());
    }
}
