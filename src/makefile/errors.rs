//! Makefile generation error types and diagnostics.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Why a bundle's candidate libraries could not be narrowed to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ambiguity {
    /// More than one candidate starts with `lib<artifact id>`.
    MultipleMatches,
    /// No candidate starts with `lib<artifact id>`.
    NoMatch,
}

impl fmt::Display for Ambiguity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ambiguity::MultipleMatches => write!(f, "several libraries match the artifact name"),
            Ambiguity::NoMatch => write!(f, "no library matches the artifact name"),
        }
    }
}

/// Error while generating a makefile or a library list.
#[derive(Debug, Error)]
pub enum MakefileError {
    #[error("failed to resolve `{artifact}`: {reason}")]
    Resolution { artifact: String, reason: String },

    #[error("cannot pick a library for `{artifact}` from {}: {kind}", .candidates.join(", "))]
    AmbiguousLibrary {
        artifact: String,
        candidates: Vec<String>,
        kind: Ambiguity,
    },

    #[error("no native library found in bundle `{artifact}` for architecture `{architecture}`")]
    MissingLibrary {
        artifact: String,
        architecture: String,
    },

    #[error("failed to extract `{}`", .archive.display())]
    Extraction {
        archive: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MakefileError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            MakefileError::Resolution { artifact, reason } => {
                Diagnostic::error(format!("could not resolve `{}`", artifact))
                    .with_context(reason.clone())
                    .with_suggestion("Check that the artifact was built and installed upstream")
                    .with_suggestion("Add the repository holding it to `[repository] roots`")
            }

            MakefileError::AmbiguousLibrary {
                artifact,
                candidates,
                kind,
            } => {
                let mut diag = Diagnostic::error(format!(
                    "cannot determine the main library of `{}`",
                    artifact
                ))
                .with_context(format!("candidates: {}", candidates.join(", ")))
                .with_context(kind.to_string());

                diag = match kind {
                    Ambiguity::MultipleMatches => diag.with_suggestion(
                        "Use unique artifact and library names so only one library starts with \
                         `lib<artifact>`",
                    ),
                    Ambiguity::NoMatch => diag.with_suggestion(
                        "The bundle should contain only 1 library or a library matching the \
                         artifact name",
                    ),
                };

                diag
            }

            MakefileError::MissingLibrary {
                artifact,
                architecture,
            } => Diagnostic::error(format!("bundle `{}` contains no native library", artifact))
                .with_context(format!("looked for lib*.a and lib*.so for `{}`", architecture))
                .with_suggestion(suggestions::UNPACK_BUNDLES)
                .with_suggestion("Check that the bundle ships binaries for this architecture"),

            MakefileError::Extraction { archive, source } => {
                Diagnostic::error(format!("failed to extract {}", archive.display()))
                    .with_context(source.to_string())
                    .with_location(archive.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_message_lists_candidates() {
        let err = MakefileError::AmbiguousLibrary {
            artifact: "Foo".to_string(),
            candidates: vec!["libFoo.so".to_string(), "libFoo2.so".to_string()],
            kind: Ambiguity::MultipleMatches,
        };

        let message = err.to_string();
        assert!(message.contains("libFoo.so, libFoo2.so"));
        assert!(message.contains("`Foo`"));
    }

    #[test]
    fn test_no_match_diagnostic() {
        let err = MakefileError::AmbiguousLibrary {
            artifact: "Foo".to_string(),
            candidates: vec!["libA.so".to_string(), "libB.so".to_string()],
            kind: Ambiguity::NoMatch,
        };

        let output = err.to_diagnostic().format(false);
        assert!(output.contains("cannot determine the main library"));
        assert!(output.contains("libA.so, libB.so"));
        assert!(output.contains("only 1 library"));
    }

    #[test]
    fn test_extraction_keeps_source() {
        use std::error::Error as _;

        let err = MakefileError::Extraction {
            archive: PathBuf::from("/repo/foo.har"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };

        assert!(err.source().is_some());
        assert!(err.to_diagnostic().format(false).contains("/repo/foo.har"));
    }
}
