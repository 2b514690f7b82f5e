//! Android NDK makefile generation.
//!
//! [`MakefileGenerator`] turns a set of native artifacts into an
//! `Android.mk` declaring each one as a prebuilt module, and
//! [`LibraryListBuilder`] produces the module list a consuming makefile
//! links against.

pub mod capture;
pub mod errors;
pub mod generator;
pub mod holder;
pub mod library;
pub mod library_list;
pub mod preamble;

pub use capture::CapturedVariables;
pub use errors::{Ambiguity, MakefileError};
pub use generator::{MakefileGenerator, INCLUDE_DIR_PREFIX};
pub use holder::{cleanup_after_build, remove_include_dirs, IncludeDirsGuard, MakefileHolder};
pub use library::{select_bundle_library, BundleLibrary, LibraryDetails, LibrarySelector};
pub use library_list::LibraryListBuilder;
pub use preamble::MAKEFILE_CAPTURE_FILE;
