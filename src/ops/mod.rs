//! High-level operations.
//!
//! This module contains the implementation of prebuilt-mk commands.

pub mod clean;
pub mod generate;

pub use clean::clean_include_dirs;
pub use generate::{
    generate_makefile, library_list, GenerateOptions, GenerateResult, LibraryListOptions,
};
