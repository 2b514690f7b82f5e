//! Command implementations

pub mod captured;
pub mod clean;
pub mod completions;
pub mod generate;
pub mod libs;
