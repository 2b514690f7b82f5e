//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// prebuilt-mk - Declare prebuilt native dependencies as ndk-build modules
#[derive(Parser)]
#[command(name = "prebuilt-mk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an Android.mk declaring every dependency as a prebuilt module
    Generate(GenerateArgs),

    /// Print the module names to put in LOCAL_STATIC_LIBRARIES or LOCAL_SHARED_LIBRARIES
    Libs(LibsArgs),

    /// Show the variables ndk-build wrote to a capture file
    Captured(CapturedArgs),

    /// Remove header include directories left by `generate`
    Clean(CleanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Path to NativeDeps.toml (defaults to searching upward from cwd)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Write the makefile here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Target NDK architecture
    #[arg(long, env = "PREBUILT_MK_ARCH")]
    pub arch: Option<String>,

    /// Architecture for dependencies whose classifier names none
    #[arg(long)]
    pub default_arch: Option<String>,

    /// Export header archives through LOCAL_EXPORT_C_INCLUDES
    #[arg(long)]
    pub export_headers: bool,

    /// Directory apklib/aar dependencies were unpacked into
    #[arg(long)]
    pub unpack_dir: Option<PathBuf>,

    /// Maven-layout repository to search (repeatable)
    #[arg(long = "repository")]
    pub repositories: Vec<PathBuf>,

    /// Directory to create header include directories in
    #[arg(long)]
    pub include_root: Option<PathBuf>,

    /// Remove header include directories once the makefile is written
    #[arg(long)]
    pub remove_include_dirs: bool,
}

#[derive(Args)]
pub struct LibsArgs {
    /// Path to NativeDeps.toml (defaults to searching upward from cwd)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Target NDK architecture
    #[arg(long, env = "PREBUILT_MK_ARCH")]
    pub arch: Option<String>,

    /// Directory apklib/aar dependencies were unpacked into
    #[arg(long)]
    pub unpack_dir: Option<PathBuf>,

    /// List static libraries instead of shared ones
    #[arg(long = "static")]
    pub static_libs: bool,
}

#[derive(Args)]
pub struct CapturedArgs {
    /// Capture file written by the generated makefile's preamble
    pub file: PathBuf,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Directory the include directories were created in
    #[arg(long)]
    pub include_root: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
