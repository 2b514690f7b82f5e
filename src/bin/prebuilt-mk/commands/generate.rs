//! `prebuilt-mk generate` command

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cli::GenerateArgs;
use prebuilt_mk::ops::{generate_makefile, GenerateOptions};
use prebuilt_mk::util::diagnostic::{emit, suggestions, Diagnostic};
use prebuilt_mk::util::{Config, GlobalContext};

/// Default unpack directory, relative to the project root.
pub const DEFAULT_UNPACK_DIR: &str = "target/unpacked-libs";

pub fn execute(args: GenerateArgs, ctx: &GlobalContext) -> Result<()> {
    let manifest_path = ctx.find_manifest(args.manifest.as_deref())?;
    let project_root = manifest_path.parent().unwrap_or(ctx.cwd()).to_path_buf();
    let config = ctx.load_config(&project_root);

    let opts = options(&args, ctx, &config, &project_root, manifest_path);
    let result = generate_makefile(&opts)?;

    match &opts.output {
        Some(path) => eprintln!(
            "   Generated {} ({} modules)",
            path.display(),
            result.modules
        ),
        None => print!("{}", result.makefile),
    }

    for dir in &result.include_directories {
        tracing::info!("Keeping include directory {}", dir.display());
    }
    if !result.include_directories.is_empty() {
        tracing::info!("Run `prebuilt-mk clean` once ndk-build has finished");
    }

    if result.removed_include_directories > 0 {
        let diag = Diagnostic::warning("exported header directories were removed on exit")
            .with_context(format!(
                "{} directories referenced by LOCAL_EXPORT_C_INCLUDES no longer exist",
                result.removed_include_directories
            ))
            .with_suggestion(suggestions::KEEP_INCLUDES);
        emit(&diag, ctx.color());
    }

    Ok(())
}

/// Merge flags over configuration. Flags win.
fn options(
    args: &GenerateArgs,
    ctx: &GlobalContext,
    config: &Config,
    project_root: &Path,
    manifest_path: PathBuf,
) -> GenerateOptions {
    let ndk_architecture = args
        .arch
        .clone()
        .unwrap_or_else(|| config.architecture().to_string());
    let default_ndk_architecture = args
        .default_arch
        .clone()
        .or_else(|| config.ndk.default_architecture.clone())
        .unwrap_or_else(|| ndk_architecture.clone());

    let unpack_dir = args
        .unpack_dir
        .as_deref()
        .map(|dir| ctx.resolve_path(dir))
        .or_else(|| config.ndk.unpack_dir.clone())
        .unwrap_or_else(|| project_root.join(DEFAULT_UNPACK_DIR));

    let repositories = if args.repositories.is_empty() {
        config.repository.roots.clone()
    } else {
        args.repositories
            .iter()
            .map(|repo| ctx.resolve_path(repo))
            .collect()
    };

    GenerateOptions {
        manifest_path,
        output: args.output.as_deref().map(|out| ctx.resolve_path(out)),
        ndk_architecture,
        default_ndk_architecture,
        export_headers: args.export_headers || config.ndk.export_headers.unwrap_or(false),
        unpack_dir,
        repositories,
        include_root: args.include_root.as_deref().map(|dir| ctx.resolve_path(dir)),
        remove_include_dirs: args.remove_include_dirs,
    }
}
