//! `prebuilt-mk libs` command

use anyhow::Result;

use crate::cli::LibsArgs;
use crate::commands::generate::DEFAULT_UNPACK_DIR;
use prebuilt_mk::ops::{library_list, LibraryListOptions};
use prebuilt_mk::util::GlobalContext;

pub fn execute(args: LibsArgs, ctx: &GlobalContext) -> Result<()> {
    let manifest_path = ctx.find_manifest(args.manifest.as_deref())?;
    let project_root = manifest_path.parent().unwrap_or(ctx.cwd()).to_path_buf();
    let config = ctx.load_config(&project_root);

    let unpack_dir = args
        .unpack_dir
        .as_deref()
        .map(|dir| ctx.resolve_path(dir))
        .or_else(|| config.ndk.unpack_dir.clone())
        .unwrap_or_else(|| project_root.join(DEFAULT_UNPACK_DIR));

    let list = library_list(&LibraryListOptions {
        manifest_path,
        ndk_architecture: args
            .arch
            .unwrap_or_else(|| config.architecture().to_string()),
        unpack_dir,
        want_static: args.static_libs,
    })?;

    println!("{}", list);

    Ok(())
}
