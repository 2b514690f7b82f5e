//! `prebuilt-mk clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use prebuilt_mk::ops::clean_include_dirs;
use prebuilt_mk::util::GlobalContext;

pub fn execute(args: CleanArgs, ctx: &GlobalContext) -> Result<()> {
    let include_root = match args.include_root.as_deref() {
        Some(dir) => ctx.resolve_path(dir),
        None => std::env::temp_dir(),
    };

    let dirs = clean_include_dirs(&include_root)?;
    for dir in &dirs {
        eprintln!("     Removed {}", dir.display());
    }
    if dirs.is_empty() {
        eprintln!("     Nothing to clean in {}", include_root.display());
    }

    Ok(())
}
