//! `prebuilt-mk captured` command

use anyhow::Result;

use crate::cli::CapturedArgs;
use prebuilt_mk::makefile::CapturedVariables;

pub fn execute(args: CapturedArgs) -> Result<()> {
    let vars = CapturedVariables::load(&args.file)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&vars)?);
        return Ok(());
    }

    println!("LOCAL_MODULE:          {}", vars.module);
    println!("LOCAL_MODULE_FILENAME: {}", vars.module_filename);
    println!("LOCAL_PATH:            {}", vars.local_path);

    println!("LOCAL_C_INCLUDES:");
    for path in vars.include_paths() {
        println!("  {}", path);
    }

    println!("LOCAL_CFLAGS:");
    for flag in vars.compiler_flags() {
        println!("  {}", flag);
    }

    for (key, value) in &vars.extra {
        println!("{}: {}", key, value);
    }

    Ok(())
}
