//! prebuilt-mk CLI - Android.mk generation for prebuilt native dependencies

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use prebuilt_mk::util::diagnostic::emit;
use prebuilt_mk::util::GlobalContext;
use prebuilt_mk::MakefileError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    // Parse CLI
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli, color) {
        match e.downcast_ref::<MakefileError>() {
            Some(err) => emit(&err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, color: bool) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("prebuilt_mk=debug")
    } else {
        EnvFilter::new("prebuilt_mk=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let mut ctx = GlobalContext::new()?;
    ctx.set_color(color);

    // Execute command
    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, &ctx),
        Commands::Libs(args) => commands::libs::execute(args, &ctx),
        Commands::Captured(args) => commands::captured::execute(args),
        Commands::Clean(args) => commands::clean::execute(args, &ctx),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
