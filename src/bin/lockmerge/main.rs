//! lockmerge CLI - pnpm lockfile aggregation for monorepo builds

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use lockmerge::util::diagnostic::emit;
use lockmerge::PackageManagerError;

fn main() {
    let cli = Cli::parse();
    let color = !cli.global.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<PackageManagerError>() {
            Some(pm_err) => {
                let mut diag = pm_err.to_diagnostic();
                // Keep context added on the way up, e.g. the pnpm debug log.
                let outer = e.to_string();
                if outer != pm_err.to_string() {
                    diag = diag.with_context(outer);
                }
                emit(&diag, color);
            }
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.global.verbose {
        EnvFilter::new("lockmerge=debug")
    } else {
        EnvFilter::new("lockmerge=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Prepare => commands::prepare::execute(&cli.global),
        Commands::Inouts(args) => commands::inouts::execute(args, &cli.global),
        Commands::Extract(args) => commands::extract::execute(args, &cli.global),
        Commands::Install(args) => commands::install::execute(args, &cli.global),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
