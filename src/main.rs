//! downgrade-build CLI
//!
//! Command-line interface for building an npm project against the minimum
//! versions its dependency ranges allow.

use anyhow::Result;
use clap::Parser;

use downgrade_build::cli::{commands, Cli, Commands};
use downgrade_build::runner::ReentrancyGuard;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // The re-entrancy state is captured once here and handed down, never
    // consulted ambiently from inside the pipeline.
    let guard = ReentrancyGuard::from_env();

    // Parse command line arguments
    let cli = Cli::parse();

    // Execute the command
    match cli.command {
        Commands::Run { args, keep } => {
            commands::run::execute(cli.dir, args, keep, cli.quiet, cli.no_progress, &guard)
        }
        Commands::List { json } => commands::list::execute(cli.dir, json),
        Commands::Manifest => commands::manifest::execute(cli.dir),
        Commands::Completion { shell } => commands::completion::execute(shell),
    }
}
