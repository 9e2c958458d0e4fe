//! proofstore CLI
//!
//! Command-line interface for uploading file sets and fetching single files
//! back with verified merkle inclusion proofs.

use anyhow::Result;
use clap::Parser;
use proofstore::cli::{commands, context::CliContext, Cli, Commands};
use proofstore::config::Config;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.store.data_dir = dir;
    }
    if let Some(dir) = cli.roots_dir {
        config.client.roots_dir = dir;
    }
    if let Some(dir) = cli.downloads_dir {
        config.client.downloads_dir = dir;
    }

    CliContext::set(CliContext {
        config,
        config_path: cli.config,
        verbose: cli.verbose,
        quiet: cli.quiet,
    });

    // Execute the command
    match cli.command {
        Commands::Upload { dir, json } => commands::upload::execute(dir, json),
        Commands::Get { key, index, json } => commands::get::execute(key, index, json),
        Commands::Prove { key, index, output } => commands::prove::execute(key, index, output),
        Commands::Verify {
            proof,
            file,
            root,
            json,
        } => commands::verify::execute(proof, file, root, json),
        Commands::Root { key } => commands::root::execute(key),
        Commands::Demo { dir } => commands::demo::execute(dir),
        Commands::Config { action } => commands::config::execute(action),
    }
}
