use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;

use crate::cli::{Cli, Commands};
use taxlog_core::TaxlogError;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins, then TAXLOG_LOG, then the level implied by -v
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("TAXLOG_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        let exit_code = match e.downcast_ref::<TaxlogError>() {
            Some(TaxlogError::Configuration(_)) => 2,
            Some(TaxlogError::Io(_)) => 3,
            Some(TaxlogError::Parse(_)) => 4,
            Some(TaxlogError::InvalidInput(_)) => 5,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = crate::cli::commands::resolve_config(cli.config.as_deref())?;

    // Flag beats config file; 0 means every core
    let num_threads = match cli.threads.unwrap_or(config.performance.threads) {
        0 => num_cpus::get(),
        n => n,
    };

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .map_err(|e| anyhow::anyhow!("Failed to initialize thread pool: {}", e))?;

    tracing::debug!("using {} threads", num_threads);

    match cli.command {
        Commands::Changelog(args) => crate::cli::commands::changelog::run(args, config, cli.quiet),
        Commands::Check(args) => crate::cli::commands::check::run(args, config, cli.quiet),
    }
}
