pub mod commands;
pub mod output;
pub mod progress;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "taxlog",
    version,
    about = "Track taxid changes across NCBI taxonomy dump archives",
    long_about = "Taxlog folds a directory of dated NCBI taxonomy dump snapshots into a \
                  per-taxid changelog: when each taxid appeared, was deleted, merged, \
                  reused, renamed, re-ranked or moved in the tree."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Hide progress bars and summaries
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Number of threads to use (0 = all available) [default: from config]
    #[arg(short = 'j', long, global = true)]
    pub threads: Option<usize>,

    /// Configuration file (defaults to $TAXLOG_HOME/config.toml when present)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the taxid changelog of a dump archive
    Changelog(commands::changelog::ChangelogArgs),

    /// Validate a dump archive and list its snapshots
    Check(commands::check::CheckArgs),
}
