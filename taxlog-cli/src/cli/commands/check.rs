use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use taxlog_core::Config;
use taxlog_dump::{DumpArchive, DumpFile};

use crate::cli::output::success;

#[derive(Args)]
pub struct CheckArgs {
    /// Directory holding one sub-directory of dump files per snapshot
    #[arg(short = 'i', long = "archive", value_name = "DIR")]
    pub archive: PathBuf,
}

/// List every snapshot with the file variant that will be read. Discovery
/// already fails when any snapshot lacks one of the four files.
pub fn run(args: CheckArgs, config: Config, quiet: bool) -> Result<()> {
    let archive = DumpArchive::discover(&args.archive, &config.archive)?;

    for snapshot in archive.snapshots() {
        let files: Vec<String> = snapshot.files.iter().map(file_name).collect();
        println!("{}\t{}", snapshot.label, files.join("\t"));
    }

    if !quiet {
        success(&format!(
            "{} snapshots OK in {}",
            archive.snapshots().len(),
            archive.root().display()
        ));
    }

    Ok(())
}

fn file_name(file: &DumpFile) -> String {
    file.path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}
