use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;
use taxlog_core::{ChangeKind, Config, SnapshotProvider};
use taxlog_dump::DumpArchive;
use taxlog_history::output::describe;
use taxlog_history::{ChangeSummary, ChangelogBuilder, ChangelogEmitter, OutputSink};

use crate::cli::output::{format_number, info, section_header, success, tree_item};
use crate::cli::progress::create_progress_bar;

#[derive(Args)]
pub struct ChangelogArgs {
    /// Directory holding one sub-directory of dump files per snapshot
    #[arg(short = 'i', long = "archive", value_name = "DIR")]
    pub archive: PathBuf,

    /// Output file ("-" for stdout, ".gz" suffix for gzip)
    #[arg(short = 'o', long = "out-file", value_name = "FILE")]
    pub out_file: Option<PathBuf>,

    /// Field delimiter [default: from config, ","]
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<char>,
}

pub fn run(args: ChangelogArgs, mut config: Config, quiet: bool) -> Result<()> {
    let start = Instant::now();

    if let Some(delimiter) = args.delimiter {
        config.output.delimiter = delimiter;
    }
    let delimiter = config.output.delimiter_byte()?;

    let archive = DumpArchive::discover(&args.archive, &config.archive)?;
    if !quiet {
        info(&format!(
            "{} snapshots in {}",
            archive.len(),
            archive.root().display()
        ));
    }

    let pb = create_progress_bar(archive.len() as u64, "folding snapshots", quiet);
    let built = ChangelogBuilder::build_from_with_progress(&archive, |_, label| {
        pb.set_message(label.to_string());
        pb.inc(1);
    });
    pb.finish_and_clear();
    let changelog = built?;

    // Output is only created once every snapshot has been folded
    let mut sink = OutputSink::open(args.out_file.as_deref())?;
    let rows = ChangelogEmitter::new(&changelog)
        .with_delimiter(delimiter)
        .write(&mut sink)?;
    sink.finish()?;

    let summary = changelog.summary();
    tracing::info!(
        rows,
        taxa = summary.taxa,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "changelog written to {}",
        describe(args.out_file.as_ref())
    );

    if !quiet {
        print_summary(&summary);
        success(&format!(
            "{} rows written to {}",
            format_number(rows),
            describe(args.out_file.as_ref())
        ));
    }

    Ok(())
}

fn print_summary(summary: &ChangeSummary) {
    section_header(&format!(
        "{} events for {} taxids across {} snapshots",
        format_number(summary.events),
        format_number(summary.taxa),
        summary.snapshots
    ));

    let kinds: Vec<ChangeKind> = ChangeKind::ALL
        .into_iter()
        .filter(|&kind| summary.count(kind) > 0)
        .collect();
    for (i, kind) in kinds.iter().enumerate() {
        tree_item(
            i + 1 == kinds.len(),
            kind.as_str(),
            Some(&format_number(summary.count(*kind))),
        );
    }
}
