//! Loading one snapshot: four independent parses joined before returning

use crate::format::DumpFiles;
use crate::lists::{parse_delnodes, parse_merged};
use crate::names::parse_names;
use crate::nodes::{derive_lineages, parse_nodes};
use std::thread::ScopedJoinHandle;
use std::time::Instant;
use taxlog_core::{Snapshot, TaxlogError, TaxlogResult};

/// Parse the four dump files of a snapshot concurrently.
///
/// Each file is parsed on its own scoped thread. All four are joined before
/// returning; the first failure (in file order) is reported.
pub fn load_snapshot(files: &DumpFiles, name_class: &str) -> TaxlogResult<Snapshot> {
    let start = Instant::now();

    let (nodes, names, deleted, merges) = std::thread::scope(|s| {
        let nodes = s.spawn(|| -> TaxlogResult<_> {
            let table = parse_nodes(&files.nodes)?;
            let lineages = derive_lineages(&table.parents)?;
            Ok((lineages, table.ranks))
        });
        let names = s.spawn(|| parse_names(&files.names, name_class));
        let deleted = s.spawn(|| parse_delnodes(&files.delnodes));
        let merges = s.spawn(|| parse_merged(&files.merged));

        (
            join_loader(nodes, "nodes"),
            join_loader(names, "names"),
            join_loader(deleted, "delnodes"),
            join_loader(merges, "merged"),
        )
    });

    let (lineages, ranks) = nodes?;
    let snapshot = Snapshot {
        lineages,
        ranks,
        names: names?,
        deleted: deleted?,
        merges: merges?,
    };

    tracing::debug!(
        live = snapshot.lineages.len(),
        names = snapshot.names.len(),
        deleted = snapshot.deleted.len(),
        merges = snapshot.merges.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "snapshot tables loaded"
    );

    Ok(snapshot)
}

fn join_loader<T>(
    handle: ScopedJoinHandle<'_, TaxlogResult<T>>,
    what: &str,
) -> TaxlogResult<T> {
    handle
        .join()
        .map_err(|_| TaxlogError::Other(format!("{} loader thread panicked", what)))?
}
