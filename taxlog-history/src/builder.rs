//! Sequential folding of snapshots into taxid histories

use crate::detector::{DetectionStats, EventDetector};
use crate::event::ChangeEvent;
use crate::store::{HistoryStore, MergeLedger};
use crate::summary::ChangeSummary;
use crate::tables::SnapshotTables;
use std::time::Instant;
use taxlog_core::{Snapshot, SnapshotIndex, SnapshotProvider, TaxlogError, TaxlogResult, TaxonId};

/// Owns the mutable state of a changelog run.
///
/// Snapshots must be ingested in chronological order: detection for a
/// snapshot reads the histories left by all earlier ones.
#[derive(Debug, Default)]
pub struct ChangelogBuilder {
    store: HistoryStore,
    ledger: MergeLedger,
    tables: SnapshotTables,
}

impl ChangelogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold every snapshot of `provider`, loading one at a time
    pub fn build_from<P: SnapshotProvider + ?Sized>(provider: &P) -> TaxlogResult<Changelog> {
        Self::build_from_with_progress(provider, |_, _| {})
    }

    /// Like [`build_from`](Self::build_from), calling `on_folded` with the
    /// index and label of each snapshot once it has been folded
    pub fn build_from_with_progress<P, F>(provider: &P, mut on_folded: F) -> TaxlogResult<Changelog>
    where
        P: SnapshotProvider + ?Sized,
        F: FnMut(usize, &str),
    {
        let mut builder = Self::new();
        let total = provider.len();

        for (i, label) in provider.labels().iter().enumerate() {
            tracing::info!("parsing archive ({:2} / {:2}): {}", i + 1, total, label);
            let snapshot = provider.load(SnapshotIndex::from(i))?;
            builder.ingest(label.clone(), snapshot)?;
            on_folded(i, label);
        }

        Ok(builder.finish())
    }

    /// Fold the next snapshot. Its label must sort after every label
    /// ingested so far.
    pub fn ingest(
        &mut self,
        label: impl Into<String>,
        snapshot: Snapshot,
    ) -> TaxlogResult<DetectionStats> {
        let label = label.into();
        if let Some(last) = self.tables.last_label() {
            if label.as_str() <= last {
                return Err(TaxlogError::InvalidInput(format!(
                    "snapshot '{}' does not sort after '{}'",
                    label, last
                )));
            }
        }

        let start = Instant::now();
        let live = snapshot.live_count();
        let Snapshot {
            lineages,
            ranks,
            names,
            deleted,
            merges,
        } = snapshot;

        let index = self.tables.push(label, names, ranks);
        let stats = EventDetector::new(&mut self.store, &mut self.ledger, &self.tables, index)
            .apply(&lineages, &deleted, &merges);

        tracing::debug!(
            snapshot = %self.tables.label(index),
            live,
            live_events = stats.live_events,
            delete_events = stats.delete_events,
            merge_events = stats.merge_events,
            restated_merges = stats.restated_merges,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "snapshot folded"
        );

        Ok(stats)
    }

    /// Stop ingesting and sort every history into emission order
    pub fn finish(self) -> Changelog {
        let mut store = self.store;
        tracing::info!(
            events = store.event_count(),
            lineages = store.lineage_count(),
            merged_taxids = self.ledger.len(),
            "sorting {} taxids",
            store.taxon_count()
        );
        store.sort_histories();

        Changelog {
            store,
            tables: self.tables,
        }
    }
}

/// Completed histories, sorted by (snapshot, kind), plus the snapshot
/// tables needed to render them
#[derive(Debug)]
pub struct Changelog {
    store: HistoryStore,
    tables: SnapshotTables,
}

impl Changelog {
    pub fn history(&self, taxid: TaxonId) -> Option<&[ChangeEvent]> {
        self.store.history(taxid)
    }

    pub fn taxids(&self) -> Vec<TaxonId> {
        self.store.taxids()
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    pub fn tables(&self) -> &SnapshotTables {
        &self.tables
    }

    pub fn summary(&self) -> ChangeSummary {
        ChangeSummary::from_changelog(self)
    }
}
