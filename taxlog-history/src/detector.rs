//! Event Detector: classifies what one snapshot did to every taxid it
//! mentions, reading and extending the History Store and Merge Ledger.

use crate::event::{ChangeEvent, ChangeValue};
use crate::lineage::LineageRef;
use crate::store::{HistoryStore, MergeLedger};
use crate::tables::SnapshotTables;
use std::collections::HashMap;
use taxlog_core::{ChangeKind, MergePair, SnapshotIndex, TaxonId};

/// Counters for one folded snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectionStats {
    pub live_events: usize,
    pub delete_events: usize,
    pub merge_events: usize,
    /// Merge pairs restating a mapping already in the ledger
    pub restated_merges: usize,
    /// Absorbed ids folded into an ABSORB event of the same snapshot
    pub coalesced_absorbs: usize,
}

/// Detection state for the snapshot at `current`.
///
/// The snapshot's name and rank tables must already be pushed into
/// `tables` at `current`.
pub struct EventDetector<'a> {
    store: &'a mut HistoryStore,
    ledger: &'a mut MergeLedger,
    tables: &'a SnapshotTables,
    current: SnapshotIndex,
    /// Lineages of this snapshot already stored in the arena
    interned: HashMap<TaxonId, LineageRef>,
    stats: DetectionStats,
}

impl<'a> EventDetector<'a> {
    pub fn new(
        store: &'a mut HistoryStore,
        ledger: &'a mut MergeLedger,
        tables: &'a SnapshotTables,
        current: SnapshotIndex,
    ) -> Self {
        Self {
            store,
            ledger,
            tables,
            current,
            interned: HashMap::new(),
            stats: DetectionStats::default(),
        }
    }

    /// Fold the live lineage table, then the deleted ids, then the merge
    /// pairs. The phases run in this order so deletions and merges see the
    /// events the live table produced.
    pub fn apply(
        mut self,
        lineages: &HashMap<TaxonId, Vec<TaxonId>>,
        deleted: &[TaxonId],
        merges: &[MergePair],
    ) -> DetectionStats {
        tracing::debug!("  checking newly added and lineage-changed taxids");
        self.detect_live(lineages);

        tracing::debug!("  checking deleted taxids");
        self.detect_deleted(deleted);

        tracing::debug!("  checking merged taxids");
        self.detect_merges(merges, lineages);

        self.stats
    }

    fn detect_live(&mut self, lineages: &HashMap<TaxonId, Vec<TaxonId>>) {
        for (&taxid, lineage) in lineages {
            let kinds = self.classify_live(taxid, lineage);
            if kinds.is_empty() {
                continue;
            }

            let lineage = self.lineage_ref(taxid, lineage);
            for kind in kinds {
                self.store
                    .append(taxid, ChangeEvent::current(self.current, kind, Some(lineage)));
                self.stats.live_events += 1;
            }
        }
    }

    /// Events a live taxid earns in this snapshot. NEW and the two reuse
    /// kinds stand alone; otherwise lineage, name and rank changes are
    /// checked independently.
    fn classify_live(&self, taxid: TaxonId, lineage: &[TaxonId]) -> Vec<ChangeKind> {
        let previous = match self.store.last_event(taxid) {
            None => return vec![ChangeKind::New],
            Some(previous) => previous,
        };

        match previous.kind {
            ChangeKind::Delete => return vec![ChangeKind::ReuseDeleted],
            ChangeKind::Merge => return vec![ChangeKind::ReuseMerged],
            _ => {}
        }

        // Last state was a placeholder without data: a merged id went
        // independent again
        let previous_data = match previous.data_snapshot {
            None => return vec![ChangeKind::ReuseMerged],
            Some(index) => index,
        };

        let mut kinds = Vec::new();

        let previous_lineage = previous.lineage.map(|r| self.store.lineage(r));
        if let Some(kind) = self.lineage_change(previous_lineage, previous_data, lineage) {
            kinds.push(kind);
        }

        if self.tables.name(previous_data, taxid) != self.tables.name(self.current, taxid) {
            kinds.push(ChangeKind::NameChanged);
        }
        if self.tables.rank(previous_data, taxid) != self.tables.rank(self.current, taxid) {
            kinds.push(ChangeKind::RankChanged);
        }

        kinds
    }

    /// Compare the recorded lineage (named as of `previous_data`) with the
    /// current one. Length beats taxid differences, which beat renames.
    fn lineage_change(
        &self,
        previous: Option<&[TaxonId]>,
        previous_data: SnapshotIndex,
        current: &[TaxonId],
    ) -> Option<ChangeKind> {
        let previous = match previous {
            None => return Some(ChangeKind::LineageLengthChanged),
            Some(previous) => previous,
        };

        if previous.len() != current.len() {
            return Some(ChangeKind::LineageLengthChanged);
        }
        if previous != current {
            return Some(ChangeKind::LineageTaxaChanged);
        }

        let renamed = current.iter().any(|&ancestor| {
            self.tables.name(previous_data, ancestor) != self.tables.name(self.current, ancestor)
        });
        renamed.then_some(ChangeKind::LineageRenamed)
    }

    fn detect_deleted(&mut self, deleted: &[TaxonId]) {
        for &taxid in deleted {
            let event = match self.store.last_event(taxid) {
                None => ChangeEvent::placeholder(self.current, ChangeKind::Delete),
                // deletion is idempotent across snapshots
                Some(previous) if previous.kind == ChangeKind::Delete => continue,
                Some(previous) => {
                    ChangeEvent::carried_from(self.current, ChangeKind::Delete, previous)
                }
            };
            self.store.append(taxid, event);
            self.stats.delete_events += 1;
        }
    }

    fn detect_merges(&mut self, merges: &[MergePair], lineages: &HashMap<TaxonId, Vec<TaxonId>>) {
        for &MergePair { from, to } in merges {
            if !self.ledger.record(from, to) {
                self.stats.restated_merges += 1;
                continue;
            }

            // The merged id has no data of its own from now on
            let merged = match self.store.last_event(from) {
                None => ChangeEvent::placeholder(self.current, ChangeKind::Merge),
                Some(previous) => {
                    ChangeEvent::carried_from(self.current, ChangeKind::Merge, previous)
                }
            };
            self.store
                .append(from, merged.with_value(ChangeValue::MergedInto(to)));
            self.stats.merge_events += 1;

            self.record_absorb(to, from, lineages);
        }
    }

    fn record_absorb(
        &mut self,
        to: TaxonId,
        from: TaxonId,
        lineages: &HashMap<TaxonId, Vec<TaxonId>>,
    ) {
        let current = self.current;

        if let Some(previous) = self.store.last_event_mut(to) {
            if previous.kind == ChangeKind::Absorb && previous.snapshot == current {
                if let ChangeValue::Absorbed(ids) = &mut previous.value {
                    ids.push(from);
                    self.stats.coalesced_absorbs += 1;
                    return;
                }
            }
        }

        let event = if self.store.contains(to) {
            let lineage = lineages.get(&to).map(|l| self.lineage_ref(to, l));
            ChangeEvent::current(current, ChangeKind::Absorb, lineage)
        } else {
            // `to` was never seen: keep a placeholder rather than drop the merge
            tracing::debug!("merge target {} has no history, recording placeholder", to);
            ChangeEvent::placeholder(current, ChangeKind::Absorb)
        };
        self.store
            .append(to, event.with_value(ChangeValue::Absorbed(vec![from])));
    }

    fn lineage_ref(&mut self, taxid: TaxonId, lineage: &[TaxonId]) -> LineageRef {
        if let Some(&existing) = self.interned.get(&taxid) {
            return existing;
        }
        let lineage = self.store.intern_lineage(lineage);
        self.interned.insert(taxid, lineage);
        lineage
    }
}
