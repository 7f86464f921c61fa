//! History Store and Merge Ledger

use crate::event::ChangeEvent;
use crate::lineage::{LineageArena, LineageRef};
use rayon::prelude::*;
use std::collections::HashMap;
use taxlog_core::TaxonId;

/// Per-taxid event histories.
///
/// Histories are append-only and entries are never removed, even once a
/// taxid is deleted or merged away.
#[derive(Debug, Default)]
pub struct HistoryStore {
    histories: HashMap<TaxonId, Vec<ChangeEvent>>,
    lineages: LineageArena,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events of `taxid` in recording order
    pub fn history(&self, taxid: TaxonId) -> Option<&[ChangeEvent]> {
        self.histories.get(&taxid).map(Vec::as_slice)
    }

    /// Events of `taxid` in emission order
    pub fn sorted_history(&self, taxid: TaxonId) -> Option<Vec<ChangeEvent>> {
        self.histories.get(&taxid).map(|events| {
            let mut events = events.clone();
            events.sort_by_key(ChangeEvent::sort_key);
            events
        })
    }

    pub fn contains(&self, taxid: TaxonId) -> bool {
        self.histories.contains_key(&taxid)
    }

    /// Most recently recorded event
    pub fn last_event(&self, taxid: TaxonId) -> Option<&ChangeEvent> {
        self.histories.get(&taxid).and_then(|events| events.last())
    }

    pub fn last_event_mut(&mut self, taxid: TaxonId) -> Option<&mut ChangeEvent> {
        self.histories.get_mut(&taxid).and_then(|events| events.last_mut())
    }

    pub fn append(&mut self, taxid: TaxonId, event: ChangeEvent) {
        self.histories.entry(taxid).or_default().push(event);
    }

    pub fn intern_lineage(&mut self, lineage: &[TaxonId]) -> LineageRef {
        self.lineages.push(lineage)
    }

    pub fn lineage(&self, lineage: LineageRef) -> &[TaxonId] {
        self.lineages.get(lineage)
    }

    pub fn taxon_count(&self) -> usize {
        self.histories.len()
    }

    pub fn event_count(&self) -> usize {
        self.histories.values().map(Vec::len).sum()
    }

    pub fn lineage_count(&self) -> usize {
        self.lineages.len()
    }

    /// All taxids with a history, ascending
    pub fn taxids(&self) -> Vec<TaxonId> {
        let mut taxids: Vec<TaxonId> = self.histories.keys().copied().collect();
        taxids.par_sort_unstable();
        taxids
    }

    /// Sort every history by (snapshot, kind) in place, in parallel
    pub fn sort_histories(&mut self) {
        self.histories
            .par_iter_mut()
            .for_each(|(_, events)| events.sort_by_key(ChangeEvent::sort_key));
    }
}

/// Last known merge target of every merged-away taxid
#[derive(Debug, Default)]
pub struct MergeLedger {
    targets: HashMap<TaxonId, TaxonId>,
}

impl MergeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `from -> to`. Returns false when the ledger already held exactly
    /// this mapping, i.e. the snapshot only restates a known merge.
    pub fn record(&mut self, from: TaxonId, to: TaxonId) -> bool {
        self.targets.insert(from, to) != Some(to)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
