//! One dated dump of the taxonomy registry, reduced to the tables the
//! changelog needs

use crate::error::TaxlogResult;
use crate::types::TaxonId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Position of a snapshot in the chronologically sorted archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SnapshotIndex(pub u32);

impl SnapshotIndex {
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for SnapshotIndex {
    fn from(index: usize) -> Self {
        Self(index as u32)
    }
}

impl fmt::Display for SnapshotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `from` was merged into `to` as of the snapshot carrying the pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergePair {
    pub from: TaxonId,
    pub to: TaxonId,
}

impl MergePair {
    pub fn new(from: impl Into<TaxonId>, to: impl Into<TaxonId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Tables of a single snapshot
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Live taxa: ancestors from root down to the immediate parent
    pub lineages: HashMap<TaxonId, Vec<TaxonId>>,
    pub ranks: HashMap<TaxonId, String>,
    /// Scientific names
    pub names: HashMap<TaxonId, String>,
    pub deleted: Vec<TaxonId>,
    /// Merge records in file order
    pub merges: Vec<MergePair>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a live taxon with its lineage, rank and name
    pub fn with_taxon(
        mut self,
        taxid: u32,
        lineage: &[u32],
        rank: &str,
        name: &str,
    ) -> Self {
        let taxid = TaxonId(taxid);
        self.lineages
            .insert(taxid, lineage.iter().copied().map(TaxonId).collect());
        self.ranks.insert(taxid, rank.to_string());
        self.names.insert(taxid, name.to_string());
        self
    }

    pub fn with_deleted(mut self, taxid: u32) -> Self {
        self.deleted.push(TaxonId(taxid));
        self
    }

    pub fn with_merge(mut self, from: u32, to: u32) -> Self {
        self.merges.push(MergePair::new(from, to));
        self
    }

    pub fn live_count(&self) -> usize {
        self.lineages.len()
    }
}

/// Source of an ordered sequence of snapshots.
///
/// Labels are returned in chronological order; `load(i)` yields the tables
/// of the snapshot labelled `labels()[i]`.
pub trait SnapshotProvider {
    fn labels(&self) -> &[String];

    fn load(&self, index: SnapshotIndex) -> TaxlogResult<Snapshot>;

    fn len(&self) -> usize {
        self.labels().len()
    }

    fn is_empty(&self) -> bool {
        self.labels().is_empty()
    }
}
