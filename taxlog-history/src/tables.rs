//! Per-snapshot name and rank tables, kept for the whole run so historical
//! lineages can be rendered with the names they had at the time

use std::collections::HashMap;
use taxlog_core::{SnapshotIndex, TaxonId};

#[derive(Debug, Default)]
pub struct SnapshotTable {
    pub label: String,
    pub names: HashMap<TaxonId, String>,
    pub ranks: HashMap<TaxonId, String>,
}

impl SnapshotTable {
    /// Name of `taxid`, empty when the snapshot has none
    pub fn name(&self, taxid: TaxonId) -> &str {
        self.names.get(&taxid).map(String::as_str).unwrap_or("")
    }

    pub fn rank(&self, taxid: TaxonId) -> &str {
        self.ranks.get(&taxid).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Default)]
pub struct SnapshotTables {
    tables: Vec<SnapshotTable>,
}

impl SnapshotTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the tables of the next snapshot and return its index
    pub fn push(
        &mut self,
        label: String,
        names: HashMap<TaxonId, String>,
        ranks: HashMap<TaxonId, String>,
    ) -> SnapshotIndex {
        let index = SnapshotIndex::from(self.tables.len());
        self.tables.push(SnapshotTable { label, names, ranks });
        index
    }

    pub fn get(&self, index: SnapshotIndex) -> &SnapshotTable {
        &self.tables[index.as_usize()]
    }

    pub fn label(&self, index: SnapshotIndex) -> &str {
        &self.get(index).label
    }

    pub fn last_label(&self) -> Option<&str> {
        self.tables.last().map(|t| t.label.as_str())
    }

    pub fn name(&self, index: SnapshotIndex, taxid: TaxonId) -> &str {
        self.get(index).name(taxid)
    }

    pub fn rank(&self, index: SnapshotIndex, taxid: TaxonId) -> &str {
        self.get(index).rank(taxid)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
