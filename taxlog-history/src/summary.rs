//! Counts of recorded changes

use crate::builder::Changelog;
use std::collections::BTreeMap;
use std::fmt;
use taxlog_core::ChangeKind;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    pub snapshots: usize,
    pub taxa: usize,
    pub events: usize,
    pub per_kind: BTreeMap<ChangeKind, usize>,
}

impl ChangeSummary {
    pub fn from_changelog(changelog: &Changelog) -> Self {
        let store = changelog.store();
        let mut per_kind = BTreeMap::new();
        let mut events = 0;

        for taxid in store.taxids() {
            for event in store.history(taxid).unwrap_or_default() {
                *per_kind.entry(event.kind).or_insert(0) += 1;
                events += 1;
            }
        }

        Self {
            snapshots: changelog.tables().len(),
            taxa: store.taxon_count(),
            events,
            per_kind,
        }
    }

    pub fn count(&self, kind: ChangeKind) -> usize {
        self.per_kind.get(&kind).copied().unwrap_or(0)
    }
}

impl fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} events for {} taxids across {} snapshots",
            self.events, self.taxa, self.snapshots
        )?;
        for (kind, count) in &self.per_kind {
            writeln!(f, "  {:<15} {:>10}", kind.as_str(), count)?;
        }
        Ok(())
    }
}
