//! Change events recorded in a taxid's history

use crate::lineage::LineageRef;
use std::fmt;
use taxlog_core::{ChangeKind, SnapshotIndex, TaxonId};

/// Payload of an event: the merge target, or the absorbed taxids
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChangeValue {
    #[default]
    None,
    MergedInto(TaxonId),
    /// Absorbed taxids in encounter order
    Absorbed(Vec<TaxonId>),
}

impl fmt::Display for ChangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeValue::None => Ok(()),
            ChangeValue::MergedInto(target) => write!(f, "{}", target),
            ChangeValue::Absorbed(ids) => f.write_str(&join_taxids(ids)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Snapshot that produced the event
    pub snapshot: SnapshotIndex,
    /// Snapshot whose name/rank/lineage tables describe the event, `None`
    /// when nothing is known about the taxid at that point
    pub data_snapshot: Option<SnapshotIndex>,
    pub kind: ChangeKind,
    pub lineage: Option<LineageRef>,
    pub value: ChangeValue,
}

impl ChangeEvent {
    /// An event describing the taxid with current data
    pub fn current(snapshot: SnapshotIndex, kind: ChangeKind, lineage: Option<LineageRef>) -> Self {
        Self {
            snapshot,
            data_snapshot: Some(snapshot),
            kind,
            lineage,
            value: ChangeValue::None,
        }
    }

    /// An event with no data at all, for taxids first seen as deleted or merged
    pub fn placeholder(snapshot: SnapshotIndex, kind: ChangeKind) -> Self {
        Self {
            snapshot,
            data_snapshot: None,
            kind,
            lineage: None,
            value: ChangeValue::None,
        }
    }

    /// An event pointing at the data of `previous`
    pub fn carried_from(snapshot: SnapshotIndex, kind: ChangeKind, previous: &ChangeEvent) -> Self {
        Self {
            snapshot,
            data_snapshot: previous.data_snapshot,
            kind,
            lineage: previous.lineage,
            value: ChangeValue::None,
        }
    }

    pub fn with_value(mut self, value: ChangeValue) -> Self {
        self.value = value;
        self
    }

    /// Emission order: snapshot first, then the fixed kind ordinal
    pub fn sort_key(&self) -> (SnapshotIndex, ChangeKind) {
        (self.snapshot, self.kind)
    }

    pub fn has_data(&self) -> bool {
        self.data_snapshot.is_some()
    }
}

pub(crate) fn join_taxids(ids: &[TaxonId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(crate::emitter::MULTI_VALUE_SEPARATOR)
}
