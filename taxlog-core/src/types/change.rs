//! Kinds of identity change a taxid can undergo between snapshots

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One kind of change recorded in a taxid's history.
///
/// The declaration order is the tie-break used when several events of the
/// same taxid share a snapshot: lower variants sort first. This ordering is a
/// fixed output contract, do not reorder the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum ChangeKind {
    /// First appearance of the taxid
    New = 1,
    /// A deleted taxid is live again
    ReuseDeleted,
    /// A merged-away taxid is live again
    ReuseMerged,
    Delete,
    /// Merged into another taxid
    Merge,
    /// Other taxids merged into this one
    Absorb,
    NameChanged,
    RankChanged,
    /// Same ancestor taxids, but an ancestor was renamed
    LineageRenamed,
    /// Ancestor taxids changed, same depth
    LineageTaxaChanged,
    /// Lineage depth changed
    LineageLengthChanged,
}

impl ChangeKind {
    pub const ALL: [ChangeKind; 11] = [
        ChangeKind::New,
        ChangeKind::ReuseDeleted,
        ChangeKind::ReuseMerged,
        ChangeKind::Delete,
        ChangeKind::Merge,
        ChangeKind::Absorb,
        ChangeKind::NameChanged,
        ChangeKind::RankChanged,
        ChangeKind::LineageRenamed,
        ChangeKind::LineageTaxaChanged,
        ChangeKind::LineageLengthChanged,
    ];

    /// Label used in the changelog `change` column
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::New => "NEW",
            ChangeKind::ReuseDeleted => "REUSE_DEL",
            ChangeKind::ReuseMerged => "REUSE_MER",
            ChangeKind::Delete => "DELETE",
            ChangeKind::Merge => "MERGE",
            ChangeKind::Absorb => "ABSORB",
            ChangeKind::NameChanged => "CHANGE_NAME",
            ChangeKind::RankChanged => "CHANGE_RANK",
            ChangeKind::LineageRenamed => "CHANGE_LIN_LIN",
            ChangeKind::LineageTaxaChanged => "CHANGE_LIN_TAX",
            ChangeKind::LineageLengthChanged => "CHANGE_LIN_LEN",
        }
    }

    /// Numeric ordinal, 1-based
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChangeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown change kind: {}", s))
    }
}
