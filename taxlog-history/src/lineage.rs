//! Arena of lineage records shared by events
//!
//! Events never own a lineage. DELETE and MERGE events that carry forward the
//! previous state simply copy the [`LineageRef`], so a lineage is stored once
//! per (taxid, snapshot) no matter how many events point at it.

use taxlog_core::TaxonId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineageRef(u32);

#[derive(Debug, Default)]
pub struct LineageArena {
    records: Vec<Box<[TaxonId]>>,
}

impl LineageArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, lineage: &[TaxonId]) -> LineageRef {
        let index = self.records.len() as u32;
        self.records.push(lineage.into());
        LineageRef(index)
    }

    pub fn get(&self, lineage: LineageRef) -> &[TaxonId] {
        &self.records[lineage.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
