//! Changelog Emitter: one delimited row per event, taxid-major

use crate::builder::Changelog;
use crate::event::{join_taxids, ChangeEvent};
use std::io::Write;
use taxlog_core::{ChangeKind, TaxlogError, TaxlogResult, TaxonId};

pub const HEADER: [&str; 8] = [
    "taxid",
    "version",
    "change",
    "change-value",
    "name",
    "rank",
    "lineage",
    "lineage-taxids",
];

/// Separator between values inside one field
pub const MULTI_VALUE_SEPARATOR: &str = ";";

/// A rendered changelog row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogRow {
    pub taxid: TaxonId,
    /// Snapshot label
    pub version: String,
    pub change: ChangeKind,
    pub change_value: String,
    pub name: String,
    pub rank: String,
    /// Ancestor names, parallel to `lineage_taxids`
    pub lineage: String,
    pub lineage_taxids: String,
}

impl ChangelogRow {
    pub fn to_record(&self) -> [String; 8] {
        [
            self.taxid.to_string(),
            self.version.clone(),
            self.change.to_string(),
            self.change_value.clone(),
            self.name.clone(),
            self.rank.clone(),
            self.lineage.clone(),
            self.lineage_taxids.clone(),
        ]
    }
}

pub struct ChangelogEmitter<'a> {
    changelog: &'a Changelog,
    delimiter: u8,
}

impl<'a> ChangelogEmitter<'a> {
    pub fn new(changelog: &'a Changelog) -> Self {
        Self {
            changelog,
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Render one event of `taxid`. Name, rank and lineage are resolved in
    /// the event's data snapshot and left empty when it has none.
    pub fn render(&self, taxid: TaxonId, event: &ChangeEvent) -> ChangelogRow {
        let tables = self.changelog.tables();
        let store = self.changelog.store();

        let (name, rank, lineage, lineage_taxids) = match event.data_snapshot {
            None => Default::default(),
            Some(data) => {
                let table = tables.get(data);
                let ancestors = event.lineage.map(|r| store.lineage(r)).unwrap_or_default();
                let names = ancestors
                    .iter()
                    .map(|&ancestor| table.name(ancestor))
                    .collect::<Vec<_>>()
                    .join(MULTI_VALUE_SEPARATOR);
                (
                    table.name(taxid).to_string(),
                    table.rank(taxid).to_string(),
                    names,
                    join_taxids(ancestors),
                )
            }
        };

        ChangelogRow {
            taxid,
            version: tables.label(event.snapshot).to_string(),
            change: event.kind,
            change_value: event.value.to_string(),
            name,
            rank,
            lineage,
            lineage_taxids,
        }
    }

    /// Every row in output order: taxids ascending, then each sorted history
    pub fn rows(&self) -> impl Iterator<Item = ChangelogRow> + '_ {
        self.changelog.taxids().into_iter().flat_map(move |taxid| {
            self.changelog
                .history(taxid)
                .unwrap_or_default()
                .iter()
                .map(move |event| self.render(taxid, event))
        })
    }

    /// Write the header and all rows. Returns the number of rows written.
    pub fn write<W: Write>(&self, writer: W) -> TaxlogResult<usize> {
        let mut csv = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .from_writer(writer);

        csv.write_record(HEADER).map_err(output_error)?;

        let mut written = 0;
        for row in self.rows() {
            csv.write_record(row.to_record()).map_err(output_error)?;
            written += 1;
        }
        csv.flush()?;

        tracing::debug!("wrote {} changelog rows", written);
        Ok(written)
    }
}

fn output_error(err: csv::Error) -> TaxlogError {
    TaxlogError::Output(err.to_string())
}
