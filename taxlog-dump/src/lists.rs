//! `delnodes.dmp` and `merged.dmp`

use crate::format::DumpFile;
use taxlog_core::{MergePair, TaxlogResult, TaxonId};

pub fn parse_delnodes(file: &DumpFile) -> TaxlogResult<Vec<TaxonId>> {
    let mut deleted = Vec::new();
    file.for_each_record(1, |line_no, fields| {
        deleted.push(file.parse_taxid(line_no, fields[0])?);
        Ok(())
    })?;

    tracing::debug!("Parsed {} deleted taxids from {}", deleted.len(), file.path.display());
    Ok(deleted)
}

/// Merge pairs in file order
pub fn parse_merged(file: &DumpFile) -> TaxlogResult<Vec<MergePair>> {
    let mut merges = Vec::new();
    file.for_each_record(2, |line_no, fields| {
        merges.push(MergePair {
            from: file.parse_taxid(line_no, fields[0])?,
            to: file.parse_taxid(line_no, fields[1])?,
        });
        Ok(())
    })?;

    tracing::debug!("Parsed {} merge pairs from {}", merges.len(), file.path.display());
    Ok(merges)
}
