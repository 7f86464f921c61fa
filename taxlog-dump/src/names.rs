//! `names.dmp`: one name per taxid for the configured name class

use crate::format::DumpFile;
use std::collections::HashMap;
use taxlog_core::{TaxlogResult, TaxonId};

/// Map every taxid to its name of class `name_class` (usually
/// "scientific name"). Other classes are ignored.
pub fn parse_names(file: &DumpFile, name_class: &str) -> TaxlogResult<HashMap<TaxonId, String>> {
    let mut names = HashMap::new();

    file.for_each_record(4, |line_no, fields| {
        if fields[3].trim() != name_class {
            return Ok(());
        }
        let taxid = file.parse_taxid(line_no, fields[0])?;
        names.insert(taxid, fields[1].to_string());
        Ok(())
    })?;

    tracing::debug!("Parsed {} names from {}", names.len(), file.path.display());
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const NAMES: &str = "\
1\t|\tall\t|\t\t|\tsynonym\t|
1\t|\troot\t|\t\t|\tscientific name\t|
562\t|\tBacillus coli\t|\t\t|\tsynonym\t|
562\t|\tEscherichia coli\t|\t\t|\tscientific name\t|
";

    #[test]
    fn test_parse_scientific_names() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("names.dmp"), NAMES).unwrap();
        let file = DumpFile::resolve(dir.path(), "names.dmp").unwrap();

        let names = parse_names(&file, "scientific name").unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names[&TaxonId(1)], "root");
        assert_eq!(names[&TaxonId(562)], "Escherichia coli");
    }

    #[test]
    fn test_parse_other_class() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("names.dmp"), NAMES).unwrap();
        let file = DumpFile::resolve(dir.path(), "names.dmp").unwrap();

        let names = parse_names(&file, "synonym").unwrap();
        assert_eq!(names[&TaxonId(562)], "Bacillus coli");
    }
}
