//! `nodes.dmp`: parent pointers and ranks, and the lineages derived from them

use crate::format::DumpFile;
use std::collections::HashMap;
use taxlog_core::{TaxlogError, TaxlogResult, TaxonId};

/// Parent pointers and ranks of one snapshot
#[derive(Debug, Default)]
pub struct NodeTable {
    pub parents: HashMap<TaxonId, TaxonId>,
    pub ranks: HashMap<TaxonId, String>,
}

pub fn parse_nodes(file: &DumpFile) -> TaxlogResult<NodeTable> {
    let mut table = NodeTable::default();

    file.for_each_record(3, |line_no, fields| {
        let taxid = file.parse_taxid(line_no, fields[0])?;
        let parent = file.parse_taxid(line_no, fields[1])?;
        table.parents.insert(taxid, parent);
        table.ranks.insert(taxid, fields[2].to_string());
        Ok(())
    })?;

    tracing::debug!(
        "Parsed {} nodes from {}",
        table.parents.len(),
        file.path.display()
    );
    Ok(table)
}

/// Ancestors of every node, root first, immediate parent last.
///
/// The root (parent pointing at itself) gets an empty lineage. Lineages of
/// ancestors met on the way up are filled in as well, so every node is
/// walked once.
pub fn derive_lineages(
    parents: &HashMap<TaxonId, TaxonId>,
) -> TaxlogResult<HashMap<TaxonId, Vec<TaxonId>>> {
    let mut lineages: HashMap<TaxonId, Vec<TaxonId>> = HashMap::with_capacity(parents.len());
    let mut chain: Vec<TaxonId> = Vec::new();

    for &taxid in parents.keys() {
        if lineages.contains_key(&taxid) {
            continue;
        }

        // chain[0] is taxid itself, chain[k+1] the parent of chain[k]
        chain.clear();
        chain.push(taxid);
        let mut base: Vec<TaxonId> = loop {
            let current = chain[chain.len() - 1];
            let parent = *parents.get(&current).ok_or_else(|| {
                TaxlogError::Parse(format!(
                    "taxid {} references unknown parent {}",
                    chain[chain.len() - 2],
                    current
                ))
            })?;

            if parent == current {
                break Vec::new();
            }
            if let Some(known) = lineages.get(&parent) {
                let mut base = known.clone();
                base.push(parent);
                break base;
            }
            if chain.len() > parents.len() {
                return Err(TaxlogError::Parse(format!(
                    "parent cycle detected above taxid {}",
                    taxid
                )));
            }
            chain.push(parent);
        };

        // Fill lineages from the topmost unresolved node downwards
        for (i, &node) in chain.iter().enumerate().rev() {
            if i + 1 < chain.len() {
                base.push(chain[i + 1]);
            }
            lineages.insert(node, base.clone());
        }
    }

    Ok(lineages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(raw: &[u32]) -> Vec<TaxonId> {
        raw.iter().copied().map(TaxonId).collect()
    }

    fn parents(pairs: &[(u32, u32)]) -> HashMap<TaxonId, TaxonId> {
        pairs
            .iter()
            .map(|&(child, parent)| (TaxonId(child), TaxonId(parent)))
            .collect()
    }

    #[test]
    fn test_derive_lineages() {
        let parents = parents(&[(1, 1), (2, 1), (10, 2), (100, 10), (101, 10), (20, 1)]);
        let lineages = derive_lineages(&parents).unwrap();

        assert_eq!(lineages.len(), 6);
        assert_eq!(lineages[&TaxonId(1)], ids(&[]));
        assert_eq!(lineages[&TaxonId(2)], ids(&[1]));
        assert_eq!(lineages[&TaxonId(10)], ids(&[1, 2]));
        assert_eq!(lineages[&TaxonId(100)], ids(&[1, 2, 10]));
        assert_eq!(lineages[&TaxonId(101)], ids(&[1, 2, 10]));
        assert_eq!(lineages[&TaxonId(20)], ids(&[1]));
    }

    #[test]
    fn test_unknown_parent_is_error() {
        let parents = parents(&[(1, 1), (5, 99)]);
        let err = derive_lineages(&parents).unwrap_err();
        assert!(err.to_string().contains("taxid 5 references unknown parent 99"));
    }

    #[test]
    fn test_cycle_is_error() {
        let parents = parents(&[(1, 1), (5, 6), (6, 5)]);
        let err = derive_lineages(&parents).unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn test_parse_nodes() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("nodes.dmp"),
            "1\t|\t1\t|\tno rank\t|\t\t|\n2\t|\t1\t|\tsuperkingdom\t|\t\t|\n",
        )
        .unwrap();
        let file = DumpFile::resolve(dir.path(), "nodes.dmp").unwrap();

        let table = parse_nodes(&file).unwrap();
        assert_eq!(table.parents[&TaxonId(2)], TaxonId(1));
        assert_eq!(table.ranks[&TaxonId(2)], "superkingdom");
        assert_eq!(table.ranks[&TaxonId(1)], "no rank");
    }

    #[test]
    fn test_parse_nodes_bad_taxid() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("nodes.dmp"), "x\t|\t1\t|\tno rank\t|\n").unwrap();
        let file = DumpFile::resolve(dir.path(), "nodes.dmp").unwrap();

        let err = parse_nodes(&file).unwrap_err();
        assert!(err.to_string().contains("invalid taxid 'x'"));
    }
}
