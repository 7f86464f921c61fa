//! Reading `.dmp` records, plain or gzipped

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use taxlog_core::config::ArchiveConfig;
use taxlog_core::{TaxlogError, TaxlogResult, TaxonId};

const FIELD_SEPARATOR: &str = "\t|\t";

/// A dump file resolved on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpFile {
    pub path: PathBuf,
    pub compressed: bool,
}

impl DumpFile {
    /// Resolve `<dir>/<name>`, preferring `<dir>/<name>.gz` when it exists
    pub fn resolve(dir: &Path, name: &str) -> TaxlogResult<Self> {
        let plain = dir.join(name);
        let gz = dir.join(format!("{}.gz", name));

        if gz.is_file() {
            Ok(Self {
                path: gz,
                compressed: true,
            })
        } else if plain.is_file() {
            Ok(Self {
                path: plain,
                compressed: false,
            })
        } else {
            Err(TaxlogError::NotFound(format!(
                "neither {} nor {}.gz found in {}",
                name,
                name,
                dir.display()
            )))
        }
    }

    pub fn open(&self) -> TaxlogResult<Box<dyn BufRead + Send>> {
        let file = File::open(&self.path).map_err(|e| {
            TaxlogError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to open {}: {}", self.path.display(), e),
            ))
        })?;

        if self.compressed {
            Ok(Box::new(BufReader::new(GzDecoder::new(file))))
        } else {
            Ok(Box::new(BufReader::new(file)))
        }
    }

    /// Walk every non-blank record, handing over the 1-based line number and
    /// the split fields. Records with fewer than `min_fields` fields fail.
    pub fn for_each_record<F>(&self, min_fields: usize, mut handle: F) -> TaxlogResult<()>
    where
        F: FnMut(usize, &[&str]) -> TaxlogResult<()>,
    {
        let reader = self.open()?;
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = i + 1;
            let fields = split_record(&line);
            if fields.is_empty() {
                continue;
            }
            if fields.len() < min_fields {
                return Err(TaxlogError::parse_at(
                    &self.path,
                    line_no,
                    format!("expected at least {} fields, found {}", min_fields, fields.len()),
                ));
            }
            handle(line_no, &fields)?;
        }
        Ok(())
    }

    pub fn parse_taxid(&self, line_no: usize, field: &str) -> TaxlogResult<TaxonId> {
        field.parse::<TaxonId>().map_err(|_| {
            TaxlogError::parse_at(&self.path, line_no, format!("invalid taxid '{}'", field))
        })
    }
}

/// The four files of one snapshot directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpFiles {
    pub nodes: DumpFile,
    pub names: DumpFile,
    pub delnodes: DumpFile,
    pub merged: DumpFile,
}

impl DumpFiles {
    pub fn resolve(dir: &Path, config: &ArchiveConfig) -> TaxlogResult<Self> {
        Ok(Self {
            nodes: DumpFile::resolve(dir, &config.nodes_file)?,
            names: DumpFile::resolve(dir, &config.names_file)?,
            delnodes: DumpFile::resolve(dir, &config.delnodes_file)?,
            merged: DumpFile::resolve(dir, &config.merged_file)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &DumpFile> {
        [&self.nodes, &self.names, &self.delnodes, &self.merged].into_iter()
    }
}

/// Split one `\t|\t` separated record, dropping the `\t|` terminator.
/// A blank line yields no fields.
pub fn split_record(line: &str) -> Vec<&str> {
    let line = line.trim_end_matches(['\r', '\n']);
    let line = line.strip_suffix("\t|").unwrap_or(line);
    if line.trim().is_empty() {
        return Vec::new();
    }
    line.split(FIELD_SEPARATOR).collect()
}
