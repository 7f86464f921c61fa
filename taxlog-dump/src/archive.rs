//! Discovery and validation of a dump archive directory

use crate::format::DumpFiles;
use crate::loader::load_snapshot;
use std::fs;
use std::path::{Path, PathBuf};
use taxlog_core::config::ArchiveConfig;
use taxlog_core::{Snapshot, SnapshotIndex, SnapshotProvider, TaxlogError, TaxlogResult};

/// One dated dump inside the archive
#[derive(Debug, Clone)]
pub struct SnapshotDir {
    /// Directory name, e.g. `2019-07-01`
    pub label: String,
    pub dir: PathBuf,
    pub files: DumpFiles,
}

/// A validated archive; snapshots sorted chronologically by label
#[derive(Debug, Clone)]
pub struct DumpArchive {
    root: PathBuf,
    config: ArchiveConfig,
    snapshots: Vec<SnapshotDir>,
    labels: Vec<String>,
}

impl DumpArchive {
    /// Find every non-hidden sub-directory of `root` and check that each one
    /// provides all four dump files (plain or gzipped).
    pub fn discover(root: &Path, config: &ArchiveConfig) -> TaxlogResult<Self> {
        if !root.exists() {
            return Err(TaxlogError::NotFound(format!(
                "archive path {}",
                root.display()
            )));
        }
        if !root.is_dir() {
            return Err(TaxlogError::InvalidInput(format!(
                "archive path should be a directory: {}",
                root.display()
            )));
        }

        let mut labels = Vec::new();
        for entry in fs::read_dir(root)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            if entry.file_type()?.is_dir() {
                labels.push(name);
            } else {
                tracing::warn!("ignoring non-directory entry {}", name);
            }
        }

        if labels.is_empty() {
            return Err(TaxlogError::InvalidInput(format!(
                "no snapshot directories found in path: {}",
                root.display()
            )));
        }

        // Directory names are dates, lexicographic order is chronological
        labels.sort();

        let snapshots = labels
            .iter()
            .map(|label| {
                let dir = root.join(label);
                let files = DumpFiles::resolve(&dir, config)?;
                Ok(SnapshotDir {
                    label: label.clone(),
                    dir,
                    files,
                })
            })
            .collect::<TaxlogResult<Vec<_>>>()?;

        tracing::info!("{} snapshots found in {}", snapshots.len(), root.display());

        Ok(Self {
            root: root.to_path_buf(),
            config: config.clone(),
            snapshots,
            labels,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn snapshots(&self) -> &[SnapshotDir] {
        &self.snapshots
    }
}

impl SnapshotProvider for DumpArchive {
    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn load(&self, index: SnapshotIndex) -> TaxlogResult<Snapshot> {
        let snapshot = self.snapshots.get(index.as_usize()).ok_or_else(|| {
            TaxlogError::NotFound(format!(
                "snapshot #{} (archive has {})",
                index,
                self.snapshots.len()
            ))
        })?;
        tracing::debug!("loading snapshot {} from {}", snapshot.label, snapshot.dir.display());
        load_snapshot(&snapshot.files, &self.config.name_class)
    }
}
