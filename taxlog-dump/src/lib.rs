//! Snapshot loading from NCBI taxonomy dump archives
//!
//! An archive is a directory holding one sub-directory per dated dump
//! (`2019-07-01/`, `2019-08-01/`, ...). Each dump provides `nodes.dmp`,
//! `names.dmp`, `delnodes.dmp` and `merged.dmp`, optionally gzipped.

pub mod archive;
pub mod format;
pub mod lists;
pub mod loader;
pub mod names;
pub mod nodes;

pub use archive::{DumpArchive, SnapshotDir};
pub use format::{DumpFile, DumpFiles};
pub use loader::load_snapshot;
