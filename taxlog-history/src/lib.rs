//! Reconstruction of per-taxid identity histories across a time-ordered
//! sequence of taxonomy snapshots, and rendering of the resulting changelog.
//!
//! Snapshots are folded strictly in order by [`ChangelogBuilder`]: every
//! decision made by the [`EventDetector`] looks at the state left behind by
//! the previous snapshot. Once all snapshots are folded, the [`Changelog`]
//! holds every history sorted by (snapshot, change kind) and the
//! [`ChangelogEmitter`] writes one row per event.

pub mod builder;
pub mod detector;
pub mod emitter;
pub mod event;
pub mod lineage;
pub mod output;
pub mod store;
pub mod summary;
pub mod tables;

pub use builder::{Changelog, ChangelogBuilder};
pub use detector::{DetectionStats, EventDetector};
pub use emitter::{ChangelogEmitter, ChangelogRow, HEADER, MULTI_VALUE_SEPARATOR};
pub use event::{ChangeEvent, ChangeValue};
pub use lineage::{LineageArena, LineageRef};
pub use output::OutputSink;
pub use store::{HistoryStore, MergeLedger};
pub use summary::ChangeSummary;
pub use tables::{SnapshotTable, SnapshotTables};
