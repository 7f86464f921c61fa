pub mod change;
pub mod snapshot;
pub mod taxonomy;

pub use change::ChangeKind;
pub use snapshot::{MergePair, Snapshot, SnapshotIndex, SnapshotProvider};
pub use taxonomy::TaxonId;
