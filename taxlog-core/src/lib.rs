//! Core utilities and types shared across all taxlog crates

pub mod config;
pub mod error;
pub mod system;
pub mod types;

// Re-export commonly used types
pub use config::{load_config, save_config, Config};
pub use error::{TaxlogError, TaxlogResult};

pub use types::{ChangeKind, MergePair, Snapshot, SnapshotIndex, SnapshotProvider, TaxonId};

pub use system::{config_file_path, taxlog_home};

/// Version information for the taxlog project
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
