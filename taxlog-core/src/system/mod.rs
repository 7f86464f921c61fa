pub mod paths;

// Re-export commonly used functions
pub use paths::{config_file_path, taxlog_home};
