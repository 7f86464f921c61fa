use std::path::PathBuf;

/// Get the taxlog home directory
/// Checks TAXLOG_HOME environment variable, falls back to ${HOME}/.taxlog
pub fn taxlog_home() -> PathBuf {
    if let Ok(path) = std::env::var("TAXLOG_HOME") {
        return PathBuf::from(path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".taxlog")
}

/// Default location of the user configuration file
pub fn config_file_path() -> PathBuf {
    taxlog_home().join("config.toml")
}
