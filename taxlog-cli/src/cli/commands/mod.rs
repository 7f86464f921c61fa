pub mod changelog;
pub mod check;

use anyhow::Result;
use std::path::Path;
use taxlog_core::{config_file_path, load_config, Config, TaxlogError};

/// Load the configuration: an explicit path must exist, otherwise
/// `$TAXLOG_HOME/config.toml` is read when present, otherwise defaults apply.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(TaxlogError::Configuration(format!(
                "config file not found: {}",
                path.display()
            ))
            .into());
        }
        tracing::debug!("loading config from {}", path.display());
        return Ok(load_config(path)?);
    }

    let default_path = config_file_path();
    if default_path.is_file() {
        tracing::debug!("loading config from {}", default_path.display());
        Ok(load_config(&default_path)?)
    } else {
        Ok(Config::default())
    }
}
