//! Configuration types for taxlog

use crate::TaxlogError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// File names looked up inside every snapshot directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    #[serde(default = "default_nodes_file")]
    pub nodes_file: String,
    #[serde(default = "default_names_file")]
    pub names_file: String,
    #[serde(default = "default_delnodes_file")]
    pub delnodes_file: String,
    #[serde(default = "default_merged_file")]
    pub merged_file: String,
    /// Only names of this class populate the name table
    #[serde(default = "default_name_class")]
    pub name_class: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Worker threads for the emitter sort (0 = all available)
    #[serde(default = "default_threads")]
    pub threads: usize,
}

// Default value functions
fn default_nodes_file() -> String { "nodes.dmp".to_string() }
fn default_names_file() -> String { "names.dmp".to_string() }
fn default_delnodes_file() -> String { "delnodes.dmp".to_string() }
fn default_merged_file() -> String { "merged.dmp".to_string() }
fn default_name_class() -> String { "scientific name".to_string() }
fn default_delimiter() -> char { ',' }
fn default_threads() -> usize { 0 }

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            nodes_file: default_nodes_file(),
            names_file: default_names_file(),
            delnodes_file: default_delnodes_file(),
            merged_file: default_merged_file(),
            name_class: default_name_class(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
        }
    }
}

impl OutputConfig {
    /// Delimiter as the single byte the csv writer expects. The multi-value
    /// separator, the quote character and line terminators are rejected.
    pub fn delimiter_byte(&self) -> Result<u8, TaxlogError> {
        match self.delimiter {
            ';' | '"' | '\n' | '\r' => Err(self.invalid_delimiter()),
            c if c.is_ascii() => Ok(c as u8),
            _ => Err(self.invalid_delimiter()),
        }
    }

    fn invalid_delimiter(&self) -> TaxlogError {
        TaxlogError::Configuration(format!(
            "delimiter must be a single ASCII character other than ';', '\"', CR or LF, got {:?}",
            self.delimiter
        ))
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, TaxlogError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    config.output.delimiter_byte()?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), TaxlogError> {
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.archive.nodes_file, "nodes.dmp");
        assert_eq!(config.archive.names_file, "names.dmp");
        assert_eq!(config.archive.delnodes_file, "delnodes.dmp");
        assert_eq!(config.archive.merged_file, "merged.dmp");
        assert_eq!(config.archive.name_class, "scientific name");

        assert_eq!(config.output.delimiter, ',');
        assert_eq!(config.performance.threads, 0);
    }

    #[test]
    fn test_load_partial_config() {
        let toml_content = r#"
[archive]
name_class = "synonym"

[output]
delimiter = "\t"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.archive.name_class, "synonym");
        assert_eq!(config.output.delimiter, '\t');

        // Unspecified fields fall back to defaults
        assert_eq!(config.archive.nodes_file, "nodes.dmp");
        assert_eq!(config.performance.threads, 0);
    }

    #[test]
    fn test_load_invalid_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "this is not valid TOML {{").unwrap();

        match load_config(temp_file.path()).unwrap_err() {
            TaxlogError::Configuration(msg) => assert!(msg.contains("Failed to parse config")),
            _ => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_load_rejects_multi_value_separator_as_delimiter() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[output]\ndelimiter = \";\"\n").unwrap();

        match load_config(temp_file.path()).unwrap_err() {
            TaxlogError::Configuration(msg) => assert!(msg.contains("delimiter")),
            _ => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_delimiter_rejects_quote_and_line_breaks() {
        for delimiter in ['"', '\r', '\n', ';', 'é'] {
            let output = OutputConfig { delimiter };
            assert!(
                matches!(output.delimiter_byte(), Err(TaxlogError::Configuration(_))),
                "{:?} should be rejected",
                delimiter
            );
        }
        for (delimiter, byte) in [(',', b','), ('\t', b'\t'), ('|', b'|')] {
            assert_eq!(OutputConfig { delimiter }.delimiter_byte().unwrap(), byte);
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        match load_config("/nonexistent/path/to/config.toml").unwrap_err() {
            TaxlogError::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = Config::default();
        config.archive.merged_file = "merged.txt".to_string();
        config.output.delimiter = '\t';
        config.performance.threads = 4;

        let temp_file = NamedTempFile::new().unwrap();
        save_config(temp_file.path(), &config).unwrap();
        let loaded = load_config(temp_file.path()).unwrap();

        assert_eq!(loaded.archive.merged_file, "merged.txt");
        assert_eq!(loaded.output.delimiter, '\t');
        assert_eq!(loaded.performance.threads, 4);
    }
}
