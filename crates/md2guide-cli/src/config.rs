//! Configuration file support for the md2guide CLI.
//!
//! Loads settings from a `_md2guide.toml` file in the input directory, so a
//! documentation tree can carry its own output targets.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "_md2guide.toml";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration
    pub output: OutputConfig,
}

/// Output configuration
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Guide files to write; every target receives the identical byte stream.
    pub paths: Vec<PathBuf>,
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Try to load configuration from a directory (looks for `_md2guide.toml`)
    ///
    /// Returns `Ok(None)` if the config file doesn't exist.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.output.paths.is_empty());
    }

    #[test]
    fn test_parse_output_section() {
        let config: Config = toml::from_str(
            r#"
            [output]
            paths = ["Api.guide", "/mnt/amiga/Api.guide"]
            "#,
        )
        .unwrap();

        assert_eq!(
            config.output.paths,
            vec![
                PathBuf::from("Api.guide"),
                PathBuf::from("/mnt/amiga/Api.guide")
            ]
        );
    }

    #[test]
    fn test_load_from_dir_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_from_dir_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[output]\npaths = [\"out.guide\"]\n",
        )
        .unwrap();

        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.output.paths, vec![PathBuf::from("out.guide")]);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[output\n").unwrap();
        assert!(Config::load_from_dir(dir.path()).is_err());
    }
}
