// configuration - optional toml file with defaults for every field

use crate::batch::Throttle;
use crate::utils::DEFAULT_EXTENSIONS;
use anyhow::{Context, Result};
use dotenv::dotenv;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "vistara-codemod.toml";

/// environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "VISTARA_CODEMOD_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// directory scanned when no path is given
    pub root: PathBuf,
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./src"),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// root of the legacy component tree; record paths are relative to it
    pub source_base: PathBuf,
    /// root the migrated components are written under
    pub target_base: PathBuf,
    pub map_file: PathBuf,
    pub log_dir: PathBuf,
    pub batch_size: usize,
    pub throttle_ms: u64,
    /// record category -> destination folder
    pub categories: IndexMap<String, String>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        let categories = [
            "common",
            "features",
            "pages",
            "layout",
            "settings",
            "monitoring",
            "forms",
            "data",
            "display",
        ]
        .iter()
        .map(|c| (c.to_string(), c.to_string()))
        .collect();

        Self {
            source_base: PathBuf::from("../titanmind/src/components"),
            target_base: PathBuf::from("./src/components"),
            map_file: PathBuf::from("./titanmind-components-map.json"),
            log_dir: PathBuf::from("."),
            batch_size: 5,
            throttle_ms: 100,
            categories,
        }
    }
}

impl BatchConfig {
    pub fn throttle(&self) -> Throttle {
        Throttle::fixed(Duration::from_millis(self.throttle_ms))
    }
}

impl Config {
    /// load from `$VISTARA_CODEMOD_CONFIG`, else `./vistara-codemod.toml`, else defaults
    pub fn load() -> Result<Self> {
        dotenv().ok();

        if let Ok(explicit) = env::var(CONFIG_ENV_VAR) {
            return Self::load_from(Path::new(&explicit));
        }

        let local = Path::new(CONFIG_FILE_NAME);
        if local.exists() {
            Self::load_from(local)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
        assert_eq!(Config::default().batch.batch_size, 5);
        assert_eq!(Config::default().scan.extensions, vec![".jsx", ".js", ".ts", ".tsx"]);
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config = Config::parse(
            r#"
            [scan]
            extensions = [".tsx"]

            [batch]
            target_base = "out/components"
            throttle_ms = 0

            [batch.categories]
            common = "shared"
            "#,
        )
        .unwrap();

        assert_eq!(config.scan.extensions, vec![".tsx"]);
        assert_eq!(config.scan.root, PathBuf::from("./src"));
        assert_eq!(config.batch.target_base, PathBuf::from("out/components"));
        assert_eq!(config.batch.batch_size, 5);
        assert_eq!(config.batch.throttle(), Throttle::none());
        assert_eq!(config.batch.categories.get("common").map(String::as_str), Some("shared"));
        assert_eq!(config.batch.categories.len(), 1);
    }

    #[test]
    fn test_load_from_reports_bad_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[batch]\nbatch_size = \"many\"").unwrap();

        let error = Config::load_from(&path).unwrap_err();
        assert!(error.to_string().starts_with("invalid config"));
        assert!(Config::load_from(&temp_dir.path().join("missing.toml")).is_err());
    }
}
