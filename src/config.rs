//! Tree-building configuration and its on-disk store
//!
//! Stored in ~/.config/txmerkle/config.json. Command-line flags take
//! precedence over anything loaded from here.

use crate::model::HashAlgorithm;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// What to do when a level above the leaves has an odd number of nodes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OddLevelPolicy {
    /// Fail the build. Only leaf counts that pad to a power of two succeed.
    #[default]
    Reject,
    /// Pad the level with a copy of its last node, as is done for leaves
    DuplicateLast,
}

impl OddLevelPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OddLevelPolicy::Reject => "reject",
            OddLevelPolicy::DuplicateLast => "duplicate-last",
        }
    }
}

impl fmt::Display for OddLevelPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OddLevelPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "reject" => Ok(OddLevelPolicy::Reject),
            "duplicate-last" | "duplicate" => Ok(OddLevelPolicy::DuplicateLast),
            other => Err(Error::Config(format!("Unknown odd level policy: {}", other))),
        }
    }
}

/// Settings that affect how a tree is built
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Hash function for leaves and branches
    pub algorithm: HashAlgorithm,
    /// Handling of odd-width levels above the leaves
    pub odd_level: OddLevelPolicy,
}

impl TreeConfig {
    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_odd_level(mut self, odd_level: OddLevelPolicy) -> Self {
        self.odd_level = odd_level;
        self
    }
}

/// Config store - manages persistence of [`TreeConfig`]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Create store using default path (~/.config/txmerkle/config.json)
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not find config directory".into()))?
            .join("txmerkle");

        Ok(Self {
            path: config_dir.join("config.json"),
        })
    }

    /// Create store backed by an explicit file
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load the stored config, if any
    pub fn load(&self) -> Result<Option<TreeConfig>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        let config = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;

        Ok(Some(config))
    }

    /// Load the stored config, falling back to defaults when absent
    pub fn load_or_default(&self) -> Result<TreeConfig> {
        Ok(self.load()?.unwrap_or_default())
    }

    pub fn save(&self, config: &TreeConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config dir: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(config)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&self.path, content)
            .map_err(|e| Error::Config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = TreeConfig::default();
        assert_eq!(config.algorithm, HashAlgorithm::Sha256);
        assert_eq!(config.odd_level, OddLevelPolicy::Reject);
    }

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join("config.json"));
        assert!(store.load().unwrap().is_none());
        assert_eq!(store.load_or_default().unwrap(), TreeConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join("nested").join("config.json"));
        let config = TreeConfig::default()
            .with_algorithm(HashAlgorithm::Blake3)
            .with_odd_level(OddLevelPolicy::DuplicateLast);

        store.save(&config).unwrap();
        assert_eq!(store.load().unwrap(), Some(config));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"algorithm":"blake3"}"#).unwrap();

        let config = ConfigStore::at(&path).load().unwrap().unwrap();
        assert_eq!(config.algorithm, HashAlgorithm::Blake3);
        assert_eq!(config.odd_level, OddLevelPolicy::Reject);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(ConfigStore::at(&path).load(), Err(Error::Config(_))));
    }

    #[test]
    fn test_policy_serializes_like_flag() {
        let json = serde_json::to_string(&OddLevelPolicy::DuplicateLast).unwrap();
        assert_eq!(json, format!("\"{}\"", OddLevelPolicy::DuplicateLast));
        assert_eq!(json, "\"duplicate-last\"");

        let config: TreeConfig =
            serde_json::from_str(r#"{"odd_level":"duplicate-last"}"#).unwrap();
        assert_eq!(config.odd_level, OddLevelPolicy::DuplicateLast);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(
            "duplicate_last".parse::<OddLevelPolicy>().unwrap(),
            OddLevelPolicy::DuplicateLast
        );
        assert_eq!("reject".parse::<OddLevelPolicy>().unwrap(), OddLevelPolicy::Reject);
        assert!("pad".parse::<OddLevelPolicy>().is_err());
    }
}
