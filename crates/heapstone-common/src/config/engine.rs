//! Engine configuration structures.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MIN_PAGE_SIZE};
use crate::error::{HeapstoneError, HeapstoneResult};

/// Top-level configuration.
///
/// # Example
///
/// ```rust
/// use heapstone_common::config::EngineConfig;
///
/// let config = EngineConfig::from_toml_str("[storage]\npage_size = 8192\n").unwrap();
/// assert_eq!(config.storage.page_size, 8192);
/// assert_eq!(config.log_filter, "info");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Storage configuration.
    pub storage: StorageConfig,

    /// Default `tracing` filter directive for binaries.
    /// Default: "info"
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> HeapstoneResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| HeapstoneError::config(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> HeapstoneResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> HeapstoneResult<()> {
        self.storage.validate()
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Size of each page in bytes. Must be a power of 2.
    /// Default: 4096 (4 KB)
    pub page_size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl StorageConfig {
    /// Creates a storage configuration with the given page size.
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        Self { page_size }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> HeapstoneResult<()> {
        if !self.page_size.is_power_of_two() {
            return Err(HeapstoneError::config(format!(
                "page_size must be a power of 2, got {}",
                self.page_size
            )));
        }
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(HeapstoneError::config(format!(
                "page_size must be between {MIN_PAGE_SIZE} and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.storage.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_page_size_validation() {
        assert!(StorageConfig::with_page_size(1000).validate().is_err());
        assert!(StorageConfig::with_page_size(128).validate().is_err());
        assert!(StorageConfig::with_page_size(1 << 20).validate().is_err());
        assert!(StorageConfig::with_page_size(512).validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str("log_filter = \"debug\"").unwrap();
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let err = EngineConfig::from_toml_str("[storage]\npage_size = 3000\n").unwrap_err();
        assert!(matches!(err, HeapstoneError::Config { .. }));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heapstone.toml");
        let config = EngineConfig {
            storage: StorageConfig::with_page_size(1024),
            log_filter: "heapstone=trace".to_string(),
        };
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        assert_eq!(EngineConfig::from_file(&path).unwrap(), config);
    }
}
