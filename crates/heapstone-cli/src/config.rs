//! Configuration loading for the CLI.
//!
//! Settings come from an optional TOML file and are then overridden by
//! command-line flags.

use std::path::Path;

use anyhow::{Context, Result};
use heapstone_common::config::EngineConfig;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "HEAPSTONE_LOG";

/// Loads the engine configuration.
///
/// `page_size` overrides whatever the file says.
pub fn load_config(path: Option<&Path>, page_size: Option<usize>) -> Result<EngineConfig> {
    let mut config = match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    if let Some(page_size) = page_size {
        config.storage.page_size = page_size;
    }
    config.validate()?;
    Ok(config)
}

/// Picks the tracing filter: the environment wins, then `--verbose`, then
/// the configured filter.
pub fn log_filter(env: Option<String>, verbose: bool, config: &EngineConfig) -> String {
    match env {
        Some(filter) if !filter.trim().is_empty() => filter,
        _ if verbose => "debug".to_string(),
        _ => config.log_filter.clone(),
    }
}
