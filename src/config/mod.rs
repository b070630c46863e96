//! Configuration module for opensearch-rs
//!
//! Handles loading and saving the persisted engine collection from YAML
//! files and environment variables.

mod settings;

pub use settings::*;

use std::path::PathBuf;

/// Environment variable overriding the settings file location.
pub const SETTINGS_ENV: &str = "OPENSEARCH_RS_SETTINGS";

/// Resolve the settings file to use: the `OPENSEARCH_RS_SETTINGS` override,
/// then `./search-engines.yml` if present, then the per-user configuration
/// directory.
pub fn settings_file() -> PathBuf {
    if let Ok(path) = std::env::var(SETTINGS_ENV) {
        return PathBuf::from(path);
    }
    let local = PathBuf::from("search-engines.yml");
    if local.exists() {
        return local;
    }
    dirs::config_dir()
        .map(|dir| dir.join("opensearch-rs").join("search-engines.yml"))
        .unwrap_or(local)
}
