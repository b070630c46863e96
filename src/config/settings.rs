//! Settings structures for the persisted search engine collection

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::engines::SearchEngine;

/// Main settings structure persisted as search-engines.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub engines: Vec<EngineRecord>,
    /// Name of the default engine; must match one of the records
    pub default_engine: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engines: default_engines(),
            default_engine: "DuckDuckGo".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Write settings to a YAML file, creating parent directories as needed
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Merge with environment variables (OPENSEARCH_RS_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("OPENSEARCH_RS_DEFAULT_ENGINE") {
            self.default_engine = val;
        }
    }

    /// Get record by engine name
    pub fn get_engine(&self, name: &str) -> Option<&EngineRecord> {
        self.engines.iter().find(|e| e.name == name)
    }
}

/// One persisted search engine. Suggestions and description addresses are
/// session state and are not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineRecord {
    /// Display name (unique identifier)
    pub name: String,
    /// Search address with the search term as %s
    pub url: String,
    /// Bang shortcut, empty when none is set
    pub bang: String,
}

impl From<&EngineRecord> for SearchEngine {
    fn from(record: &EngineRecord) -> Self {
        SearchEngine::new()
            .with_name(record.name.as_str())
            .with_url(record.url.as_str())
            .with_bang(record.bang.as_str())
    }
}

impl From<&SearchEngine> for EngineRecord {
    fn from(engine: &SearchEngine) -> Self {
        Self {
            name: engine.name().to_string(),
            url: engine.url().to_string(),
            bang: engine.bang().to_string(),
        }
    }
}

/// Built-in engine set used when no settings exist yet
pub fn default_engines() -> Vec<EngineRecord> {
    vec![
        EngineRecord {
            name: "DuckDuckGo".to_string(),
            url: "https://duckduckgo.com/?q=%s".to_string(),
            bang: "!ddg".to_string(),
        },
        EngineRecord {
            name: "Google".to_string(),
            url: "https://www.google.com/search?q=%s".to_string(),
            bang: "!g".to_string(),
        },
        EngineRecord {
            name: "Bing".to_string(),
            url: "https://www.bing.com/search?q=%s".to_string(),
            bang: "!b".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.engines.len(), 3);
        assert_eq!(settings.default_engine, "DuckDuckGo");
        let google = settings.get_engine("Google");
        assert!(google.is_some());
        assert_eq!(google.unwrap().bang, "!g");
    }

    #[test]
    fn test_yaml_round_trip() {
        let settings = Settings::default();
        let yaml = serde_yaml::to_string(&settings).unwrap();
        let parsed: Settings = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.engines, settings.engines);
        assert_eq!(parsed.default_engine, settings.default_engine);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let parsed: Settings = serde_yaml::from_str("engines: []\n").unwrap();
        assert!(parsed.engines.is_empty());
        assert_eq!(parsed.default_engine, "DuckDuckGo");

        let record: EngineRecord =
            serde_yaml::from_str("name: Qwant\nurl: https://www.qwant.com/?q=%s\n").unwrap();
        assert_eq!(record.bang, "");
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "opensearch-rs-settings-test-{}.yml",
            std::process::id()
        ));
        let settings = Settings::default();
        settings.to_file(&path).unwrap();
        let loaded = Settings::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.engines, settings.engines);
        assert_eq!(loaded.default_engine, settings.default_engine);
    }

    #[test]
    fn test_record_engine_conversions() {
        let record = EngineRecord {
            name: "Wikipedia".to_string(),
            url: "https://wikipedia.org/%s".to_string(),
            bang: "!w".to_string(),
        };
        let engine = SearchEngine::from(&record);
        assert_eq!(engine.name(), "Wikipedia");
        assert_eq!(engine.url(), "https://wikipedia.org/%s");
        assert_eq!(engine.bang(), "!w");
        assert_eq!(engine.suggestions_url(), None);
        assert_eq!(engine.opensearch_url(), None);

        assert_eq!(EngineRecord::from(&engine), record);
    }
}
