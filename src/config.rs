//! Catalog configuration loaded from YAML or JSON

use crate::catalog::{WeightTable, FIRST_ID};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings for a new [`ReferenceDatabase`](crate::ReferenceDatabase)
///
/// ```yaml
/// first_id: 1001
/// weights:
///   book: 2.0
///   journal_article: 1.5
///   conference_paper: 1.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// First id handed out by the database
    pub first_id: u64,
    /// Per-kind weights for the author citation index
    pub weights: WeightTable,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            first_id: FIRST_ID,
            weights: WeightTable::default(),
        }
    }
}

impl CatalogConfig {
    /// Load from a file; `.yaml`/`.yml` is parsed as YAML, anything else as JSON
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
        if is_yaml {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_partial_config_keeps_defaults() {
        let config = CatalogConfig::from_yaml("weights:\n  book: 2.5\n").unwrap();
        assert_eq!(config.first_id, 1001);
        assert_eq!(config.weights.book, 2.5);
        assert_eq!(config.weights.journal_article, 1.0);
    }

    #[test]
    fn test_json_config() {
        let config =
            CatalogConfig::from_json(r#"{"first_id": 5000, "weights": {"conference_paper": 0.5}}"#).unwrap();
        assert_eq!(config.first_id, 5000);
        assert_eq!(config.weights.conference_paper, 0.5);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(matches!(CatalogConfig::from_json("{"), Err(ConfigError::Json(_))));
        assert!(matches!(CatalogConfig::from_yaml("first_id: [1"), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CatalogConfig::load("/nonexistent/citegraph.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
