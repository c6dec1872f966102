//! Configuration for the remote search service connections.
//!
//! The service exposes two endpoints families — ingestion (indexing,
//! deletion) and search — each addressed with its own URL, API key and
//! target database. Configuration is loaded from a TOML file; API keys can
//! be overridden from the environment.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding the ingestion API key
pub const INGESTION_API_KEY_ENV: &str = "SEARCHGATE_INGESTION_API_KEY";

/// Environment variable overriding the search API key
pub const SEARCH_API_KEY_ENV: &str = "SEARCHGATE_SEARCH_API_KEY";

/// Connection settings for one service endpoint family.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Service base URL
    pub url: String,

    /// API key identifying the client application
    pub api_key: String,

    /// Target database (index) name
    pub database: String,
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("url", &self.url)
            .field("api_key", &"***REDACTED***")
            .field("database", &self.database)
            .finish()
    }
}

/// Main configuration: one connection per endpoint family.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchGateConfig {
    pub ingestion: ServiceConfig,
    pub search: ServiceConfig,
}

impl SearchGateConfig {
    /// Loads the configuration from a TOML file and applies environment
    /// overrides.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config file: {e}")))?;
        let mut config: Self = toml::from_str(&contents)
            .map_err(|e| Error::config(format!("Failed to parse config file: {e}")))?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Replaces API keys with the values of the dedicated environment
    /// variables, when set. Keys stay out of checked-in config files this
    /// way.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(INGESTION_API_KEY_ENV) {
            self.ingestion.api_key = key;
        }
        if let Ok(key) = std::env::var(SEARCH_API_KEY_ENV) {
            self.search.api_key = key;
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        for (name, service) in [("ingestion", &self.ingestion), ("search", &self.search)] {
            if service.url.trim().is_empty() {
                return Err(Error::config(format!("{name}.url must not be empty")));
            }
            if !service.url.starts_with("http://") && !service.url.starts_with("https://") {
                return Err(Error::config(format!(
                    "{name}.url must be an http(s) URL, got '{}'",
                    service.url
                )));
            }
            if service.api_key.trim().is_empty() {
                return Err(Error::config(format!("{name}.api_key must not be empty")));
            }
            if service.database.trim().is_empty() {
                return Err(Error::config(format!("{name}.database must not be empty")));
            }
        }
        Ok(())
    }

    /// Saves the configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, toml_string)
            .map_err(|e| Error::config(format!("Failed to write config file: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_config() -> SearchGateConfig {
        SearchGateConfig {
            ingestion: ServiceConfig {
                url: "https://ingestion.example.org".to_string(),
                api_key: "ingest-key".to_string(),
                database: "DEMO".to_string(),
            },
            search: ServiceConfig {
                url: "https://search.example.org".to_string(),
                api_key: "search-key".to_string(),
                database: "DEMO".to_string(),
            },
        }
    }

    #[test]
    fn test_config_round_trips_through_toml_file() {
        let config = sample_config();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("searchgate.toml");

        config.save(&path).unwrap();
        let loaded = SearchGateConfig::from_file(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let mut config = sample_config();
        config.search.api_key = String::new();

        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("search.api_key"));
    }

    #[test]
    fn test_validate_rejects_non_http_urls() {
        let mut config = sample_config();
        config.ingestion.url = "ftp://example.org".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_output_redacts_api_keys() {
        let rendered = format!("{:?}", sample_config());
        assert!(!rendered.contains("search-key"));
        assert!(rendered.contains("***REDACTED***"));
    }
}
