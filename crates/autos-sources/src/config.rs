//! Configuration for upstream sources.
//!
//! Loads aggregator settings, HTTP behaviour and tribunal overrides from TOML.

use crate::registry::TribunalEntry;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Source configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Field present but unusable
    #[error("Invalid configuration field {0}: {1}")]
    Invalid(String, String),
}

/// Upstream source settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// National aggregator base URL
    #[serde(default = "default_aggregator_endpoint")]
    pub aggregator_endpoint: String,

    /// Aggregator API key, sent as `Authorization: APIKey <key>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per fetch, including the first
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// User-Agent header for direct scraping
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Extra or replacement tribunal entries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tribunals: Vec<TribunalEntry>,
}

fn default_aggregator_endpoint() -> String {
    "https://api-publica.datajud.cnj.jus.br".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36"
        .to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            aggregator_endpoint: default_aggregator_endpoint(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            user_agent: default_user_agent(),
            tribunals: Vec::new(),
        }
    }
}

impl SourceConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: SourceConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.aggregator_endpoint.starts_with("http://")
            && !self.aggregator_endpoint.starts_with("https://")
        {
            return Err(ConfigError::Invalid(
                "aggregator_endpoint".to_string(),
                "must be an http(s) URL".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs".to_string(),
                "must be greater than 0".to_string(),
            ));
        }
        if self.max_retries == 0 {
            return Err(ConfigError::Invalid(
                "max_retries".to_string(),
                "must be greater than 0".to_string(),
            ));
        }
        if let Some(entry) = self.tribunals.iter().find(|t| t.code.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "tribunals.code".to_string(),
                format!("empty code for '{}'", entry.name),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FetchStrategy;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SourceConfig::default();
        assert_eq!(config.aggregator_endpoint, "https://api-publica.datajud.cnj.jus.br");
        assert_eq!(config.max_retries, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            api_key = "secret"
            timeout_secs = 10

            [[tribunals]]
            code = "TJGO"
            name = "Tribunal de Justiça de Goiás"
            base_url = "https://projudi.tjgo.jus.br"
            strategy = { kind = "aggregator", alias = "tjgo" }
            api_available = true

            [[tribunals]]
            code = "TJMG"
            name = "TJMG"
            base_url = "https://pje.tjmg.jus.br"
            strategy = { kind = "not_implemented" }
        "#;

        let config: SourceConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.tribunals.len(), 2);
        assert_eq!(config.tribunals[1].strategy, FetchStrategy::NotImplemented);
    }

    #[test]
    fn test_validate_rejects_zero_retries() {
        let config = SourceConfig {
            max_retries: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(field, _)) if field == "max_retries"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "aggregator_endpoint = \"ftp://nope\"").unwrap();
        assert!(matches!(
            SourceConfig::from_file(file.path()),
            Err(ConfigError::Invalid(..))
        ));

        assert!(matches!(
            SourceConfig::from_file("/nonexistent/autos.toml"),
            Err(ConfigError::FileRead(_))
        ));
    }
}
