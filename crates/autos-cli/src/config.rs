//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use autos_normalizer::NormalizerConfig;
use autos_sources::SourceConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// SQLite database file (defaults to `~/.autos/autos.db`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Upstream sources
    #[serde(default)]
    pub sources: SourceConfig,

    /// Normalization labels and date formats
    #[serde(default)]
    pub normalizer: NormalizerConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Tribunal used when a command gets no `--tribunal`
    #[serde(default = "default_tribunal")]
    pub default_tribunal: String,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Directory holding the config file and default database.
    pub fn home() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".autos"))
    }

    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::home()?.join("config.toml"))
    }

    /// Load configuration from the default location, or defaults if absent.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check nested sections.
    pub fn validate(&self) -> Result<()> {
        self.sources.validate()?;
        self.normalizer.validate().map_err(CliError::Config)?;
        if self.settings.default_tribunal.trim().is_empty() {
            return Err(CliError::Config("settings.default_tribunal must not be empty".into()));
        }
        Ok(())
    }

    /// Database file to open, creating its directory if needed.
    pub fn database_path(&self) -> Result<PathBuf> {
        let path = match &self.database_path {
            Some(path) => path.clone(),
            None => Self::home()?.join("autos.db"),
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(path)
    }

    /// Tribunal to use, given an optional command-line override.
    pub fn tribunal_code<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested.unwrap_or(&self.settings.default_tribunal)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            default_tribunal: default_tribunal(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_tribunal() -> String {
    "TJMG".to_string()
}
