//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source configuration error
    #[error(transparent)]
    SourceConfig(#[from] autos_sources::ConfigError),

    /// Upstream fetch error
    #[error("Fetch failed: {0}")]
    Source(#[from] autos_sources::SourceError),

    /// Unknown tribunal
    #[error(transparent)]
    Registry(#[from] autos_sources::RegistryError),

    /// Storage error
    #[error("Storage error: {0}")]
    Store(#[from] autos_store::StoreError),

    /// Normalizer error
    #[error(transparent)]
    Normalizer(#[from] autos_normalizer::NormalizerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Nothing stored under the given key
    #[error("Not found: {0}")]
    NotFound(String),
}
