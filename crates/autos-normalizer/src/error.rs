//! Error types for the Normalizer

use thiserror::Error;

/// Errors that can occur around normalization
///
/// Mapping a parsed document never fails; these only cover getting a
/// document in and configuring the engine.
#[derive(Error, Debug)]
pub enum NormalizerError {
    /// Input text is not JSON
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for NormalizerError {
    fn from(e: serde_json::Error) -> Self {
        NormalizerError::JsonParse(e.to_string())
    }
}
