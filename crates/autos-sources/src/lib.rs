//! Autos Source Layer
//!
//! Retrieves raw process documents from tribunals.
//!
//! # Architecture
//!
//! A [`TribunalRegistry`] maps tribunal codes to a [`FetchStrategy`]. Anything
//! implementing [`ProcessSource`] turns a registry entry plus a process number
//! into a raw JSON document for the normalizer.
//!
//! # Sources
//!
//! - `MockSource`: canned documents for testing
//! - `SourceClient`: HTTP against tribunal sites and the national aggregator
//!
//! # Examples
//!
//! ```
//! use autos_sources::{MockSource, ProcessSource, TribunalRegistry};
//! use serde_json::json;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let mut source = MockSource::new();
//! source.add_document("123", json!({ "numeroProcesso": "123" }));
//!
//! let registry = TribunalRegistry::with_defaults();
//! let outcome = source.fetch(registry.get("TJSP").unwrap(), "123").await.unwrap();
//! assert_eq!(outcome.document["numeroProcesso"], "123");
//! # });
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod registry;

use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

pub use client::SourceClient;
pub use config::{ConfigError, SourceConfig};
pub use registry::{FetchStrategy, RegistryError, TribunalEntry, TribunalRegistry};

/// Errors that can occur while fetching a process
#[derive(Error, Debug)]
pub enum SourceError {
    /// Network or transport failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// Upstream answered with a non-success status
    #[error("Server error (HTTP {status}): {body}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// Body was not the JSON we expected
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Upstream has no such process
    #[error("Process not found: {0}")]
    NotFound(String),

    /// Tribunal has no retrieval path
    #[error("Tribunal not supported: {0}")]
    Unsupported(String),
}

impl SourceError {
    /// HTTP status carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SourceError::Server { status, .. } => Some(*status),
            SourceError::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

/// A successfully retrieved raw document
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// Raw source document
    pub document: Value,

    /// URL that answered
    pub url: String,

    /// HTTP method used
    pub method: &'static str,

    /// Final HTTP status
    pub status_code: u16,

    /// Wall time spent, retries included
    pub elapsed_ms: u64,
}

/// Something that can retrieve raw process documents
#[allow(async_fn_in_trait)]
pub trait ProcessSource {
    /// Method and URL a fetch of `number` from `tribunal` is sent to
    ///
    /// `None` when the tribunal has no retrieval path.
    fn target(&self, tribunal: &TribunalEntry, number: &str) -> Option<(&'static str, String)>;

    /// Fetch process `number` from `tribunal`
    async fn fetch(&self, tribunal: &TribunalEntry, number: &str) -> Result<FetchOutcome, SourceError>;
}

/// Mock source for deterministic testing
///
/// Serves documents registered by process number, regardless of tribunal,
/// without any network calls. Targets are the ones the HTTP client would use
/// against the default aggregator endpoint.
#[derive(Debug, Clone)]
pub struct MockSource {
    documents: HashMap<String, Value>,
    failures: HashMap<String, u16>,
    aggregator_endpoint: String,
    call_count: Arc<AtomicUsize>,
}

impl Default for MockSource {
    fn default() -> Self {
        Self {
            documents: HashMap::new(),
            failures: HashMap::new(),
            aggregator_endpoint: SourceConfig::default().aggregator_endpoint,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl MockSource {
    /// Create an empty mock source
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` for `number`
    pub fn add_document(&mut self, number: impl Into<String>, document: Value) {
        self.documents.insert(number.into(), document);
    }

    /// Answer `number` with an HTTP error status
    pub fn add_failure(&mut self, number: impl Into<String>, status: u16) {
        self.failures.insert(number.into(), status);
    }

    /// Number of fetches made, across clones
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl ProcessSource for MockSource {
    fn target(&self, tribunal: &TribunalEntry, number: &str) -> Option<(&'static str, String)> {
        tribunal.target(&self.aggregator_endpoint, number)
    }

    async fn fetch(&self, tribunal: &TribunalEntry, number: &str) -> Result<FetchOutcome, SourceError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let started = Instant::now();

        let (method, url) = self
            .target(tribunal, number)
            .ok_or_else(|| SourceError::Unsupported(tribunal.code.clone()))?;
        if let Some(&status) = self.failures.get(number) {
            return Err(SourceError::Server {
                status,
                body: "mock failure".to_string(),
            });
        }

        let document = self
            .documents
            .get(number)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(number.to_string()))?;

        Ok(FetchOutcome {
            document,
            url,
            method,
            status_code: 200,
            elapsed_ms: started.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_serves_documents() {
        let mut source = MockSource::new();
        source.add_document("1", json!({ "numero": "1" }));
        let registry = TribunalRegistry::with_defaults();

        let outcome = source.fetch(registry.get("TJMG").unwrap(), "1").await.unwrap();
        assert_eq!(outcome.document, json!({ "numero": "1" }));
        assert_eq!(outcome.method, "GET");
        assert_eq!(outcome.url, "https://pje-consulta-publica.tjmg.jus.br/1");

        let missing = source.fetch(registry.get("TJMG").unwrap(), "2").await;
        assert!(matches!(missing, Err(SourceError::NotFound(n)) if n == "2"));
    }

    #[tokio::test]
    async fn test_mock_failures_and_unsupported() {
        let mut source = MockSource::new();
        source.add_failure("1", 503);
        let registry = TribunalRegistry::with_defaults();

        let err = source.fetch(registry.get("TJSP").unwrap(), "1").await.unwrap_err();
        assert_eq!(err.status_code(), Some(503));

        let err = source.fetch(registry.get("TJBA").unwrap(), "1").await.unwrap_err();
        assert!(matches!(err, SourceError::Unsupported(_)));
        assert_eq!(err.status_code(), None);
    }

    #[tokio::test]
    async fn test_call_count_shared_across_clones() {
        let source = MockSource::new();
        let clone = source.clone();
        let registry = TribunalRegistry::with_defaults();

        let _ = clone.fetch(registry.get("TJRS").unwrap(), "x").await;
        let _ = source.fetch(registry.get("TJRS").unwrap(), "x").await;
        assert_eq!(source.call_count(), 2);
    }
}
