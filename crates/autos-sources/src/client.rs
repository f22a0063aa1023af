//! HTTP source client
//!
//! Retrieves raw process documents either straight from a tribunal's public
//! consultation endpoint or from the national aggregator's per-tribunal index.
//!
//! # Features
//!
//! - Async HTTP via reqwest
//! - Strategy dispatch from the [`TribunalEntry`]
//! - Retry logic with exponential backoff
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use autos_sources::{ProcessSource, SourceClient, SourceConfig, TribunalRegistry};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SourceClient::new(&SourceConfig::default())?;
//! let registry = TribunalRegistry::with_defaults();
//! let outcome = client.fetch(registry.get("TJSP")?, "0001234-56.2023.8.26.0100").await?;
//! println!("{}", outcome.document);
//! # Ok(())
//! # }
//! ```

use crate::config::SourceConfig;
use crate::registry::{FetchStrategy, TribunalEntry};
use crate::{FetchOutcome, ProcessSource, SourceError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// reqwest-backed [`ProcessSource`]
#[derive(Debug, Clone)]
pub struct SourceClient {
    client: reqwest::Client,
    aggregator_endpoint: String,
    api_key: Option<String>,
    max_retries: u32,
}

/// A request to issue, with the pieces the fetch log records
struct Request {
    method: &'static str,
    url: String,
    body: Option<Value>,
}

impl SourceClient {
    /// Build a client from configuration
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/html;q=0.9, */*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("pt-BR,pt;q=0.9,en;q=0.8"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| SourceError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            aggregator_endpoint: config.aggregator_endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            max_retries: config.max_retries.max(1),
        })
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    fn request(&self, tribunal: &TribunalEntry, number: &str) -> Result<Request, SourceError> {
        let (method, url) = tribunal
            .target(&self.aggregator_endpoint, number)
            .ok_or_else(|| SourceError::Unsupported(tribunal.code.clone()))?;
        let body = match &tribunal.strategy {
            FetchStrategy::Aggregator { .. } => {
                let digits: String = number.chars().filter(char::is_ascii_digit).collect();
                Some(json!({ "query": { "match": { "numeroProcesso": digits } } }))
            }
            _ => None,
        };
        Ok(Request { method, url, body })
    }

    async fn send(&self, request: &Request) -> Result<reqwest::Response, reqwest::Error> {
        let builder = match &request.body {
            Some(body) => {
                let mut builder = self.client.post(&request.url).json(body);
                if let Some(key) = &self.api_key {
                    builder = builder.header("Authorization", format!("APIKey {}", key));
                }
                builder
            }
            None => self.client.get(&request.url),
        };
        builder.send().await
    }

    /// Issue `request`, retrying transient failures
    async fn execute(&self, request: &Request, number: &str) -> Result<(u16, Value), SourceError> {
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.send(request).await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return match response.json::<Value>().await {
                            Ok(body) => Ok((status.as_u16(), body)),
                            Err(e) => Err(SourceError::InvalidResponse(format!(
                                "Failed to parse response: {}",
                                e
                            ))),
                        };
                    } else if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(SourceError::NotFound(number.to_string()));
                    } else {
                        let body = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(SourceError::Server {
                            status: status.as_u16(),
                            body,
                        });
                    }
                }
                Err(e) => {
                    last_error = Some(SourceError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                warn!(url = %request.url, attempt = attempts, ?delay, "fetch failed, retrying");
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| SourceError::Communication("Max retries exceeded".to_string())))
    }
}

impl ProcessSource for SourceClient {
    fn target(&self, tribunal: &TribunalEntry, number: &str) -> Option<(&'static str, String)> {
        tribunal.target(&self.aggregator_endpoint, number)
    }

    async fn fetch(&self, tribunal: &TribunalEntry, number: &str) -> Result<FetchOutcome, SourceError> {
        let request = self.request(tribunal, number)?;
        debug!(tribunal = %tribunal.code, method = request.method, url = %request.url, "fetching process");

        let started = Instant::now();
        let (status_code, body) = self.execute(&request, number).await?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let document = match tribunal.strategy {
            FetchStrategy::Aggregator { .. } => first_hit(body, number)?,
            _ => body,
        };

        Ok(FetchOutcome {
            document,
            url: request.url,
            method: request.method,
            status_code,
            elapsed_ms,
        })
    }
}

/// `_source` of the first search hit
fn first_hit(mut body: Value, number: &str) -> Result<Value, SourceError> {
    body.pointer_mut("/hits/hits/0/_source")
        .map(Value::take)
        .ok_or_else(|| SourceError::NotFound(number.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TribunalRegistry;

    fn client() -> SourceClient {
        SourceClient::new(&SourceConfig::default()).unwrap()
    }

    #[test]
    fn test_direct_target() {
        let registry = TribunalRegistry::with_defaults();
        let (method, url) = client()
            .target(registry.get("TJMG").unwrap(), " 5202268-77.2022.8.13.0024 ")
            .unwrap();
        assert_eq!(method, "GET");
        assert_eq!(
            url,
            "https://pje-consulta-publica.tjmg.jus.br/5202268-77.2022.8.13.0024"
        );
    }

    #[test]
    fn test_aggregator_request_uses_digits() {
        let registry = TribunalRegistry::with_defaults();
        let request = client()
            .request(registry.get("TJSP").unwrap(), "0001234-56.2023.8.26.0100")
            .unwrap();

        assert_eq!(request.method, "POST");
        assert_eq!(
            request.url,
            "https://api-publica.datajud.cnj.jus.br/api_publica_tjsp/_search"
        );
        assert_eq!(
            request.body.unwrap()["query"]["match"]["numeroProcesso"],
            "00012345620238260100"
        );
    }

    #[test]
    fn test_not_implemented_has_no_target() {
        let registry = TribunalRegistry::with_defaults();
        let tjba = registry.get("TJBA").unwrap();
        assert!(client().target(tjba, "1").is_none());
        assert!(matches!(client().request(tjba, "1"), Err(SourceError::Unsupported(code)) if code == "TJBA"));
    }

    #[test]
    fn test_first_hit() {
        let body = json!({ "hits": { "total": { "value": 1 }, "hits": [
            { "_index": "api_publica_tjsp", "_source": { "numeroProcesso": "123" } }
        ] } });
        assert_eq!(first_hit(body, "123").unwrap(), json!({ "numeroProcesso": "123" }));

        let empty = json!({ "hits": { "hits": [] } });
        assert!(matches!(first_hit(empty, "123"), Err(SourceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let config = SourceConfig {
            aggregator_endpoint: "http://127.0.0.1:1".to_string(),
            timeout_secs: 1,
            ..Default::default()
        };
        let client = SourceClient::new(&config).unwrap().with_max_retries(1);
        let registry = TribunalRegistry::with_defaults();

        let result = client.fetch(registry.get("TJRJ").unwrap(), "1").await;
        assert!(matches!(result, Err(SourceError::Communication(_))));
    }

    #[tokio::test]
    async fn test_fetch_unsupported_short_circuits() {
        let registry = TribunalRegistry::with_defaults();
        let result = client().fetch(registry.get("TJBA").unwrap(), "1").await;
        assert!(matches!(result, Err(SourceError::Unsupported(_))));
    }
}
