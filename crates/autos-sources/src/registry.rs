//! Tribunal registry: which fetch strategy serves which court
//!
//! Coverage grows one tribunal at a time, so dispatch is a table rather than
//! branching code. Entries come from the built-in defaults and may be
//! overridden or extended from configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Registry error
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Tribunal code not registered
    #[error("Tribunal not found: {0}")]
    TribunalNotFound(String),
}

/// How a tribunal's processes are retrieved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchStrategy {
    /// GET the tribunal's own consultation endpoint
    DirectScrape,
    /// Query the national aggregator under the given index alias
    Aggregator {
        /// Index suffix, e.g. "tjsp" for `api_publica_tjsp`
        alias: String,
    },
    /// Registered but no retrieval path yet
    NotImplemented,
}

impl FetchStrategy {
    /// HTTP method the strategy issues
    pub fn method(&self) -> &'static str {
        match self {
            FetchStrategy::DirectScrape => "GET",
            FetchStrategy::Aggregator { .. } => "POST",
            FetchStrategy::NotImplemented => "NONE",
        }
    }

    /// Short label for listings
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchStrategy::DirectScrape => "direct",
            FetchStrategy::Aggregator { .. } => "aggregator",
            FetchStrategy::NotImplemented => "not implemented",
        }
    }
}

/// One row of the dispatch table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TribunalEntry {
    /// Tribunal code, e.g. "TJMG"
    pub code: String,

    /// Display name
    pub name: String,

    /// Public consultation site
    pub base_url: String,

    /// Retrieval strategy
    pub strategy: FetchStrategy,

    /// Whether the tribunal's data is reachable through a structured API
    #[serde(default)]
    pub api_available: bool,
}

impl TribunalEntry {
    fn new(code: &str, name: &str, base_url: &str, strategy: FetchStrategy) -> Self {
        let api_available = matches!(strategy, FetchStrategy::Aggregator { .. });
        Self {
            code: code.to_string(),
            name: name.to_string(),
            base_url: base_url.to_string(),
            strategy,
            api_available,
        }
    }

    fn aggregated(code: &str, name: &str, base_url: &str) -> Self {
        let alias = code.to_lowercase();
        Self::new(code, name, base_url, FetchStrategy::Aggregator { alias })
    }

    /// Method and URL a fetch of `number` is sent to
    ///
    /// Aggregated tribunals are searched under `aggregator_endpoint`; `None`
    /// when the tribunal has no retrieval path.
    pub fn target(&self, aggregator_endpoint: &str, number: &str) -> Option<(&'static str, String)> {
        match &self.strategy {
            FetchStrategy::DirectScrape => Some((
                "GET",
                format!("{}/{}", self.base_url.trim_end_matches('/'), number.trim()),
            )),
            FetchStrategy::Aggregator { alias } => Some((
                "POST",
                format!(
                    "{}/api_publica_{}/_search",
                    aggregator_endpoint.trim_end_matches('/'),
                    alias
                ),
            )),
            FetchStrategy::NotImplemented => None,
        }
    }
}

/// Dispatch table from tribunal code to [`TribunalEntry`]
#[derive(Debug, Clone, Default)]
pub struct TribunalRegistry {
    entries: Vec<TribunalEntry>,
}

impl TribunalRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in tribunals
    pub fn with_defaults() -> Self {
        let entries = vec![
            TribunalEntry::new(
                "TJMG",
                "Tribunal de Justiça de Minas Gerais",
                "https://pje-consulta-publica.tjmg.jus.br",
                FetchStrategy::DirectScrape,
            ),
            TribunalEntry::aggregated("TJSP", "Tribunal de Justiça de São Paulo", "https://esaj.tjsp.jus.br"),
            TribunalEntry::aggregated("TJRJ", "Tribunal de Justiça do Rio de Janeiro", "https://www3.tjrj.jus.br"),
            TribunalEntry::aggregated("TJRS", "Tribunal de Justiça do Rio Grande do Sul", "https://www.tjrs.jus.br"),
            TribunalEntry::aggregated("TJPR", "Tribunal de Justiça do Paraná", "https://projudi.tjpr.jus.br"),
            TribunalEntry::aggregated("TRF1", "Tribunal Regional Federal da 1ª Região", "https://pje1g.trf1.jus.br"),
            TribunalEntry::new(
                "TJBA",
                "Tribunal de Justiça da Bahia",
                "https://consultapublicapje.tjba.jus.br",
                FetchStrategy::NotImplemented,
            ),
        ];
        Self { entries }
    }

    /// Built-in tribunals with `overrides` applied on top
    pub fn from_config(overrides: Vec<TribunalEntry>) -> Self {
        let mut registry = Self::with_defaults();
        for entry in overrides {
            registry.register(entry);
        }
        registry
    }

    /// Register a tribunal, replacing any entry with the same code
    pub fn register(&mut self, mut entry: TribunalEntry) {
        entry.code = entry.code.trim().to_uppercase();
        self.entries.retain(|e| e.code != entry.code);
        self.entries.push(entry);
    }

    /// Look up a tribunal by code, ignoring case
    pub fn get(&self, code: &str) -> Result<&TribunalEntry, RegistryError> {
        let code = code.trim();
        self.entries
            .iter()
            .find(|e| e.code.eq_ignore_ascii_case(code))
            .ok_or_else(|| RegistryError::TribunalNotFound(code.to_string()))
    }

    /// All entries, sorted by code
    pub fn list(&self) -> Vec<&TribunalEntry> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.code.cmp(&b.code));
        entries
    }

    /// Number of registered tribunals
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
