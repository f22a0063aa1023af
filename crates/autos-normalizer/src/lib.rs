//! Autos Normalizer
//!
//! Maps arbitrarily shaped court responses into the canonical
//! [`ProcessRecord`](autos_domain::ProcessRecord).
//!
//! # Overview
//!
//! Every upstream source (a tribunal's own consultation site, the national
//! DataJud aggregator, an MNI envelope) nests the same information differently.
//! Instead of one deserializer per source, the normalizer walks the document
//! with ordered candidate lists: the first field name or container shape that
//! yields something usable wins.
//!
//! # Architecture
//!
//! ```text
//! serde_json::Value → probe / container → parties + timeline → mapper → ProcessRecord
//! ```
//!
//! The engine is synchronous, allocation-only and total: a sparse or
//! malformed document degrades to default labels and empty lists, it never
//! returns an error. Tax identifiers that fail the digit-count check are
//! dropped, not shown half-masked.
//!
//! # Example Usage
//!
//! ```
//! use autos_normalizer::{map_process_data_from_source, Normalizer, NormalizerConfig};
//! use serde_json::json;
//!
//! let source = json!({
//!     "dadosBasicos": {
//!         "numeroProcesso": "5202268-77.2022.8.13.0024",
//!         "classeProcessual": { "descricao": "CUMPRIMENTO DE SENTENÇA" }
//!     },
//!     "poloAtivo": [{ "nome": "DIEGO", "cpf": "11545111626" }]
//! });
//!
//! let record = map_process_data_from_source(&source, "5202268-77.2022.8.13.0024");
//! assert_eq!(record.case_class, "CUMPRIMENTO DE SENTENÇA");
//! assert_eq!(record.claimant_parties[0].tax_id.as_deref(), Some("115.451.116-26"));
//!
//! let normalizer = Normalizer::new(NormalizerConfig::en_us());
//! let empty = normalizer.normalize(&json!({}), "999");
//! assert_eq!(empty.subject, "Not informed");
//! ```

#![warn(missing_docs)]

mod config;
mod error;

pub mod container;
pub mod dates;
pub mod document;
pub mod mapper;
pub mod parties;
pub mod probe;
pub mod timeline;


pub use config::{DefaultLabels, NormalizerConfig};
pub use document::{format_case_number, is_valid_case_number, mask_org_id, mask_person_id};
pub use error::NormalizerError;
pub use mapper::{map_process_data_from_source, Normalizer};
pub use probe::FieldPath;
