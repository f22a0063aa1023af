//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{ProcessId, ProcessRecord};

/// Trait for persisting normalized records
///
/// Implemented by the infrastructure layer (autos-store)
pub trait ProcessSink {
    /// Error type for sink operations
    type Error;

    /// Insert or replace a record keyed by `(tribunal, record.number)`
    ///
    /// Child collections (parties, movements) are replaced wholesale.
    /// Movements get a 1-based ordinal in the order they appear in `record`.
    fn upsert_process(
        &mut self,
        tribunal: &str,
        record: &ProcessRecord,
        raw_source: Option<&str>,
    ) -> Result<ProcessId, Self::Error>;

    /// Read a stored record back
    fn get_process(&self, tribunal: &str, number: &str)
        -> Result<Option<ProcessRecord>, Self::Error>;

    /// Append one upstream fetch attempt to the audit log
    fn record_fetch(&mut self, log: &FetchLog) -> Result<(), Self::Error>;
}

/// Outcome of one attempt to fetch a process from an upstream source
#[derive(Debug, Clone, Default)]
pub struct FetchLog {
    /// Tribunal code (e.g. "TJMG")
    pub tribunal: String,

    /// URL that was requested
    pub url: String,

    /// HTTP method used
    pub method: String,

    /// Whether a document was obtained
    pub success: bool,

    /// HTTP status, when a response arrived
    pub status_code: Option<u16>,

    /// Wall time of the attempt
    pub elapsed_ms: Option<u64>,

    /// Number of processes collected
    pub processes_collected: u32,

    /// Error details for failed attempts
    pub error: Option<String>,
}
