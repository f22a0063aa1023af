//! Process module - the canonical record every source is mapped into

use crate::{Movement, Party};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to a stored process, backed by a UUIDv7
///
/// UUIDv7 keeps ids sortable by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessId(u128);

impl ProcessId {
    /// Generate a new UUIDv7-based ProcessId
    ///
    /// # Examples
    ///
    /// ```
    /// use autos_domain::ProcessId;
    ///
    /// let id = ProcessId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a ProcessId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a ProcessId from its hyphenated UUID string
    ///
    /// # Examples
    ///
    /// ```
    /// use autos_domain::ProcessId;
    ///
    /// let id = ProcessId::new();
    /// let parsed = ProcessId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid process id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Milliseconds since Unix epoch encoded in the id
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are the Unix millisecond timestamp
        (self.0 >> 80) as u64
    }
}

impl Default for ProcessId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// The normalized record for one judicial process
///
/// Built fresh for every lookup and never mutated afterwards. Scalar fields
/// always hold a displayable value: either what the source provided or the
/// locale default chosen by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRecord {
    /// Case identifier, never empty
    pub number: String,

    /// Display date of distribution, or empty when unknown
    pub distribution_date: String,

    /// Procedural class (e.g. "Procedimento Comum Cível")
    pub case_class: String,

    /// Subject matter of the suit
    pub subject: String,

    /// Jurisdiction (district) the case belongs to
    pub jurisdiction: String,

    /// Court body in charge of the case
    pub judging_body: String,

    /// Claimant-side roster, in source order
    pub claimant_parties: Vec<Party>,

    /// Respondent-side roster, in source order
    pub respondent_parties: Vec<Party>,

    /// Timeline in source order; no re-sorting is applied
    pub movements: Vec<Movement>,
}

impl ProcessRecord {
    /// Iterate over every party together with the side it belongs to
    pub fn parties(&self) -> impl Iterator<Item = (crate::PartySide, &Party)> {
        self.claimant_parties
            .iter()
            .map(|p| (crate::PartySide::Claimant, p))
            .chain(
                self.respondent_parties
                    .iter()
                    .map(|p| (crate::PartySide::Respondent, p)),
            )
    }
}
