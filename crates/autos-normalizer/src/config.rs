//! Configuration for the Normalizer

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder strings used when a field cannot be resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultLabels {
    /// Case class, subject, jurisdiction and judging body
    pub not_informed: String,

    /// Party name
    pub party_name: String,

    /// Party status
    pub party_status: String,

    /// Party role
    pub party_role: String,
}

/// Configuration for the Normalizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Locale defaults for unresolved fields
    pub labels: DefaultLabels,

    /// chrono format for date-only values (distribution date)
    pub date_format: String,

    /// chrono format for timestamps (movements)
    pub datetime_format: String,

    /// Offset timestamps carrying a zone are converted to, in minutes east of UTC
    pub utc_offset_minutes: i32,
}

impl NormalizerConfig {
    /// Offset used when rendering zoned timestamps
    ///
    /// Falls back to UTC for out-of-range values; [`validate`](Self::validate)
    /// rejects those up front.
    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let labels = [
            ("labels.not_informed", &self.labels.not_informed),
            ("labels.party_name", &self.labels.party_name),
            ("labels.party_status", &self.labels.party_status),
            ("labels.party_role", &self.labels.party_role),
        ];
        for (name, value) in labels {
            if value.trim().is_empty() {
                return Err(format!("{} must not be empty", name));
            }
        }
        if self.date_format.is_empty() {
            return Err("date_format must not be empty".to_string());
        }
        if self.datetime_format.is_empty() {
            return Err("datetime_format must not be empty".to_string());
        }
        if self.utc_offset_minutes.abs() > 14 * 60 {
            return Err("utc_offset_minutes must be within ±840".to_string());
        }
        Ok(())
    }
}

impl Default for DefaultLabels {
    fn default() -> Self {
        Self {
            not_informed: "Não informado".to_string(),
            party_name: "Nome não informado".to_string(),
            party_status: "Parte".to_string(),
            party_role: "Não informado".to_string(),
        }
    }
}

impl Default for NormalizerConfig {
    /// Brazilian Portuguese labels, day-first dates, Brasília time
    fn default() -> Self {
        Self {
            labels: DefaultLabels::default(),
            date_format: "%d/%m/%Y".to_string(),
            datetime_format: "%d/%m/%Y %H:%M:%S".to_string(),
            utc_offset_minutes: -180,
        }
    }
}

impl NormalizerConfig {
    /// English labels, month-first dates, UTC
    pub fn en_us() -> Self {
        Self {
            labels: DefaultLabels {
                not_informed: "Not informed".to_string(),
                party_name: "Name not informed".to_string(),
                party_status: "Party".to_string(),
                party_role: "Not informed".to_string(),
            },
            date_format: "%m/%d/%Y".to_string(),
            datetime_format: "%m/%d/%Y %I:%M:%S %p".to_string(),
            utc_offset_minutes: 0,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
