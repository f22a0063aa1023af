//! Timeline entries

use serde::{Deserialize, Serialize};

/// One event in a process timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    /// Display date, possibly empty
    pub date: String,

    /// What happened; never empty
    pub description: String,

    /// Linked document reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
}

impl Movement {
    /// Create a new movement
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        document: Option<String>,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            document,
        }
    }
}
