//! Parties to a process and the side they stand on

use serde::{Deserialize, Serialize};

/// One party of a process roster
///
/// `tax_id` only ever holds an already validated, masked identifier. A raw
/// document that fails validation never reaches this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    /// Party name
    pub name: String,

    /// Masked CPF or CNPJ
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,

    /// Participation status (e.g. "Ativo")
    pub status: String,

    /// Procedural role (e.g. "REQUERENTE", "REQUERIDO(A)")
    pub role: String,
}

impl Party {
    /// Create a new party
    pub fn new(
        name: impl Into<String>,
        tax_id: Option<String>,
        status: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            tax_id,
            status: status.into(),
            role: role.into(),
        }
    }

    /// Kind of person this party is, given the side it was found on
    ///
    /// Claimant documents are read as CPF and respondent documents as CNPJ,
    /// so a present tax id alone decides the kind.
    pub fn person_kind(&self, side: PartySide) -> PersonKind {
        match (&self.tax_id, side) {
            (None, _) => PersonKind::Unknown,
            (Some(_), PartySide::Claimant) => PersonKind::Natural,
            (Some(_), PartySide::Respondent) => PersonKind::Legal,
        }
    }
}

/// Side of the suit a party belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartySide {
    /// Polo ativo (plaintiff side)
    Claimant,
    /// Polo passivo (defendant side)
    Respondent,
}

impl PartySide {
    /// Storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PartySide::Claimant => "ativo",
            PartySide::Respondent => "passivo",
        }
    }

    /// Parse the storage representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ativo" => Some(PartySide::Claimant),
            "passivo" => Some(PartySide::Respondent),
            _ => None,
        }
    }
}

/// Natural or legal person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonKind {
    /// Pessoa física (CPF holder)
    Natural,
    /// Pessoa jurídica (CNPJ holder)
    Legal,
    /// No document to tell
    Unknown,
}

impl PersonKind {
    /// Storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonKind::Natural => "fisica",
            PersonKind::Legal => "juridica",
            PersonKind::Unknown => "nao_informado",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_kind_follows_side() {
        let with_doc = Party::new("X", Some("115.451.116-26".into()), "Ativo", "AUTOR");
        let without_doc = Party::new("Y", None, "Ativo", "RÉU");

        assert_eq!(with_doc.person_kind(PartySide::Claimant), PersonKind::Natural);
        assert_eq!(with_doc.person_kind(PartySide::Respondent), PersonKind::Legal);
        assert_eq!(without_doc.person_kind(PartySide::Claimant), PersonKind::Unknown);
    }

    #[test]
    fn test_side_roundtrip() {
        for side in [PartySide::Claimant, PartySide::Respondent] {
            assert_eq!(PartySide::parse(side.as_str()), Some(side));
        }
        assert_eq!(PartySide::parse("terceiro"), None);
    }

    #[test]
    fn test_tax_id_omitted_when_absent() {
        let party = Party::new("A", None, "Parte", "Não informado");
        let json = serde_json::to_string(&party).unwrap();
        assert!(!json.contains("taxId"));
    }
}
