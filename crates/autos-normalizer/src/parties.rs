//! Party roster extraction
//!
//! Explicit rosters (`poloAtivo`, `poloPassivo` and their aliases) are
//! preferred. A side with no explicit roster falls back to the generic
//! `partes` list, partitioned by the polo marker each entry carries.

use crate::config::NormalizerConfig;
use crate::container::{process_scope, resolve_list};
use crate::document::{mask_org_id, mask_person_id};
use crate::probe::{probe, probe_paths, FieldPath};
use autos_domain::{Party, PartySide};
use serde_json::Value;
use tracing::debug;

const CLAIMANT_ROSTERS: &[FieldPath] = &[
    &["poloAtivo"],
    &["partesAtivas"],
    &["autores"],
    &["requerentes"],
    &["dadosBasicos", "poloAtivo"],
    &["dadosBasicos", "partesAtivas"],
    &["dadosBasicos", "autores"],
    &["dadosBasicos", "requerentes"],
];

const RESPONDENT_ROSTERS: &[FieldPath] = &[
    &["poloPassivo"],
    &["partesPassivas"],
    &["reus"],
    &["requeridos"],
    &["dadosBasicos", "poloPassivo"],
    &["dadosBasicos", "partesPassivas"],
    &["dadosBasicos", "reus"],
    &["dadosBasicos", "requeridos"],
];

const GENERIC_ROSTERS: &[FieldPath] = &[
    &["partes"],
    &["envolvidos"],
    &["dadosBasicos", "partes"],
    &["dadosBasicos", "envolvidos"],
];

const POLO_MARKER_FIELDS: &[&str] = &["polo", "tipoPolo", "poloParte", "tipoParte", "tipo"];

const NAME_FIELDS: &[FieldPath] = &[
    &["nome"],
    &["nomeParte"],
    &["nomeCompleto"],
    &["name"],
    &["pessoa", "nome"],
    &["pessoa", "nomeCompleto"],
];

const DOCUMENT_FIELDS: &[FieldPath] = &[
    &["cpf"],
    &["cnpj"],
    &["cpfCnpj"],
    &["documento"],
    &["numeroDocumento"],
    &["pessoa", "numeroDocumentoPrincipal"],
    &["pessoa", "cpf"],
    &["pessoa", "cnpj"],
    &["pessoa", "documento"],
];

const STATUS_FIELDS: &[&str] = &["situacao", "status", "situacaoParte"];

const ROLE_FIELDS: &[&str] = &["tipo", "tipoParte", "papel", "qualificacao", "polo"];

/// Both sides of a process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rosters {
    /// Polo ativo
    pub claimants: Vec<Party>,
    /// Polo passivo
    pub respondents: Vec<Party>,
}

/// Locate and map both party rosters of `source`
///
/// Never fails; with nothing to find both lists come back empty.
pub fn extract_parties(source: &Value, config: &NormalizerConfig) -> Rosters {
    let process = process_scope(source);

    let mut claimants: Vec<&Value> = resolve_list(process, CLAIMANT_ROSTERS).iter().collect();
    let mut respondents: Vec<&Value> = resolve_list(process, RESPONDENT_ROSTERS).iter().collect();

    if claimants.is_empty() || respondents.is_empty() {
        let generic = resolve_list(process, GENERIC_ROSTERS);
        if !generic.is_empty() {
            debug!(
                entries = generic.len(),
                "explicit roster missing, partitioning generic party list"
            );
            let (ativos, passivos) = partition_by_polo(generic);
            if claimants.is_empty() {
                claimants = ativos;
            }
            if respondents.is_empty() {
                respondents = passivos;
            }
        }
    }

    Rosters {
        claimants: claimants
            .into_iter()
            .map(|entry| map_party(entry, PartySide::Claimant, config))
            .collect(),
        respondents: respondents
            .into_iter()
            .map(|entry| map_party(entry, PartySide::Respondent, config))
            .collect(),
    }
}

/// Side a generic party entry declares through its polo marker
///
/// Matches "PASSIVO" / "ATIVO" anywhere in the marker, ignoring case.
pub fn polo_of(entry: &Value) -> Option<PartySide> {
    let marker = probe(entry, POLO_MARKER_FIELDS)?.to_uppercase();
    if marker.contains("PASSIVO") {
        Some(PartySide::Respondent)
    } else if marker.contains("ATIVO") {
        Some(PartySide::Claimant)
    } else {
        None
    }
}

fn partition_by_polo(entries: &[Value]) -> (Vec<&Value>, Vec<&Value>) {
    let mut ativos = Vec::new();
    let mut passivos = Vec::new();
    for entry in entries {
        match polo_of(entry) {
            Some(PartySide::Claimant) => ativos.push(entry),
            Some(PartySide::Respondent) => passivos.push(entry),
            None => debug!("party entry without a recognizable polo dropped"),
        }
    }
    (ativos, passivos)
}

/// Map one raw roster entry into a [`Party`]
///
/// The side decides how the document is read: CPF for claimants, CNPJ for
/// respondents. A document of the wrong length is dropped.
pub fn map_party(entry: &Value, side: PartySide, config: &NormalizerConfig) -> Party {
    let labels = &config.labels;

    let name = probe_paths(entry, NAME_FIELDS).unwrap_or_else(|| labels.party_name.clone());

    let tax_id = probe_paths(entry, DOCUMENT_FIELDS).and_then(|raw| {
        let masked = match side {
            PartySide::Claimant => mask_person_id(&raw),
            PartySide::Respondent => mask_org_id(&raw),
        };
        if masked.is_none() {
            debug!(side = side.as_str(), "party document failed validation, dropped");
        }
        masked
    });

    Party {
        name,
        tax_id,
        status: probe(entry, STATUS_FIELDS).unwrap_or_else(|| labels.party_status.clone()),
        role: probe(entry, ROLE_FIELDS).unwrap_or_else(|| labels.party_role.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> NormalizerConfig {
        NormalizerConfig::default()
    }

    #[test]
    fn test_explicit_rosters() {
        let source = json!({
            "poloAtivo": [{ "nome": "DIEGO", "cpf": "115.451.116-26", "situacao": "Ativo", "tipo": "REQUERENTE" }],
            "poloPassivo": [{ "nome": "OI S.A.", "cnpj": "76.535.764/0001-43", "situacao": "Ativo", "tipo": "REQUERIDO(A)" }]
        });

        let rosters = extract_parties(&source, &config());
        assert_eq!(
            rosters.claimants,
            vec![Party::new("DIEGO", Some("115.451.116-26".into()), "Ativo", "REQUERENTE")]
        );
        assert_eq!(
            rosters.respondents,
            vec![Party::new("OI S.A.", Some("76.535.764/0001-43".into()), "Ativo", "REQUERIDO(A)")]
        );
    }

    #[test]
    fn test_rosters_inside_envelope_and_basic_data() {
        let source = json!({
            "processo": {
                "dadosBasicos": {
                    "poloAtivo": [{ "nome": "A" }],
                    "reus": [{ "nome": "B" }]
                }
            }
        });

        let rosters = extract_parties(&source, &config());
        assert_eq!(rosters.claimants[0].name, "A");
        assert_eq!(rosters.respondents[0].name, "B");
    }

    #[test]
    fn test_generic_list_partitioned_case_insensitively() {
        let source = json!({
            "partes": [
                { "nome": "A", "polo": "POLO ATIVO" },
                { "nome": "B", "polo": "polo passivo" },
                { "nome": "C", "polo": "Polo Ativo" },
                { "nome": "D", "polo": "TERCEIRO" },
                { "nome": "E" }
            ]
        });

        let rosters = extract_parties(&source, &config());
        let claimants: Vec<_> = rosters.claimants.iter().map(|p| p.name.as_str()).collect();
        let respondents: Vec<_> = rosters.respondents.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(claimants, vec!["A", "C"]);
        assert_eq!(respondents, vec!["B"]);
    }

    #[test]
    fn test_generic_list_only_fills_missing_side() {
        let source = json!({
            "poloAtivo": [{ "nome": "EXPLICIT" }],
            "dadosBasicos": {
                "partes": [
                    { "nome": "GENERIC-A", "tipoPolo": "ATIVO" },
                    { "nome": "GENERIC-P", "tipoPolo": "PASSIVO" }
                ]
            }
        });

        let rosters = extract_parties(&source, &config());
        assert_eq!(rosters.claimants.len(), 1);
        assert_eq!(rosters.claimants[0].name, "EXPLICIT");
        assert_eq!(rosters.respondents.len(), 1);
        assert_eq!(rosters.respondents[0].name, "GENERIC-P");
    }

    #[test]
    fn test_nothing_found_is_empty_not_error() {
        let rosters = extract_parties(&json!({ "poloAtivo": [], "partes": "n/a" }), &config());
        assert_eq!(rosters, Rosters::default());
    }

    #[test]
    fn test_name_from_nested_person() {
        let party = map_party(
            &json!({ "pessoa": { "nome": "MARIA", "numeroDocumentoPrincipal": "11145111626" } }),
            PartySide::Claimant,
            &config(),
        );
        assert_eq!(party.name, "MARIA");
        assert_eq!(party.tax_id.as_deref(), Some("111.451.116-26"));
    }

    #[test]
    fn test_side_decides_document_interpretation() {
        let entry = json!({ "nome": "X", "documento": "76535764000143" });

        // A 14-digit document on the claimant side is not a CPF and is dropped
        assert_eq!(map_party(&entry, PartySide::Claimant, &config()).tax_id, None);
        assert_eq!(
            map_party(&entry, PartySide::Respondent, &config()).tax_id.as_deref(),
            Some("76.535.764/0001-43")
        );
    }

    #[test]
    fn test_defaults_applied() {
        let party = map_party(&json!({}), PartySide::Respondent, &config());
        assert_eq!(party, Party::new("Nome não informado", None, "Parte", "Não informado"));
    }

    #[test]
    fn test_polo_of() {
        assert_eq!(polo_of(&json!({ "polo": "Polo Passivo" })), Some(PartySide::Respondent));
        assert_eq!(polo_of(&json!({ "tipoParte": "ativo" })), Some(PartySide::Claimant));
        assert_eq!(polo_of(&json!({ "polo": "TERCEIRO INTERESSADO" })), None);
        assert_eq!(polo_of(&json!({ "polo": 1 })), None);
    }
}
