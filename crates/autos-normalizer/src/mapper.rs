//! Record mapper: composes probing, parties and timeline into one record

use crate::config::NormalizerConfig;
use crate::container::{process_scope, resolve_list, resolve_record};
use crate::dates::render_date;
use crate::error::NormalizerError;
use crate::parties::extract_parties;
use crate::probe::{probe_paths, probe_scopes, FieldPath};
use crate::timeline::extract_movements;
use autos_domain::ProcessRecord;
use serde_json::Value;
use tracing::debug;

const BASIC_DATA: &[FieldPath] = &[&["dadosBasicos"]];

const NUMBER_FIELDS: &[FieldPath] = &[&["numeroProcesso"], &["numero"], &["numeroUnico"]];

const DISTRIBUTION_DATE_FIELDS: &[FieldPath] =
    &[&["dataDistribuicao"], &["dataAjuizamento"], &["dataAutuacao"]];

const CLASS_FIELDS: &[FieldPath] = &[
    &["classeJudicial"],
    &["classeProcessual"],
    &["classe"],
    &["classeProcessual", "descricao"],
    &["classeProcessual", "nome"],
    &["classe", "nome"],
    &["classe", "descricao"],
];

const SUBJECT_FIELDS: &[FieldPath] = &[
    &["assunto"],
    &["assuntoPrincipal"],
    &["assunto", "descricao"],
    &["assunto", "nome"],
];

const SUBJECT_LISTS: &[FieldPath] = &[&["assuntos"]];

const SUBJECT_ENTRY_FIELDS: &[FieldPath] = &[
    &["descricao"],
    &["nome"],
    &["assuntoLocal", "descricao"],
    &["assuntoNacional", "descricao"],
];

const JURISDICTION_FIELDS: &[FieldPath] = &[
    &["jurisdicao"],
    &["comarca"],
    &["localidade"],
    &["orgaoJulgador", "comarca"],
    &["orgaoJulgador", "municipio"],
];

const JUDGING_BODY_FIELDS: &[FieldPath] = &[
    &["orgaoJulgador"],
    &["orgaoJulgador", "nome"],
    &["orgaoJulgador", "nomeOrgao"],
    &["orgaoJulgador", "descricao"],
    &["vara"],
];

/// Maps heterogeneous source documents into [`ProcessRecord`]s
///
/// Holds only configuration, so one instance can serve any number of
/// concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    /// Create a normalizer with the given configuration
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Create a normalizer, rejecting invalid configuration
    pub fn try_new(config: NormalizerConfig) -> Result<Self, NormalizerError> {
        config.validate().map_err(NormalizerError::Config)?;
        Ok(Self::new(config))
    }

    /// Configuration in use
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Map a parsed source document
    ///
    /// `requested_number` is the identifier the caller asked for; it becomes
    /// the record number when the document does not carry one. With neither,
    /// the number is the not-informed label.
    pub fn normalize(&self, source: &Value, requested_number: &str) -> ProcessRecord {
        let labels = &self.config.labels;
        let not_informed = || labels.not_informed.clone();

        let process = process_scope(source);
        let basic = resolve_record(process, BASIC_DATA).or_else(|| resolve_record(source, BASIC_DATA));
        let scopes: Vec<&Value> = match basic {
            Some(basic) => vec![basic, process],
            None => vec![process],
        };

        let number = probe_scopes(&scopes, NUMBER_FIELDS)
            .or_else(|| Some(requested_number.trim().to_string()).filter(|n| !n.is_empty()))
            .unwrap_or_else(not_informed);

        let distribution_date = probe_scopes(&scopes, DISTRIBUTION_DATE_FIELDS)
            .map(|raw| render_date(&raw, &self.config))
            .unwrap_or_default();

        let subject = probe_scopes(&scopes, SUBJECT_FIELDS)
            .or_else(|| scopes.iter().find_map(|scope| joined_subjects(scope)))
            .unwrap_or_else(not_informed);

        let rosters = extract_parties(source, &self.config);
        let movements = extract_movements(source, &self.config);

        debug!(
            number = %number,
            claimants = rosters.claimants.len(),
            respondents = rosters.respondents.len(),
            movements = movements.len(),
            "source document normalized"
        );

        ProcessRecord {
            number,
            distribution_date,
            case_class: probe_scopes(&scopes, CLASS_FIELDS).unwrap_or_else(not_informed),
            subject,
            jurisdiction: probe_scopes(&scopes, JURISDICTION_FIELDS).unwrap_or_else(not_informed),
            judging_body: probe_scopes(&scopes, JUDGING_BODY_FIELDS).unwrap_or_else(not_informed),
            claimant_parties: rosters.claimants,
            respondent_parties: rosters.respondents,
            movements,
        }
    }

    /// Parse `json` and map it
    pub fn normalize_str(
        &self,
        json: &str,
        requested_number: &str,
    ) -> Result<ProcessRecord, NormalizerError> {
        let source: Value = serde_json::from_str(json)?;
        Ok(self.normalize(&source, requested_number))
    }
}

/// Subject list such as DataJud's `assuntos: [{ codigo, nome }]`, joined
fn joined_subjects(scope: &Value) -> Option<String> {
    let names: Vec<String> = resolve_list(scope, SUBJECT_LISTS)
        .iter()
        .filter_map(|entry| probe_paths(entry, SUBJECT_ENTRY_FIELDS))
        .collect();
    (!names.is_empty()).then(|| names.join("; "))
}

/// Map a source document with the default (pt-BR) configuration
pub fn map_process_data_from_source(source: &Value, requested_number: &str) -> ProcessRecord {
    Normalizer::default().normalize(source, requested_number)
}
