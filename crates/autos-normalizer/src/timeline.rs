//! Movement timeline extraction
//!
//! Unlike rosters, movement lists are gathered from every known location and
//! concatenated. A source that nests the same list twice yields it twice;
//! legitimately repeated events (two identical "Juntada de Petição" on the same
//! day) are indistinguishable from such copies, so nothing is de-duplicated.

use crate::config::NormalizerConfig;
use crate::container::gather_lists;
use crate::dates::render_datetime;
use crate::probe::{probe, probe_paths, FieldPath};
use autos_domain::Movement;
use serde_json::Value;
use tracing::debug;

const MOVEMENT_LISTS: &[FieldPath] = &[
    &["movimentacoes"],
    &["movimentos"],
    &["processo", "movimentacoes"],
    &["processo", "movimentos"],
];

const DESCRIPTION_FIELDS: &[FieldPath] = &[
    &["movimento"],
    &["descricao"],
    &["descricaoMovimento"],
    &["nome"],
    &["texto"],
    &["movimentoNacional", "descricao"],
    &["movimentoLocal", "descricao"],
];

const DATE_FIELDS: &[&str] = &["data", "dataHora", "dataMovimento", "dataMovimentacao"];

const DOCUMENT_FIELDS: &[&str] = &["documento", "idDocumento", "documentoVinculado"];

/// Collect the timeline of `source` in source order
pub fn extract_movements(source: &Value, config: &NormalizerConfig) -> Vec<Movement> {
    let raw = gather_lists(source, MOVEMENT_LISTS);
    let total = raw.len();

    let movements: Vec<Movement> = raw
        .into_iter()
        .filter_map(|entry| map_movement(entry, config))
        .collect();

    if movements.len() < total {
        debug!(
            dropped = total - movements.len(),
            "movements without description skipped"
        );
    }
    movements
}

/// Map one raw entry; `None` when no description can be resolved
pub fn map_movement(entry: &Value, config: &NormalizerConfig) -> Option<Movement> {
    let description = probe_paths(entry, DESCRIPTION_FIELDS)?;
    let date = probe(entry, DATE_FIELDS)
        .map(|raw| render_datetime(&raw, config))
        .unwrap_or_default();

    Some(Movement {
        date,
        description,
        document: probe(entry, DOCUMENT_FIELDS),
    })
}
