//! Integration tests for autos-store
//!
//! These tests verify the full upsert/read cycle for processes and the fetch log.

use autos_domain::traits::{FetchLog, ProcessSink};
use autos_domain::{Movement, Party, ProcessRecord};
use autos_store::{SqliteSink, StoreError};

fn sample_record() -> ProcessRecord {
    ProcessRecord {
        number: "5202268-77.2022.8.13.0024".to_string(),
        distribution_date: "21/09/2022".to_string(),
        case_class: "CUMPRIMENTO DE SENTENÇA (156)".to_string(),
        subject: "Responsabilidade Civil".to_string(),
        jurisdiction: "Belo Horizonte".to_string(),
        judging_body: "CENTRASE Cível de Belo Horizonte".to_string(),
        claimant_parties: vec![
            Party::new("DIEGO", Some("115.451.116-26".into()), "Ativo", "REQUERENTE"),
            Party::new("MARIA", None, "Parte", "Não informado"),
        ],
        respondent_parties: vec![Party::new(
            "OI S.A.",
            Some("76.535.764/0001-43".into()),
            "Ativo",
            "REQUERIDO(A)",
        )],
        movements: vec![
            Movement::new("03/09/2025 13:05:25", "Juntada de Petição de petição", None),
            Movement::new("02/09/2025 00:26:53", "Publicado Intimação", Some("98765".into())),
        ],
    }
}

#[test]
fn test_sink_initialization() {
    let sink = SqliteSink::new(":memory:");
    assert!(sink.is_ok(), "Sink should initialize successfully");
}

#[test]
fn test_upsert_and_get_process() {
    let mut sink = SqliteSink::new(":memory:").unwrap();
    let record = sample_record();

    let id = sink.upsert_process("TJMG", &record, Some("{\"numero\":\"x\"}")).unwrap();

    let retrieved = sink.get_process("tjmg", &record.number).unwrap();
    assert_eq!(retrieved, Some(record.clone()));
    assert_eq!(sink.process_id("TJMG", &record.number).unwrap(), Some(id));
    assert_eq!(
        sink.raw_metadata("TJMG", &record.number).unwrap().as_deref(),
        Some("{\"numero\":\"x\"}")
    );
}

#[test]
fn test_missing_process() {
    let sink = SqliteSink::new(":memory:").unwrap();
    assert_eq!(sink.get_process("TJMG", "nope").unwrap(), None);
    assert_eq!(sink.process_id("TJMG", "nope").unwrap(), None);
}

#[test]
fn test_reupsert_keeps_id_and_replaces_children() {
    let mut sink = SqliteSink::new(":memory:").unwrap();
    let mut record = sample_record();

    let first = sink.upsert_process("TJMG", &record, Some("{}")).unwrap();

    record.case_class = "PROCEDIMENTO COMUM".to_string();
    record.claimant_parties.truncate(1);
    record.movements.insert(0, Movement::new("04/09/2025 10:00:00", "Conclusos", None));
    let second = sink.upsert_process("TJMG", &record, None).unwrap();

    assert_eq!(first, second, "Id is assigned once per (tribunal, number)");

    let stored = sink.get_process("TJMG", &record.number).unwrap().unwrap();
    assert_eq!(stored.case_class, "PROCEDIMENTO COMUM");
    assert_eq!(stored.claimant_parties.len(), 1);
    assert_eq!(stored.movements.len(), 3);
    assert_eq!(stored.movements[0].description, "Conclusos");

    // Absent raw source keeps the previous one
    assert_eq!(sink.raw_metadata("TJMG", &record.number).unwrap().as_deref(), Some("{}"));
}

#[test]
fn test_same_number_different_tribunals() {
    let mut sink = SqliteSink::new(":memory:").unwrap();
    let record = sample_record();

    let a = sink.upsert_process("TJMG", &record, None).unwrap();
    let b = sink.upsert_process("TJSP", &record, None).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_empty_number_rejected() {
    let mut sink = SqliteSink::new(":memory:").unwrap();
    let result = sink.upsert_process("TJMG", &ProcessRecord::default(), None);
    assert!(matches!(result, Err(StoreError::InvalidData(_))));
}

#[test]
fn test_fetch_log_is_append_only() {
    let mut sink = SqliteSink::new(":memory:").unwrap();

    sink.record_fetch(&FetchLog {
        tribunal: "tjsp".to_string(),
        url: "https://api-publica.datajud.cnj.jus.br/api_publica_tjsp/_search".to_string(),
        method: "POST".to_string(),
        success: false,
        status_code: Some(503),
        elapsed_ms: Some(1200),
        processes_collected: 0,
        error: Some("Server error (HTTP 503)".to_string()),
    })
    .unwrap();
    sink.record_fetch(&FetchLog {
        tribunal: "TJSP".to_string(),
        url: "https://api-publica.datajud.cnj.jus.br/api_publica_tjsp/_search".to_string(),
        method: "POST".to_string(),
        success: true,
        status_code: Some(200),
        elapsed_ms: Some(340),
        processes_collected: 1,
        error: None,
    })
    .unwrap();
    sink.record_fetch(&FetchLog {
        tribunal: "TJMG".to_string(),
        success: true,
        ..Default::default()
    })
    .unwrap();

    let tjsp = sink.recent_fetches(Some("TJSP"), 10).unwrap();
    assert_eq!(tjsp.len(), 2);
    assert!(tjsp[0].success, "Newest first");
    assert_eq!(tjsp[1].status_code, Some(503));
    assert_eq!(tjsp[1].tribunal, "TJSP");

    assert_eq!(sink.recent_fetches(None, 10).unwrap().len(), 3);
    assert_eq!(sink.recent_fetches(None, 1).unwrap().len(), 1);
}

#[test]
fn test_persistent_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("autos.db");
    let record = sample_record();

    let id = {
        let mut sink = SqliteSink::new(&path).unwrap();
        sink.upsert_process("TJMG", &record, None).unwrap()
    };

    let sink = SqliteSink::new(&path).unwrap();
    assert_eq!(sink.process_id("TJMG", &record.number).unwrap(), Some(id));
    assert_eq!(sink.get_process("TJMG", &record.number).unwrap(), Some(record));
}
