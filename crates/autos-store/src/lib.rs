//! Autos Storage Layer
//!
//! Implements the ProcessSink trait using SQLite.
//!
//! # Architecture
//!
//! - `processes` holds one row per `(tribunal, number)` plus the raw source JSON
//! - `parties` and `movements` are child rows, rewritten on every upsert
//! - `fetch_logs` is an append-only audit of upstream requests
//!
//! # Examples
//!
//! ```no_run
//! use autos_store::SqliteSink;
//!
//! let sink = SqliteSink::new(":memory:").unwrap();
//! // Sink is now ready for process operations
//! ```

#![warn(missing_docs)]

use autos_domain::traits::{FetchLog, ProcessSink};
use autos_domain::{Movement, Party, PartySide, ProcessId, ProcessRecord};
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::info;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of ProcessSink
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own SqliteSink instance.
pub struct SqliteSink {
    conn: Connection,
}

impl SqliteSink {
    /// Create a new SqliteSink with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut sink = Self { conn };
        sink.initialize_schema()?;
        Ok(sink)
    }

    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    fn process_id_to_bytes(id: ProcessId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    fn bytes_to_process_id(bytes: &[u8]) -> Result<ProcessId, StoreError> {
        let arr: [u8; 16] = bytes.try_into().map_err(|_| {
            StoreError::InvalidData(format!(
                "Expected 16 bytes for ProcessId, got {}",
                bytes.len()
            ))
        })?;
        Ok(ProcessId::from_value(u128::from_be_bytes(arr)))
    }

    fn tribunal_key(tribunal: &str) -> String {
        tribunal.trim().to_uppercase()
    }

    fn now_ms() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or_default()
    }

    /// Id of a stored process, if present
    pub fn process_id(&self, tribunal: &str, number: &str) -> Result<Option<ProcessId>, StoreError> {
        let bytes: Option<Vec<u8>> = self
            .conn
            .query_row(
                "SELECT id FROM processes WHERE tribunal = ?1 AND number = ?2",
                params![Self::tribunal_key(tribunal), number],
                |row| row.get(0),
            )
            .optional()?;
        bytes.map(|b| Self::bytes_to_process_id(&b)).transpose()
    }

    /// Raw source JSON saved with a process
    pub fn raw_metadata(&self, tribunal: &str, number: &str) -> Result<Option<String>, StoreError> {
        let raw: Option<Option<String>> = self
            .conn
            .query_row(
                "SELECT raw_metadata FROM processes WHERE tribunal = ?1 AND number = ?2",
                params![Self::tribunal_key(tribunal), number],
                |row| row.get(0),
            )
            .optional()?;
        Ok(raw.flatten())
    }

    /// Most recent fetch attempts, newest first
    pub fn recent_fetches(&self, tribunal: Option<&str>, limit: usize) -> Result<Vec<FetchLog>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT tribunal, url, method, success, status_code, elapsed_ms, processes_collected, error
             FROM fetch_logs
             WHERE ?1 IS NULL OR tribunal = ?1
             ORDER BY id DESC
             LIMIT ?2",
        )?;

        let tribunal = tribunal.map(Self::tribunal_key);
        let logs = stmt
            .query_map(params![tribunal, limit as i64], |row| {
                Ok(FetchLog {
                    tribunal: row.get(0)?,
                    url: row.get(1)?,
                    method: row.get(2)?,
                    success: row.get(3)?,
                    status_code: row.get(4)?,
                    elapsed_ms: row.get::<_, Option<i64>>(5)?.map(|ms| ms as u64),
                    processes_collected: row.get(6)?,
                    error: row.get(7)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(logs)
    }

    fn replace_children(tx: &Transaction<'_>, id_bytes: &[u8], record: &ProcessRecord) -> Result<(), StoreError> {
        tx.execute("DELETE FROM parties WHERE process_id = ?1", params![id_bytes])?;
        tx.execute("DELETE FROM movements WHERE process_id = ?1", params![id_bytes])?;

        let mut claimant_ordinal = 0;
        let mut respondent_ordinal = 0;
        for (side, party) in record.parties() {
            let ordinal = match side {
                PartySide::Claimant => &mut claimant_ordinal,
                PartySide::Respondent => &mut respondent_ordinal,
            };
            *ordinal += 1;
            tx.execute(
                "INSERT INTO parties (process_id, ordinal, side, name, tax_id, person_kind, status, role)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    id_bytes,
                    *ordinal,
                    side.as_str(),
                    party.name,
                    party.tax_id,
                    party.person_kind(side).as_str(),
                    party.status,
                    party.role,
                ],
            )?;
        }

        for (index, movement) in record.movements.iter().enumerate() {
            tx.execute(
                "INSERT INTO movements (process_id, ordinal, date, description, document)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    id_bytes,
                    (index + 1) as i64,
                    movement.date,
                    movement.description,
                    movement.document,
                ],
            )?;
        }
        Ok(())
    }

    fn load_parties(&self, id_bytes: &[u8], side: PartySide) -> Result<Vec<Party>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT name, tax_id, status, role FROM parties
             WHERE process_id = ?1 AND side = ?2
             ORDER BY ordinal",
        )?;
        let parties = stmt
            .query_map(params![id_bytes, side.as_str()], |row| {
                Ok(Party {
                    name: row.get(0)?,
                    tax_id: row.get(1)?,
                    status: row.get(2)?,
                    role: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(parties)
    }

    fn load_movements(&self, id_bytes: &[u8]) -> Result<Vec<Movement>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT date, description, document FROM movements
             WHERE process_id = ?1
             ORDER BY ordinal",
        )?;
        let movements = stmt
            .query_map(params![id_bytes], |row| {
                Ok(Movement {
                    date: row.get(0)?,
                    description: row.get(1)?,
                    document: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(movements)
    }
}

impl ProcessSink for SqliteSink {
    type Error = StoreError;

    fn upsert_process(
        &mut self,
        tribunal: &str,
        record: &ProcessRecord,
        raw_source: Option<&str>,
    ) -> Result<ProcessId, Self::Error> {
        if record.number.trim().is_empty() {
            return Err(StoreError::InvalidData("process number is empty".to_string()));
        }

        let tribunal = Self::tribunal_key(tribunal);
        let now = Self::now_ms();
        let tx = self.conn.transaction()?;

        let existing: Option<Vec<u8>> = tx
            .query_row(
                "SELECT id FROM processes WHERE tribunal = ?1 AND number = ?2",
                params![tribunal, record.number],
                |row| row.get(0),
            )
            .optional()?;

        let id = match existing {
            Some(bytes) => {
                let id = Self::bytes_to_process_id(&bytes)?;
                tx.execute(
                    "UPDATE processes SET
                        distribution_date = ?2, case_class = ?3, subject = ?4,
                        jurisdiction = ?5, judging_body = ?6,
                        raw_metadata = COALESCE(?7, raw_metadata), updated_at = ?8
                     WHERE id = ?1",
                    params![
                        bytes,
                        record.distribution_date,
                        record.case_class,
                        record.subject,
                        record.jurisdiction,
                        record.judging_body,
                        raw_source,
                        now,
                    ],
                )?;
                id
            }
            None => {
                let id = ProcessId::new();
                tx.execute(
                    "INSERT INTO processes (
                        id, tribunal, number, distribution_date, case_class, subject,
                        jurisdiction, judging_body, raw_metadata, created_at, updated_at
                     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
                    params![
                        Self::process_id_to_bytes(id),
                        tribunal,
                        record.number,
                        record.distribution_date,
                        record.case_class,
                        record.subject,
                        record.jurisdiction,
                        record.judging_body,
                        raw_source,
                        now,
                    ],
                )?;
                id
            }
        };

        Self::replace_children(&tx, &Self::process_id_to_bytes(id), record)?;
        tx.commit()?;

        info!(
            %id,
            tribunal = %tribunal,
            number = %record.number,
            parties = record.claimant_parties.len() + record.respondent_parties.len(),
            movements = record.movements.len(),
            "process persisted"
        );
        Ok(id)
    }

    fn get_process(&self, tribunal: &str, number: &str) -> Result<Option<ProcessRecord>, Self::Error> {
        let row = self
            .conn
            .query_row(
                "SELECT id, number, distribution_date, case_class, subject, jurisdiction, judging_body
                 FROM processes WHERE tribunal = ?1 AND number = ?2",
                params![Self::tribunal_key(tribunal), number],
                |row| {
                    let id: Vec<u8> = row.get(0)?;
                    let record = ProcessRecord {
                        number: row.get(1)?,
                        distribution_date: row.get(2)?,
                        case_class: row.get(3)?,
                        subject: row.get(4)?,
                        jurisdiction: row.get(5)?,
                        judging_body: row.get(6)?,
                        ..Default::default()
                    };
                    Ok((id, record))
                },
            )
            .optional()?;

        let Some((id_bytes, mut record)) = row else {
            return Ok(None);
        };

        record.claimant_parties = self.load_parties(&id_bytes, PartySide::Claimant)?;
        record.respondent_parties = self.load_parties(&id_bytes, PartySide::Respondent)?;
        record.movements = self.load_movements(&id_bytes)?;
        Ok(Some(record))
    }

    fn record_fetch(&mut self, log: &FetchLog) -> Result<(), Self::Error> {
        self.conn.execute(
            "INSERT INTO fetch_logs (
                tribunal, url, method, success, status_code, elapsed_ms,
                processes_collected, error, created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                Self::tribunal_key(&log.tribunal),
                log.url,
                log.method,
                log.success,
                log.status_code,
                log.elapsed_ms.map(|ms| ms as i64),
                log.processes_collected,
                log.error,
                Self::now_ms(),
            ],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_id_bytes() {
        let id = ProcessId::new();
        let bytes = SqliteSink::process_id_to_bytes(id);
        assert_eq!(SqliteSink::bytes_to_process_id(&bytes).unwrap(), id);
        assert!(matches!(
            SqliteSink::bytes_to_process_id(&bytes[..8]),
            Err(StoreError::InvalidData(_))
        ));
    }

    #[test]
    fn test_tribunal_key() {
        assert_eq!(SqliteSink::tribunal_key(" tjmg "), "TJMG");
    }
}
