//! Lookup command implementation.

use crate::cli::LookupArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use autos_domain::traits::{FetchLog, ProcessSink};
use autos_domain::ProcessRecord;
use autos_normalizer::{format_case_number, is_valid_case_number, Normalizer};
use autos_sources::{ProcessSource, SourceClient, TribunalEntry, TribunalRegistry};
use autos_store::SqliteSink;
use std::time::Instant;
use tracing::{info, warn};

/// Execute the lookup command.
pub async fn execute_lookup(args: LookupArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let registry = TribunalRegistry::from_config(config.sources.tribunals.clone());
    let tribunal = registry.get(config.tribunal_code(args.tribunal.as_deref()))?;
    let client = SourceClient::new(&config.sources)?;
    let normalizer = Normalizer::try_new(config.normalizer.clone())?;

    let mut sink = if args.no_save {
        None
    } else {
        Some(SqliteSink::new(config.database_path()?)?)
    };

    let record = lookup_process(&args.number, tribunal, &client, &normalizer, sink.as_mut()).await?;

    println!("{}", formatter.format_record(&record)?);
    if formatter.shows_messages() {
        let message = format!("{} from {}", record.number, tribunal.code);
        if sink.is_some() {
            println!("{}", formatter.success(&format!("Saved {}", message)));
        } else {
            println!("{}", formatter.info(&format!("Fetched {} (not saved)", message)));
        }
    }

    Ok(())
}

/// Fetch, normalize and optionally persist one process.
///
/// Every fetch attempt lands in the sink's fetch log, failed ones included.
pub async fn lookup_process<S, K>(
    number: &str,
    tribunal: &TribunalEntry,
    source: &S,
    normalizer: &Normalizer,
    mut sink: Option<&mut K>,
) -> Result<ProcessRecord>
where
    S: ProcessSource,
    K: ProcessSink,
    CliError: From<K::Error>,
{
    let number = format_case_number(number);
    if !is_valid_case_number(&number) {
        return Err(CliError::InvalidInput(format!(
            "'{}' is not a process number (NNNNNNN-DD.AAAA.J.TR.OOOO)",
            number
        )));
    }

    info!(tribunal = %tribunal.code, number = %number, strategy = tribunal.strategy.as_str(), "looking up process");
    let started = Instant::now();

    let outcome = match source.fetch(tribunal, &number).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(tribunal = %tribunal.code, number = %number, error = %e, "fetch failed");
            if let Some(sink) = sink.as_deref_mut() {
                let (method, url) = source
                    .target(tribunal, &number)
                    .unwrap_or((tribunal.strategy.method(), tribunal.base_url.clone()));
                sink.record_fetch(&FetchLog {
                    tribunal: tribunal.code.clone(),
                    url,
                    method: method.to_string(),
                    success: false,
                    status_code: e.status_code(),
                    elapsed_ms: Some(started.elapsed().as_millis() as u64),
                    processes_collected: 0,
                    error: Some(e.to_string()),
                })?;
            }
            return Err(e.into());
        }
    };

    let mut record = normalizer.normalize(&outcome.document, &number);
    record.number = format_case_number(&record.number);

    if let Some(sink) = sink.as_deref_mut() {
        let raw = serde_json::to_string(&outcome.document)?;
        sink.upsert_process(&tribunal.code, &record, Some(&raw))?;
        sink.record_fetch(&FetchLog {
            tribunal: tribunal.code.clone(),
            url: outcome.url.clone(),
            method: outcome.method.to_string(),
            success: true,
            status_code: Some(outcome.status_code),
            elapsed_ms: Some(outcome.elapsed_ms),
            processes_collected: 1,
            error: None,
        })?;
    }

    info!(
        number = %record.number,
        movements = record.movements.len(),
        elapsed_ms = outcome.elapsed_ms,
        "process normalized"
    );
    Ok(record)
}
