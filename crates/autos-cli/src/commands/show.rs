//! Show command implementation.

use crate::cli::ShowArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use autos_domain::traits::ProcessSink;
use autos_domain::ProcessRecord;
use autos_normalizer::format_case_number;
use autos_store::SqliteSink;

/// Execute the show command.
pub fn execute_show(args: ShowArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let sink = SqliteSink::new(config.database_path()?)?;
    let tribunal = config.tribunal_code(args.tribunal.as_deref());
    let record = stored_record(&sink, tribunal, &args.number)?;

    println!("{}", formatter.format_record(&record)?);
    Ok(())
}

/// Read a stored record, accepting the number formatted or as bare digits.
pub fn stored_record<K>(sink: &K, tribunal: &str, number: &str) -> Result<ProcessRecord>
where
    K: ProcessSink,
    CliError: From<K::Error>,
{
    let number = format_case_number(number);
    sink.get_process(tribunal, &number)?
        .ok_or_else(|| CliError::NotFound(format!("{} in {}", number, tribunal.to_uppercase())))
}
