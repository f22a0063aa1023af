//! Normalize command implementation.

use crate::cli::NormalizeArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use autos_domain::ProcessRecord;
use autos_normalizer::Normalizer;
use std::fs;
use std::io::{self, Read};

/// Execute the normalize command.
pub fn execute_normalize(args: NormalizeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let json_data = if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else if let Some(file_path) = &args.file {
        fs::read_to_string(file_path)?
    } else {
        return Err(CliError::InvalidInput(
            "Must specify either --file or --stdin".to_string(),
        ));
    };

    let normalizer = Normalizer::try_new(config.normalizer.clone())?;
    let record = normalize_document(&normalizer, &json_data, args.number.as_deref())?;

    println!("{}", formatter.format_record(&record)?);
    Ok(())
}

/// Normalize a raw JSON document read from disk or stdin.
pub fn normalize_document(
    normalizer: &Normalizer,
    json_data: &str,
    number: Option<&str>,
) -> Result<ProcessRecord> {
    if json_data.trim().is_empty() {
        return Err(CliError::InvalidInput("No document provided".to_string()));
    }
    let requested = number.map(str::trim).unwrap_or_default();
    let record = normalizer.normalize_str(json_data, requested)?;
    if requested.is_empty() && record.number == normalizer.config().labels.not_informed {
        return Err(CliError::InvalidInput(
            "Document carries no process number; pass --number".to_string(),
        ));
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autos_normalizer::NormalizerError;

    #[test]
    fn test_normalize_document() {
        let json = r#"{ "poloPassivo": [{ "nome": "BANCO", "cnpj": "00000000000191" }] }"#;
        let record = normalize_document(&Normalizer::default(), json, Some("42")).unwrap();
        assert_eq!(record.number, "42");
        assert_eq!(record.respondent_parties[0].tax_id.as_deref(), Some("00.000.000/0001-91"));
    }

    #[test]
    fn test_empty_and_invalid_input() {
        let normalizer = Normalizer::default();
        assert!(matches!(
            normalize_document(&normalizer, "  \n", None),
            Err(CliError::InvalidInput(_))
        ));
        assert!(matches!(
            normalize_document(&normalizer, "<html></html>", None),
            Err(CliError::Normalizer(NormalizerError::JsonParse(_)))
        ));
    }

    #[test]
    fn test_numberless_document_needs_number() {
        let normalizer = Normalizer::default();
        let json = r#"{ "classeProcessual": "Procedimento Comum" }"#;
        assert!(matches!(
            normalize_document(&normalizer, json, None),
            Err(CliError::InvalidInput(_))
        ));
        assert!(matches!(
            normalize_document(&normalizer, json, Some("  ")),
            Err(CliError::InvalidInput(_))
        ));
        assert_eq!(normalize_document(&normalizer, json, Some("7")).unwrap().number, "7");
    }

    #[test]
    fn test_requires_a_source() {
        let args = NormalizeArgs {
            file: None,
            stdin: false,
            number: None,
        };
        let formatter = Formatter::new(crate::config::OutputFormat::Quiet, false);
        assert!(matches!(
            execute_normalize(args, &Config::default(), &formatter),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("response.json");
        fs::write(&path, r#"{ "numero": "5202268-77.2022.8.13.0024" }"#).unwrap();

        let args = NormalizeArgs {
            file: Some(path),
            stdin: false,
            number: None,
        };
        let formatter = Formatter::new(crate::config::OutputFormat::Quiet, false);
        assert!(execute_normalize(args, &Config::default(), &formatter).is_ok());
    }
}
